/* src/cli/core/src/config/tests/mod.rs */


use super::*;

fn parse(toml_str: &str) -> VuessrConfig {
  toml::from_str(toml_str).unwrap()
}

#[test]
fn minimal_config_uses_defaults() {
  let config = parse(
    r#"
[[apps]]
name = "wiki"
path = "apps/wiki/wiki"
"#,
  );
  config.validate().unwrap();
  assert_eq!(config.site.name, "localhost");
  assert_eq!(config.site.default_user, "Guest");
  assert!(!config.site.developer_mode);
  assert_eq!(config.server.port, 8000);
  assert_eq!(config.runtime.min_major, 22);
  assert_eq!(config.renderer.timeout_secs, 30);
  assert!(config.legacy.is_none());
}

#[test]
fn full_config_parses_every_section() {
  let config = parse(
    r#"
[site]
name = "docs.example.com"
developer_mode = true
default_user = "Administrator"

[[apps]]
name = "frappe"
path = "/srv/apps/frappe/frappe"

[[apps]]
name = "wiki"
path = "/srv/apps/wiki/wiki"

[runtime]
candidates = ["/opt/node22/bin/node"]
min_major = 20
report_major = 16
probe_timeout_secs = 2

[renderer]
script = "scripts/ssr.js"
timeout_secs = 10
component_extension = "vue"

[server]
port = 9100

[legacy]
route = "/legacy"
"#,
  );
  config.validate().unwrap();
  assert_eq!(config.apps.len(), 2);
  assert_eq!(config.apps[1].name, "wiki");
  assert_eq!(config.runtime.candidates, vec!["/opt/node22/bin/node"]);
  assert_eq!(config.runtime.policy().min_major, 20);
  assert_eq!(config.server.port, 9100);
  let legacy = config.legacy.as_ref().unwrap();
  assert_eq!(legacy.route, "/legacy");
  assert_eq!(legacy.command, "node build.js");

  let session = config.session();
  assert_eq!(session.user, "Administrator");
  assert_eq!(session.site_name, "docs.example.com");
  assert!(session.developer_mode);
}

#[test]
fn rejects_missing_apps() {
  let err = parse("[site]\nname = \"x\"\n").validate().unwrap_err();
  assert!(err.to_string().contains("[[apps]]"));
}

#[test]
fn rejects_duplicate_app_names() {
  let config = parse(
    r#"
[[apps]]
name = "wiki"
path = "a"

[[apps]]
name = "wiki"
path = "b"
"#,
  );
  let err = config.validate().unwrap_err();
  assert!(err.to_string().contains("duplicate app name \"wiki\""));
}

#[test]
fn rejects_inverted_policy() {
  let config = parse(
    r#"
[[apps]]
name = "wiki"
path = "a"

[runtime]
min_major = 16
report_major = 18
"#,
  );
  assert!(config.validate().is_err());
}

#[test]
fn rejects_zero_timeouts() {
  let config = parse("[[apps]]\nname = \"wiki\"\npath = \"a\"\n[renderer]\ntimeout_secs = 0\n");
  assert!(config.validate().unwrap_err().to_string().contains("renderer.timeout_secs"));
  let config =
    parse("[[apps]]\nname = \"wiki\"\npath = \"a\"\n[runtime]\nprobe_timeout_secs = 0\n");
  assert!(config.validate().unwrap_err().to_string().contains("probe_timeout_secs"));
}

#[test]
fn rejects_relative_legacy_route() {
  let config = parse("[[apps]]\nname = \"wiki\"\npath = \"a\"\n[legacy]\nroute = \"frontend\"\n");
  assert!(config.validate().is_err());
}

#[test]
fn site_keeps_install_order() {
  use vuessr_server::Site;

  let config = parse(
    r#"
[[apps]]
name = "frappe"
path = "/a/frappe"

[[apps]]
name = "wiki"
path = "/a/wiki"
"#,
  );
  let site = config.site();
  assert_eq!(site.installed_apps(), vec!["frappe", "wiki"]);
  assert_eq!(site.app_path("wiki"), Some(std::path::PathBuf::from("/a/wiki")));
}

#[test]
fn rejects_route_pattern_characters_in_app_names() {
  for name in ["wi{ki}", "wiki*", "a/b"] {
    let config = parse(&format!("[[apps]]\nname = \"{name}\"\npath = \"a\"\n"));
    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("must not contain"), "{name}: {err}");
  }
}

#[test]
fn rejects_legacy_route_inside_app_assets() {
  let base = "[[apps]]\nname = \"wiki\"\npath = \"a\"\n[legacy]\n";
  for route in ["/assets/wiki", "/assets/wiki/", "/assets/wiki/page"] {
    let config = parse(&format!("{base}route = \"{route}\"\n"));
    assert!(config.validate().unwrap_err().to_string().contains("collides"), "{route}");
  }
  parse(&format!("{base}route = \"/assets/wikipedia\"\n")).validate().unwrap();
}
