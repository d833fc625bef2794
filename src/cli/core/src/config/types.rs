/* src/cli/core/src/config/types.rs */

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use serde::Deserialize;
use vuessr_axum::LegacyRoute;
use vuessr_server::legacy::DEFAULT_BUILD_COMMAND;
use vuessr_server::{RendererConfig, RuntimeConfig, SessionContext, SsrConfig, StaticSite};

#[derive(Debug, Clone, Deserialize)]
pub struct VuessrConfig {
  #[serde(default)]
  pub site: SiteSection,
  #[serde(default)]
  pub apps: Vec<AppEntry>,
  #[serde(default)]
  pub runtime: RuntimeConfig,
  #[serde(default)]
  pub renderer: RendererConfig,
  #[serde(default)]
  pub server: ServerSection,
  /// Mounts the legacy build-script route when present.
  #[serde(default)]
  pub legacy: Option<LegacySection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SiteSection {
  #[serde(default = "default_site_name")]
  pub name: String,
  #[serde(default)]
  pub developer_mode: bool,
  #[serde(default = "default_user")]
  pub default_user: String,
}

impl Default for SiteSection {
  fn default() -> Self {
    Self { name: default_site_name(), developer_mode: false, default_user: default_user() }
  }
}

fn default_site_name() -> String {
  "localhost".to_string()
}

fn default_user() -> String {
  "Guest".to_string()
}

/// One installed application. Order in the file is installation order.
#[derive(Debug, Clone, Deserialize)]
pub struct AppEntry {
  pub name: String,
  pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
  #[serde(default = "default_port")]
  pub port: u16,
}

impl Default for ServerSection {
  fn default() -> Self {
    Self { port: default_port() }
  }
}

fn default_port() -> u16 {
  8000
}

#[derive(Debug, Clone, Deserialize)]
pub struct LegacySection {
  #[serde(default = "default_legacy_command")]
  pub command: String,
  #[serde(default = "default_legacy_route")]
  pub route: String,
}

impl Default for LegacySection {
  fn default() -> Self {
    Self { command: default_legacy_command(), route: default_legacy_route() }
  }
}

fn default_legacy_command() -> String {
  DEFAULT_BUILD_COMMAND.to_string()
}

fn default_legacy_route() -> String {
  "/frontend".to_string()
}

/// Whether `route` falls under `/assets/<app>`, where the app's public files are mounted.
fn asset_prefix_overlaps(app: &str, route: &str) -> bool {
  let prefix = format!("/assets/{app}");
  route
    .trim_end_matches('/')
    .strip_prefix(&prefix)
    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

impl VuessrConfig {
  pub fn validate(&self) -> Result<()> {
    if self.apps.is_empty() {
      bail!("at least one [[apps]] entry is required");
    }
    let mut seen = HashSet::new();
    for app in &self.apps {
      if app.name.is_empty() {
        bail!("apps.name must not be empty");
      }
      if app.name.contains(['{', '}', '*', '/']) {
        bail!("app name \"{}\" must not contain '{{', '}}', '*' or '/'", app.name);
      }
      if let Some(legacy) = &self.legacy
        && asset_prefix_overlaps(&app.name, &legacy.route)
      {
        bail!("legacy.route \"{}\" collides with the assets of app \"{}\"", legacy.route, app.name);
      }
      if !seen.insert(app.name.as_str()) {
        bail!("duplicate app name \"{}\"", app.name);
      }
    }
    if self.runtime.min_major < self.runtime.report_major {
      bail!(
        "runtime.min_major ({}) must not be lower than runtime.report_major ({})",
        self.runtime.min_major,
        self.runtime.report_major
      );
    }
    if self.runtime.probe_timeout_secs == 0 {
      bail!("runtime.probe_timeout_secs must be greater than 0");
    }
    if self.renderer.timeout_secs == 0 {
      bail!("renderer.timeout_secs must be greater than 0");
    }
    if let Some(legacy) = &self.legacy
      && !legacy.route.starts_with('/')
    {
      bail!("legacy.route \"{}\" must start with '/'", legacy.route);
    }
    Ok(())
  }

  /// Rebase relative app and script paths onto `base_dir`.
  pub fn resolve_paths(&mut self, base_dir: &Path) {
    for app in &mut self.apps {
      if app.path.is_relative() {
        app.path = base_dir.join(&app.path);
      }
    }
    if self.renderer.script.is_relative() {
      self.renderer.script = base_dir.join(&self.renderer.script);
    }
  }

  pub fn site(&self) -> StaticSite {
    self.apps.iter().fold(StaticSite::default(), |site, app| site.app(&app.name, &app.path))
  }

  pub fn session(&self) -> SessionContext {
    SessionContext {
      user: self.site.default_user.clone(),
      site_name: self.site.name.clone(),
      developer_mode: self.site.developer_mode,
    }
  }

  pub fn ssr_config(&self) -> SsrConfig {
    SsrConfig { runtime: self.runtime.clone(), renderer: self.renderer.clone() }
  }

  /// Legacy route rooted at `base_dir`, if configured.
  pub fn legacy_route(&self, base_dir: &Path) -> Option<LegacyRoute> {
    self.legacy.as_ref().map(|l| LegacyRoute {
      route: l.route.clone(),
      command: l.command.clone(),
      cwd: base_dir.to_path_buf(),
    })
  }
}
