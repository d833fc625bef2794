/* src/cli/core/src/serve.rs */

// `vuessr serve` command: mounts every installed app behind the axum adapter.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use vuessr_axum::{IntoAxumRouter, SsrApp};

use crate::config::VuessrConfig;
use crate::ui::{self, DIM, RESET};

pub async fn run_serve(config: &VuessrConfig, base_dir: &Path, port: Option<u16>) -> Result<()> {
  let port = port.unwrap_or(config.server.port);
  ui::banner("serve");

  for app in &config.apps {
    ui::arrow(&format!("{} {DIM}{}{RESET}", app.name, app.path.display()));
  }
  if !config.renderer.script.is_file() {
    ui::warn(&format!(
      "renderer script {} not found; pages will render the fallback view",
      config.renderer.script.display()
    ));
  }

  let mut app = SsrApp::new(Arc::new(config.site()), config.ssr_config()).session(config.session());
  if let Some(legacy) = config.legacy_route(base_dir) {
    ui::arrow(&format!("legacy route {} {DIM}{}{RESET}", legacy.route, legacy.command));
    app = app.legacy(legacy);
  }

  ui::ok(&format!("listening on http://localhost:{port}"));
  ui::blank();
  app.serve(&format!("0.0.0.0:{port}")).await.map_err(|e| anyhow!("server error: {e}"))
}
