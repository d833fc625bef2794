/* src/cli/core/src/render.rs */

// `vuessr render` command: renders one request path and writes the document to stdout.

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use vuessr_server::{PageRenderer, VueRenderer};

use crate::config::VuessrConfig;

pub async fn run_render(config: &VuessrConfig, path: &str, user: Option<String>) -> Result<()> {
  let mut session = config.session();
  if let Some(user) = user {
    session.user = user;
  }

  let site = Arc::new(config.site());
  let mut renderer = VueRenderer::new(site, Arc::new(config.ssr_config()), session, path)?;
  if !renderer.can_handle() {
    bail!("no Vue component matches {path}");
  }
  if let Some(component) = renderer.component() {
    tracing::info!(app = %component.app, file = %component.file_path.display(), "rendering");
  }

  let page = renderer.render().await?;
  let mut stdout = std::io::stdout().lock();
  stdout.write_all(page.body.as_bytes()).context("failed to write page to stdout")?;
  stdout.flush().context("failed to flush stdout")?;
  Ok(())
}
