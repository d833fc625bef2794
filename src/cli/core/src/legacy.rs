/* src/cli/core/src/legacy.rs */

// `vuessr legacy` command: prints the legacy build script's HTML.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use vuessr_server::legacy::{DEFAULT_BUILD_COMMAND, get_html_from_build_script};

use crate::config::VuessrConfig;

pub async fn run_legacy(config: &VuessrConfig, base_dir: &Path) -> Result<()> {
  let command = config.legacy.as_ref().map_or(DEFAULT_BUILD_COMMAND, |l| l.command.as_str());
  let html = get_html_from_build_script(command, base_dir).await?;
  let mut stdout = std::io::stdout().lock();
  stdout.write_all(html.as_bytes()).context("failed to write build output to stdout")?;
  Ok(())
}
