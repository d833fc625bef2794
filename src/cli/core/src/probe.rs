/* src/cli/core/src/probe.rs */

// `vuessr probe` command: reports each runtime candidate and the selection outcome.

use anyhow::{Result, bail};
use vuessr_server::probe_candidates;
use vuessr_server::vuessr_engine::select_runtime;

use crate::config::VuessrConfig;
use crate::ui::{self, DIM, RESET};

pub async fn run_probe(config: &VuessrConfig) -> Result<()> {
  ui::banner("probe");
  let policy = config.runtime.policy();
  ui::arrow(&format!(
    "probing {} candidates {DIM}(requires v{}+){RESET}",
    config.runtime.candidates.len(),
    policy.min_major
  ));

  let probes = probe_candidates(&config.runtime).await;
  for probe in &probes {
    match &probe.output {
      Some(version) => ui::detail_ok(&format!("{} {DIM}{version}{RESET}", probe.command)),
      None => ui::detail_fail(&format!("{} {DIM}not found{RESET}", probe.command)),
    }
  }
  ui::blank();

  match select_runtime(&probes, &policy) {
    Ok(selected) => {
      ui::ok(&format!("selected {} ({})", selected.command, selected.version.raw));
      Ok(())
    }
    Err(e) => {
      ui::fail(&e.title());
      for line in e.to_string().lines() {
        ui::detail(line);
      }
      bail!("no usable runtime");
    }
  }
}
