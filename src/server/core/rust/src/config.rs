/* src/server/core/rust/src/config.rs */

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;
use vuessr_engine::RuntimePolicy;

/// Executables probed for a usable Node.js, in preference order.
pub const DEFAULT_RUNTIME_CANDIDATES: &[&str] = &[
  "node22",
  "/opt/homebrew/bin/node22",
  "/usr/local/bin/node22",
  "/opt/homebrew/bin/node",
  "/usr/local/bin/node",
  "node",
  "/usr/bin/node",
];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
  pub candidates: Vec<String>,
  pub min_major: u32,
  pub report_major: u32,
  pub probe_timeout_secs: u64,
}

impl Default for RuntimeConfig {
  fn default() -> Self {
    let policy = RuntimePolicy::default();
    Self {
      candidates: DEFAULT_RUNTIME_CANDIDATES.iter().map(|c| (*c).to_string()).collect(),
      min_major: policy.min_major,
      report_major: policy.report_major,
      probe_timeout_secs: 5,
    }
  }
}

impl RuntimeConfig {
  pub fn policy(&self) -> RuntimePolicy {
    RuntimePolicy { min_major: self.min_major, report_major: self.report_major }
  }

  pub fn probe_timeout(&self) -> Duration {
    Duration::from_secs(self.probe_timeout_secs)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
  /// Node.js SSR entry script, invoked as `<runtime> <script> <component> <json>`.
  pub script: PathBuf,
  pub timeout_secs: u64,
  /// Component file extension looked up under `<app>/www/`.
  pub component_extension: String,
}

impl Default for RendererConfig {
  fn default() -> Self {
    Self {
      script: PathBuf::from("vue_ssr_renderer.js"),
      timeout_secs: 30,
      component_extension: "vue".to_string(),
    }
  }
}

impl RendererConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(self.timeout_secs)
  }
}

/// Everything `VueRenderer` needs besides the host and the session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SsrConfig {
  pub runtime: RuntimeConfig,
  pub renderer: RendererConfig,
}
