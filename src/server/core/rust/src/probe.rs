/* src/server/core/rust/src/probe.rs */

use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, error, info};
use vuessr_engine::{Probe, SelectedRuntime, select_runtime};

use crate::config::RuntimeConfig;
use crate::errors::RendererError;
use crate::process::run_with_timeout;

/// Run `<command> --version` once. Missing executables, non-zero exits and
/// timeouts all yield `Probe::missing`.
pub async fn probe_candidate(command: &str, timeout: Duration) -> Probe {
  let mut cmd = Command::new(command);
  cmd.arg("--version");
  match run_with_timeout(cmd, timeout).await {
    Ok(out) if out.status.success() => {
      let version = out.stdout.trim().to_string();
      debug!(command, version = %version, "found runtime");
      Probe::found(command, version)
    }
    Ok(out) => {
      debug!(command, status = %out.status, "runtime probe exited unsuccessfully");
      Probe::missing(command)
    }
    Err(e) => {
      debug!(command, error = %e, "runtime probe skipped");
      Probe::missing(command)
    }
  }
}

/// Probe every configured candidate in order.
pub async fn probe_candidates(config: &RuntimeConfig) -> Vec<Probe> {
  let timeout = config.probe_timeout();
  let mut probes = Vec::with_capacity(config.candidates.len());
  for candidate in &config.candidates {
    probes.push(probe_candidate(candidate, timeout).await);
  }
  probes
}

/// Probe and select. A missing runtime is fatal for the request.
pub async fn find_runtime(config: &RuntimeConfig) -> Result<SelectedRuntime, RendererError> {
  let probes = probe_candidates(config).await;
  match select_runtime(&probes, &config.policy()) {
    Ok(selected) => {
      info!(
        command = %selected.command,
        version = %selected.version,
        "selected Node.js runtime for Vue SSR"
      );
      Ok(selected)
    }
    Err(e) => {
      if e.near_misses.is_empty() {
        error!("no Node.js installation found on system");
      } else {
        error!(
          available = %e.found_versions().join(", "),
          "no compatible Node.js v{}+ found",
          e.required_major
        );
      }
      Err(RendererError::runtime_missing(e.to_string()).with_title(e.title()))
    }
  }
}

#[cfg(all(test, unix))]
mod tests {
  use std::os::unix::fs::PermissionsExt;
  use std::path::Path;

  use super::*;

  fn fake_node(dir: &Path, name: &str, body: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path.to_string_lossy().into_owned()
  }

  fn config(candidates: Vec<String>) -> RuntimeConfig {
    RuntimeConfig { candidates, probe_timeout_secs: 2, ..RuntimeConfig::default() }
  }

  #[tokio::test]
  async fn probe_reads_trimmed_version() {
    let dir = tempfile::tempdir().unwrap();
    let node = fake_node(dir.path(), "node", "echo v22.3.0");
    let probe = probe_candidate(&node, Duration::from_secs(2)).await;
    assert_eq!(probe.output.as_deref(), Some("v22.3.0"));
  }

  #[tokio::test]
  async fn probe_failing_executable_is_missing() {
    let dir = tempfile::tempdir().unwrap();
    let node = fake_node(dir.path(), "node", "echo v23.0.0; exit 1");
    assert_eq!(probe_candidate(&node, Duration::from_secs(2)).await.output, None);
  }

  #[tokio::test]
  async fn probe_nonexistent_executable_is_missing() {
    let probe = probe_candidate("/nonexistent/node22", Duration::from_secs(2)).await;
    assert_eq!(probe, Probe::missing("/nonexistent/node22"));
  }

  #[tokio::test]
  async fn find_runtime_prefers_highest() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = vec![
      "/nonexistent/node22".to_string(),
      fake_node(dir.path(), "node18", "echo v18.19.0"),
      fake_node(dir.path(), "node23", "echo v23.1.0"),
      fake_node(dir.path(), "node22", "echo v22.1"),
    ];
    let selected = find_runtime(&config(candidates)).await.unwrap();
    assert!(selected.command.ends_with("node23"));
  }

  #[tokio::test]
  async fn find_runtime_reports_old_versions() {
    let dir = tempfile::tempdir().unwrap();
    let candidates = vec![fake_node(dir.path(), "node", "echo v18.20.0")];
    let err = find_runtime(&config(candidates)).await.unwrap_err();
    assert_eq!(err.code(), "RUNTIME_MISSING");
    assert_eq!(err.title(), "Node.js v22+ Required");
    assert!(err.message().contains("v18.20.0"));
  }
}
