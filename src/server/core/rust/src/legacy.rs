/* src/server/core/rust/src/legacy.rs */

//! Legacy page entry point: run a build script and serve its stdout as the page.
//!
//! Kept apart from `VueRenderer` on purpose: no component lookup, no context
//! payload, no fallback document. Failures propagate to the caller.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::debug;

use crate::errors::RendererError;
use crate::renderer::PageResponse;

pub const DEFAULT_BUILD_COMMAND: &str = "node build.js";

/// Run `command` through `sh -c` in `cwd` and return its stdout.
pub async fn get_html_from_build_script(
  command: &str,
  cwd: &Path,
) -> Result<String, RendererError> {
  debug!(command, cwd = %cwd.display(), "running legacy build script");
  let mut cmd = Command::new("sh");
  cmd.args(["-c", command]);
  cmd.current_dir(cwd);
  cmd.stdin(Stdio::null());
  cmd.kill_on_drop(true);

  let output = cmd
    .output()
    .await
    .map_err(|e| RendererError::build_script(format!("failed to run {command}: {e}")))?;
  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let mut msg = format!("{command} exited with status {}", output.status);
    if !stderr.is_empty() {
      msg.push('\n');
      msg.push_str(&stderr);
    }
    return Err(RendererError::build_script(msg));
  }
  Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Assign the build script's HTML as the response body.
pub async fn get_context(
  command: &str,
  cwd: &Path,
  response: &mut PageResponse,
) -> Result<(), RendererError> {
  response.body = get_html_from_build_script(command, cwd).await?;
  Ok(())
}

#[cfg(all(test, unix))]
mod tests {
  use super::*;
  use crate::site::PageContext;

  #[tokio::test]
  async fn stdout_becomes_body() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("build.sh"), "echo '<html><body>built</body></html>'").unwrap();
    let mut response =
      PageResponse { status: 200, body: String::new(), context: PageContext::default() };
    get_context("sh build.sh", dir.path(), &mut response).await.unwrap();
    assert_eq!(response.body, "<html><body>built</body></html>\n");
  }

  #[tokio::test]
  async fn failure_propagates_with_stderr() {
    let dir = tempfile::tempdir().unwrap();
    let err = get_html_from_build_script("echo nope >&2; exit 4", dir.path()).await.unwrap_err();
    assert_eq!(err.code(), "BUILD_SCRIPT_FAILED");
    assert!(err.message().contains("nope"));
  }

  #[tokio::test]
  async fn missing_cwd_is_error() {
    let err =
      get_html_from_build_script("true", Path::new("/nonexistent/legacy/dir")).await.unwrap_err();
    assert!(err.message().starts_with("failed to run true"));
  }
}
