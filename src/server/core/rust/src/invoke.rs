/* src/server/core/rust/src/invoke.rs */

use std::path::Path;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, error};
use vuessr_engine::{FallbackBody, RenderResponse};

use crate::process::{RunError, run_with_timeout};
use crate::site::Site;

const LOG_TITLE: &str = "Vue Renderer";

/// One SSR subprocess call: `<runtime> <script> <component> <context_json>` in `cwd`.
#[derive(Debug, Clone, Copy)]
pub struct SsrInvocation<'a> {
  pub runtime: &'a str,
  pub script: &'a Path,
  pub component: &'a Path,
  pub context_json: &'a str,
  pub cwd: &'a Path,
  pub timeout: Duration,
}

/// Why an SSR call produced no usable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SsrFailure {
  pub message: String,
  /// Partial markup reported by the renderer alongside `success: false`.
  pub markup: Option<String>,
}

impl SsrFailure {
  fn message(message: impl Into<String>) -> Self {
    Self { message: message.into(), markup: None }
  }

  pub fn fallback_body(&self) -> FallbackBody {
    match &self.markup {
      Some(markup) => FallbackBody::Markup(markup.clone()),
      None => FallbackBody::Message(self.message.clone()),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SsrOutcome {
  Rendered(RenderResponse),
  Failed(SsrFailure),
}

/// Run the renderer script once. Every failure mode is folded into
/// `SsrOutcome::Failed` and reported to the site's error log.
pub async fn invoke_ssr(site: &dyn Site, call: &SsrInvocation<'_>) -> SsrOutcome {
  let mut cmd = Command::new(call.runtime);
  cmd.arg(call.script).arg(call.component).arg(call.context_json);
  cmd.current_dir(call.cwd);

  debug!(cwd = %call.cwd.display(), "working directory");
  debug!(
    "Vue SSR command: {} {} {} {}",
    call.runtime,
    call.script.display(),
    call.component.display(),
    call.context_json
  );

  let output = match run_with_timeout(cmd, call.timeout).await {
    Ok(output) => output,
    Err(RunError::TimedOut(limit)) => {
      let msg = format!("Vue SSR renderer timed out after {} seconds", limit.as_secs());
      error!("{msg}");
      site.log_error(LOG_TITLE, &msg);
      return SsrOutcome::Failed(SsrFailure::message(msg));
    }
    Err(e) => {
      let msg = format!("Vue SSR Exception: {e}");
      error!("{msg}");
      site.log_error(LOG_TITLE, &msg);
      return SsrOutcome::Failed(SsrFailure::message(msg));
    }
  };

  if !output.status.success() {
    let detail = if output.stderr.trim().is_empty() {
      "Node.js renderer failed".to_string()
    } else {
      output.stderr.trim_end().to_string()
    };
    error!(status = %output.status, "Vue SSR subprocess failed: {detail}");
    site.log_error(LOG_TITLE, &format!("Vue SSR Error: {detail}"));
    return SsrOutcome::Failed(SsrFailure::message(format!("Vue SSR Error: {detail}")));
  }

  let response = match RenderResponse::parse(&output.stdout) {
    Ok(response) => response,
    Err(e) => {
      error!("Vue SSR JSON parse error: {e}");
      error!("raw stdout was: {}", output.stdout);
      site.log_error(LOG_TITLE, &format!("Vue SSR JSON Parse Error: {e}"));
      site.log_error(LOG_TITLE, &format!("Raw stdout was: {}", output.stdout));
      return SsrOutcome::Failed(SsrFailure::message(format!(
        "Invalid JSON response from Vue SSR: {e}"
      )));
    }
  };

  if !response.success {
    let reported = response.error_message().to_string();
    error!("Vue SSR renderer reported failure: {reported}");
    site.log_error(LOG_TITLE, &format!("Vue SSR renderer reported failure: {reported}"));
    let markup = Some(response.html).filter(|html| !html.trim().is_empty());
    return SsrOutcome::Failed(SsrFailure { message: reported, markup });
  }

  SsrOutcome::Rendered(response)
}
