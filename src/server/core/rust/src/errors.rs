/* src/server/core/rust/src/errors.rs */

use std::fmt;

/// Error surfaced past the renderer boundary.
///
/// Subprocess failures never become a `RendererError`; they degrade into the
/// fallback document. Only fatal conditions (no usable runtime, unreadable
/// component, broken host state) are reported through this type.
#[derive(Debug, Clone)]
pub struct RendererError {
  code: String,
  message: String,
  status: u16,
  title: String,
}

fn default_status(code: &str) -> u16 {
  match code {
    "NOT_FOUND" => 404,
    "RUNTIME_MISSING" | "BUILD_SCRIPT_FAILED" | "INTERNAL_ERROR" => 500,
    _ => 500,
  }
}

fn default_title(code: &str) -> &'static str {
  match code {
    "NOT_FOUND" => "Page Not Found",
    "RUNTIME_MISSING" => "Runtime Required",
    "BUILD_SCRIPT_FAILED" => "Build Script Failed",
    _ => "Server Error",
  }
}

impl RendererError {
  pub fn new(code: impl Into<String>, message: impl Into<String>, status: u16) -> Self {
    let code = code.into();
    let title = default_title(&code).to_string();
    Self { code, message: message.into(), status, title }
  }

  pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
    let code = code.into();
    let status = default_status(&code);
    Self::new(code, message, status)
  }

  pub fn with_title(mut self, title: impl Into<String>) -> Self {
    self.title = title.into();
    self
  }

  /// No compatible JS runtime; the message carries installation instructions.
  pub fn runtime_missing(msg: impl Into<String>) -> Self {
    Self::with_code("RUNTIME_MISSING", msg)
  }

  pub fn build_script(msg: impl Into<String>) -> Self {
    Self::with_code("BUILD_SCRIPT_FAILED", msg)
  }

  pub fn not_found(msg: impl Into<String>) -> Self {
    Self::with_code("NOT_FOUND", msg)
  }

  pub fn internal(msg: impl Into<String>) -> Self {
    Self::with_code("INTERNAL_ERROR", msg)
  }

  /// Host filesystem failure, e.g. an unreadable component file.
  pub fn io(err: &std::io::Error) -> Self {
    Self::internal(err.to_string())
  }

  pub fn code(&self) -> &str {
    &self.code
  }

  pub fn message(&self) -> &str {
    &self.message
  }

  pub fn status(&self) -> u16 {
    self.status
  }

  pub fn title(&self) -> &str {
    &self.title
  }
}

impl fmt::Display for RendererError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}: {}", self.code, self.message)
  }
}

impl std::error::Error for RendererError {}

impl From<std::io::Error> for RendererError {
  fn from(err: std::io::Error) -> Self {
    Self::io(&err)
  }
}
