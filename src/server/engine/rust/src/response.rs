/* src/server/engine/rust/src/response.rs */

//! Stdout contract of the external SSR renderer script.

use serde::{Deserialize, Serialize};

/// One JSON object printed by the renderer script on stdout.
///
/// Only `success` is required. `html` may carry partial markup on failure,
/// `error` is only meaningful when `success` is false.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderResponse {
  pub success: bool,
  #[serde(default)]
  pub html: String,
  #[serde(default)]
  pub styles: String,
  #[serde(default)]
  pub client_bundle_url: String,
  #[serde(default)]
  pub server_data_script: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl RenderResponse {
  pub fn parse(stdout: &str) -> Result<Self, serde_json::Error> {
    serde_json::from_str(stdout)
  }

  /// Error text reported by the renderer, or a generic placeholder.
  pub fn error_message(&self) -> &str {
    self.error.as_deref().filter(|e| !e.is_empty()).unwrap_or("Unknown error")
  }
}
