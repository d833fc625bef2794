/* src/server/core/rust/src/payload.rs */

use serde::Serialize;

use crate::site::SessionContext;

/// Server-side values handed to the component through the renderer script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerData {
  pub server_time: String,
  pub user: String,
  pub site_name: String,
}

/// Current local time in the `YYYY-MM-DD HH:MM:SS.ffffff` form used in pages and payloads.
pub fn now_timestamp() -> String {
  chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}

impl ServerData {
  pub fn from_session(session: &SessionContext) -> Self {
    let site_name = if session.site_name.is_empty() {
      "localhost".to_string()
    } else {
      session.site_name.clone()
    };
    Self { server_time: now_timestamp(), user: session.user.clone(), site_name }
  }

  pub fn to_json(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }
}
