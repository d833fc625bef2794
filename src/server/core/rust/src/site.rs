/* src/server/core/rust/src/site.rs */

//! Host collaborator interface: installed applications, error log, and the
//! per-request values the host injects.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// What the renderer needs from the hosting site.
pub trait Site: Send + Sync {
  /// Installed application names, in installation order (oldest first).
  fn installed_apps(&self) -> Vec<String>;

  /// Root directory of an installed application's package.
  fn app_path(&self, app: &str) -> Option<PathBuf>;

  /// Operator-facing error log. Hosts with a persistent log override this.
  fn log_error(&self, title: &str, message: &str) {
    tracing::error!(title, "{message}");
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstalledApp {
  pub name: String,
  pub path: PathBuf,
}

impl InstalledApp {
  pub fn new(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
    Self { name: name.into(), path: path.into() }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLogEntry {
  pub title: String,
  pub message: String,
}

/// Entries kept by `StaticSite` before the oldest are dropped.
pub const ERROR_LOG_CAPACITY: usize = 256;

/// A `Site` over a fixed list of applications. The most recent error-log
/// entries are kept in memory in addition to the tracing event.
#[derive(Debug)]
pub struct StaticSite {
  apps: Vec<InstalledApp>,
  error_log: Mutex<VecDeque<ErrorLogEntry>>,
  error_log_capacity: usize,
}

impl Default for StaticSite {
  fn default() -> Self {
    Self::new(Vec::new())
  }
}

impl StaticSite {
  pub fn new(apps: Vec<InstalledApp>) -> Self {
    Self { apps, error_log: Mutex::new(VecDeque::new()), error_log_capacity: ERROR_LOG_CAPACITY }
  }

  pub fn app(mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
    self.apps.push(InstalledApp::new(name, path));
    self
  }

  pub fn with_error_log_capacity(mut self, capacity: usize) -> Self {
    self.error_log_capacity = capacity;
    self
  }

  pub fn apps(&self) -> &[InstalledApp] {
    &self.apps
  }

  /// Retained entries, oldest first.
  pub fn error_log(&self) -> Vec<ErrorLogEntry> {
    self.error_log.lock().unwrap_or_else(PoisonError::into_inner).iter().cloned().collect()
  }
}

impl Site for StaticSite {
  fn installed_apps(&self) -> Vec<String> {
    self.apps.iter().map(|a| a.name.clone()).collect()
  }

  fn app_path(&self, app: &str) -> Option<PathBuf> {
    self.apps.iter().find(|a| a.name == app).map(|a| a.path.clone())
  }

  fn log_error(&self, title: &str, message: &str) {
    tracing::error!(title, "{message}");
    if self.error_log_capacity == 0 {
      return;
    }
    let mut log = self.error_log.lock().unwrap_or_else(PoisonError::into_inner);
    while log.len() >= self.error_log_capacity {
      log.pop_front();
    }
    log.push_back(ErrorLogEntry { title: title.to_string(), message: message.to_string() });
  }
}

/// Per-request values injected by the host instead of global session lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
  pub user: String,
  pub site_name: String,
  pub developer_mode: bool,
}

impl Default for SessionContext {
  fn default() -> Self {
    Self { user: "Guest".to_string(), site_name: "localhost".to_string(), developer_mode: false }
  }
}

/// Values the renderer writes for downstream template use.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
  pub title: String,
  pub path: String,
  pub vue_file: String,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn static_site_preserves_install_order() {
    let site =
      StaticSite::default().app("frappe", "/apps/frappe/frappe").app("wiki", "/apps/wiki/wiki");
    assert_eq!(site.installed_apps(), vec!["frappe", "wiki"]);
    assert_eq!(site.app_path("wiki"), Some(PathBuf::from("/apps/wiki/wiki")));
    assert_eq!(site.app_path("erpnext"), None);
  }

  #[test]
  fn static_site_records_error_log() {
    let site = StaticSite::default();
    site.log_error("Vue Renderer", "boom");
    assert_eq!(
      site.error_log(),
      vec![ErrorLogEntry { title: "Vue Renderer".to_string(), message: "boom".to_string() }]
    );
  }

  #[test]
  fn error_log_keeps_most_recent_entries() {
    let site = StaticSite::default().with_error_log_capacity(3);
    for i in 0..10 {
      site.log_error("Vue Renderer", &format!("failure {i}"));
    }
    let messages: Vec<_> = site.error_log().into_iter().map(|e| e.message).collect();
    assert_eq!(messages, vec!["failure 7", "failure 8", "failure 9"]);
  }

  #[test]
  fn error_log_default_capacity_holds() {
    let site = StaticSite::default();
    for _ in 0..ERROR_LOG_CAPACITY + 50 {
      site.log_error("Vue Renderer", "boom");
    }
    assert_eq!(site.error_log().len(), ERROR_LOG_CAPACITY);
  }

  #[test]
  fn session_defaults() {
    let session = SessionContext::default();
    assert_eq!(session.user, "Guest");
    assert_eq!(session.site_name, "localhost");
    assert!(!session.developer_mode);
  }
}
