/* src/server/core/rust/src/locator.rs */

use std::path::{Path, PathBuf};

use tracing::info;

use crate::site::Site;

/// A component file resolved for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentLocator {
  pub app: String,
  pub app_path: PathBuf,
  /// Absolute path of the component file.
  pub file_path: PathBuf,
  /// Path relative to `app_path`, e.g. `www/docs/intro.vue`.
  pub relative_path: PathBuf,
  /// Directory containing the component.
  pub base_path: PathBuf,
  pub filename: String,
  /// File stem, used for the page title.
  pub name: String,
  pub content: String,
}

impl ComponentLocator {
  pub fn title(&self) -> String {
    format!("Vue SSR: {}", self.name)
  }
}

/// Map a request path onto a relative component path.
/// Leading and trailing slashes are ignored and the root maps to `index`.
/// Returns `None` for anything that could escape the `www` directory.
pub fn normalize_request_path(path: &str) -> Option<String> {
  let trimmed = path.trim_matches('/');
  if trimmed.is_empty() {
    return Some("index".to_string());
  }
  if trimmed.contains('\\') || trimmed.contains('\0') {
    return None;
  }
  if trimmed.split('/').any(|seg| seg.is_empty() || seg == "." || seg == "..") {
    return None;
  }
  Some(trimmed.to_string())
}

fn component_file(app_path: &Path, rel: &str, extension: &str) -> PathBuf {
  app_path.join("www").join(format!("{rel}.{extension}"))
}

/// Find the component for `path`, most recently installed application first.
pub fn locate_component(
  site: &dyn Site,
  path: &str,
  extension: &str,
) -> std::io::Result<Option<ComponentLocator>> {
  let Some(rel) = normalize_request_path(path) else {
    return Ok(None);
  };

  for app in site.installed_apps().into_iter().rev() {
    let Some(app_path) = site.app_path(&app) else {
      continue;
    };
    // The renderer runs in another cwd; hand it absolute paths only.
    let app_path = std::path::absolute(&app_path)?;
    let file_path = component_file(&app_path, &rel, extension);
    if !file_path.is_file() {
      continue;
    }

    info!(file = %file_path.display(), app = %app, "found Vue file");
    // The runtime reads the file itself; keep a lossy copy for the host.
    let content = String::from_utf8_lossy(&std::fs::read(&file_path)?).into_owned();
    let relative_path =
      file_path.strip_prefix(&app_path).map(Path::to_path_buf).unwrap_or_default();
    let base_path = file_path.parent().map(Path::to_path_buf).unwrap_or_default();
    let filename =
      file_path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    let name =
      file_path.file_stem().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();

    return Ok(Some(ComponentLocator {
      app,
      app_path,
      file_path,
      relative_path,
      base_path,
      filename,
      name,
      content,
    }));
  }

  Ok(None)
}
