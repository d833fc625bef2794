/* src/cli/core/src/config/loader.rs */

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use super::VuessrConfig;

pub const CONFIG_FILE: &str = "vuessr.toml";

/// Walk upward from `start` to find `vuessr.toml`, like Cargo.toml discovery
pub fn find_vuessr_config(start: &Path) -> Result<PathBuf> {
  let mut dir =
    start.canonicalize().with_context(|| format!("failed to canonicalize {}", start.display()))?;
  loop {
    let candidate = dir.join(CONFIG_FILE);
    if candidate.is_file() {
      return Ok(candidate);
    }
    if !dir.pop() {
      bail!("{CONFIG_FILE} not found (searched upward from {})", start.display());
    }
  }
}

/// Parse and validate `path`; relative paths inside are resolved against its directory.
pub fn load_vuessr_config(path: &Path) -> Result<VuessrConfig> {
  // A bare `vuessr.toml` has an empty parent; anchor it before resolving.
  let path =
    &path.canonicalize().with_context(|| format!("failed to canonicalize {}", path.display()))?;
  let content =
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
  let mut config: VuessrConfig =
    toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))?;
  config.validate().with_context(|| format!("invalid {}", path.display()))?;
  if let Some(base_dir) = path.parent() {
    config.resolve_paths(base_dir);
  }
  Ok(config)
}
