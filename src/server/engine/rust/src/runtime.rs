/* src/server/engine/rust/src/runtime.rs */

//! Runtime version parsing and selection.
//! Pure functions over probe results; spawning the probes lives in the server crate.

use std::cmp::Ordering;
use std::fmt;

/// A parsed `--version` string such as `v22.11.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeVersion {
  pub major: u32,
  pub minor: u32,
  pub patch: u32,
  /// Trimmed version text as printed by the runtime.
  pub raw: String,
}

impl RuntimeVersion {
  fn cmp_numeric(&self, other: &Self) -> Ordering {
    (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
  }
}

impl fmt::Display for RuntimeVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.raw)
  }
}

fn leading_number(part: &str) -> Option<u32> {
  let end = part.find(|c: char| !c.is_ascii_digit()).unwrap_or(part.len());
  part[..end].parse().ok()
}

/// Parse `v<major>[.<minor>[.<patch>]]`. The `v` prefix and a numeric major are
/// mandatory; anything unreadable after the major counts as zero.
pub fn parse_version(text: &str) -> Option<RuntimeVersion> {
  let raw = text.trim();
  let rest = raw.strip_prefix('v')?;
  let mut parts = rest.split('.');
  let major = parts.next()?.parse::<u32>().ok()?;
  let minor = parts.next().and_then(leading_number).unwrap_or(0);
  let patch = parts.next().and_then(leading_number).unwrap_or(0);
  Some(RuntimeVersion { major, minor, patch, raw: raw.to_string() })
}

/// Outcome of running `<command> --version` once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Probe {
  pub command: String,
  /// Trimmed stdout of a successful probe; `None` when the executable was
  /// missing, exited non-zero, or timed out.
  pub output: Option<String>,
}

impl Probe {
  pub fn found(command: impl Into<String>, output: impl Into<String>) -> Self {
    Self { command: command.into(), output: Some(output.into()) }
  }

  pub fn missing(command: impl Into<String>) -> Self {
    Self { command: command.into(), output: None }
  }
}

/// Version thresholds for runtime selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimePolicy {
  /// Candidates at or above this major version are usable.
  pub min_major: u32,
  /// Candidates in `report_major..min_major` are listed in the failure message.
  pub report_major: u32,
}

impl Default for RuntimePolicy {
  fn default() -> Self {
    Self { min_major: 22, report_major: 18 }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRuntime {
  pub command: String,
  pub version: RuntimeVersion,
}

/// No candidate met the minimum major version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionError {
  pub required_major: u32,
  /// Usable-but-too-old candidates, in probe order.
  pub near_misses: Vec<SelectedRuntime>,
}

impl SelectionError {
  pub fn title(&self) -> String {
    format!("Node.js v{}+ Required", self.required_major)
  }

  pub fn found_versions(&self) -> Vec<&str> {
    self.near_misses.iter().map(|c| c.version.raw.as_str()).collect()
  }
}

impl fmt::Display for SelectionError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let major = self.required_major;
    writeln!(f, "Node.js v{major} or higher is required for Vue SSR.")?;
    if !self.near_misses.is_empty() {
      writeln!(f, "Found Node.js versions: {}", self.found_versions().join(", "))?;
    }
    writeln!(f)?;
    writeln!(f, "Installation options:")?;
    writeln!(f, "- Using Homebrew: brew install node@{major}")?;
    writeln!(f, "- Using Node Version Manager: nvm install {major} && nvm use {major}")?;
    writeln!(f, "- Download from: https://nodejs.org/")?;
    writeln!(f)?;
    write!(f, "After installation, you may need to restart the server.")
  }
}

impl std::error::Error for SelectionError {}

/// Pick the highest qualifying version. Ties keep the earlier probe, so the
/// candidate list order only matters between identical versions.
pub fn select_runtime(
  probes: &[Probe],
  policy: &RuntimePolicy,
) -> Result<SelectedRuntime, SelectionError> {
  let mut best: Option<SelectedRuntime> = None;
  let mut near_misses = Vec::new();

  for probe in probes {
    let Some(version) = probe.output.as_deref().and_then(parse_version) else {
      continue;
    };
    let candidate = SelectedRuntime { command: probe.command.clone(), version };
    if candidate.version.major >= policy.min_major {
      let better = match &best {
        Some(current) => candidate.version.cmp_numeric(&current.version) == Ordering::Greater,
        None => true,
      };
      if better {
        best = Some(candidate);
      }
    } else if candidate.version.major >= policy.report_major {
      near_misses.push(candidate);
    }
  }

  best.ok_or(SelectionError { required_major: policy.min_major, near_misses })
}
