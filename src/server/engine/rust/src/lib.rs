/* src/server/engine/rust/src/lib.rs */

pub mod document;
pub mod response;
pub mod runtime;

// Public API re-exports
pub use document::{ClientScript, FallbackBody, PageMeta, render_document, render_fallback};
pub use response::RenderResponse;
pub use runtime::{
  Probe, RuntimePolicy, RuntimeVersion, SelectedRuntime, SelectionError, parse_version,
  select_runtime,
};
