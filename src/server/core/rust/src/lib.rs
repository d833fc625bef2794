/* src/server/core/rust/src/lib.rs */

pub mod config;
pub mod errors;
pub mod invoke;
pub mod legacy;
pub mod locator;
pub mod payload;
pub mod probe;
mod process;
pub mod renderer;
pub mod site;

// Re-exports for ergonomic use
pub use config::{DEFAULT_RUNTIME_CANDIDATES, RendererConfig, RuntimeConfig, SsrConfig};
pub use errors::RendererError;
pub use invoke::{SsrFailure, SsrInvocation, SsrOutcome, invoke_ssr};
pub use locator::{ComponentLocator, locate_component, normalize_request_path};
pub use payload::ServerData;
pub use probe::{find_runtime, probe_candidate, probe_candidates};
pub use renderer::{PageRenderer, PageResponse, VueRenderer};
pub use site::{
  ERROR_LOG_CAPACITY, ErrorLogEntry, InstalledApp, PageContext, SessionContext, Site, StaticSite,
};
pub use vuessr_engine;
