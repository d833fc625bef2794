/* src/server/adapter/axum/src/lib.rs */

mod error;
mod handler;

use std::path::PathBuf;
use std::sync::Arc;

use vuessr_server::{SessionContext, Site, SsrConfig};

/// Re-export vuessr-server core for convenience
pub use vuessr_server;

/// Request header that overrides the session user for a single request.
pub const USER_HEADER: &str = "x-vuessr-user";

/// Route that serves a legacy build script's stdout as the page.
#[derive(Debug, Clone)]
pub struct LegacyRoute {
  pub route: String,
  pub command: String,
  pub cwd: PathBuf,
}

/// Everything the router needs: the host site, renderer configuration and
/// the session defaults applied to every request.
pub struct SsrApp {
  site: Arc<dyn Site>,
  config: Arc<SsrConfig>,
  session: SessionContext,
  legacy: Option<LegacyRoute>,
}

impl SsrApp {
  pub fn new(site: Arc<dyn Site>, config: SsrConfig) -> Self {
    Self { site, config: Arc::new(config), session: SessionContext::default(), legacy: None }
  }

  pub fn session(mut self, session: SessionContext) -> Self {
    self.session = session;
    self
  }

  pub fn legacy(mut self, legacy: LegacyRoute) -> Self {
    self.legacy = Some(legacy);
    self
  }
}

/// Extension trait that converts an `SsrApp` into an Axum router.
pub trait IntoAxumRouter {
  fn into_axum_router(self) -> axum::Router;
  fn serve(
    self,
    addr: &str,
  ) -> impl std::future::Future<Output = Result<(), Box<dyn std::error::Error>>> + Send;
}

impl IntoAxumRouter for SsrApp {
  fn into_axum_router(self) -> axum::Router {
    handler::build_router(handler::AppState {
      site: self.site,
      config: self.config,
      session: self.session,
      legacy: self.legacy,
    })
  }

  async fn serve(self, addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let router = self.into_axum_router();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!("vuessr listening on http://localhost:{}", local_addr.port());
    axum::serve(listener, router).await?;
    Ok(())
  }
}
