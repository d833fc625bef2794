/* src/server/adapter/axum/src/handler/mod.rs */

mod legacy;
mod page;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;
use vuessr_server::{SessionContext, Site, SsrConfig};

use crate::LegacyRoute;

pub(crate) struct AppState {
  pub site: Arc<dyn Site>,
  pub config: Arc<SsrConfig>,
  pub session: SessionContext,
  pub legacy: Option<LegacyRoute>,
}

pub(crate) fn build_router(state: AppState) -> Router {
  let mut router = Router::new();

  // Client bundles are referenced as /assets/<app>/ssr/<file>.
  for app in state.site.installed_apps() {
    // Route syntax characters would make the nested path panic.
    if app.is_empty() || app.contains(['{', '}', '*', '/']) {
      tracing::warn!(app, "app name is not a valid path segment, assets not served");
      continue;
    }
    let Some(app_path) = state.site.app_path(&app) else {
      continue;
    };
    let public = ServeDir::new(app_path.join("public"));
    router = router.nest_service(&format!("/assets/{app}"), public);
  }

  if let Some(route) = &state.legacy {
    router = router.route(&route.route, get(legacy::handle_legacy));
  }

  // Every other path is a candidate page.
  router.fallback(page::handle_page).with_state(Arc::new(state))
}
