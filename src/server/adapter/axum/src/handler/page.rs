/* src/server/adapter/axum/src/handler/page.rs */

use std::sync::Arc;

use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use vuessr_server::{PageRenderer, RendererError, VueRenderer};

use super::AppState;
use crate::USER_HEADER;
use crate::error::AxumError;

pub(super) async fn handle_page(
  State(state): State<Arc<AppState>>,
  method: Method,
  uri: Uri,
  headers: HeaderMap,
) -> Result<Response, AxumError> {
  let path = uri.path();
  if method != Method::GET && method != Method::HEAD {
    return Err(RendererError::not_found(format!("{method} {path} is not a page")).into());
  }

  let mut session = state.session.clone();
  let user = headers.get(USER_HEADER).and_then(|v| v.to_str().ok()).filter(|u| !u.is_empty());
  if let Some(user) = user {
    session.user = user.to_string();
  }

  // Component lookup touches the filesystem; keep it off the async workers.
  let (site, config, owned_path) = (state.site.clone(), state.config.clone(), path.to_string());
  let (mut renderer, found) = tokio::task::spawn_blocking(move || {
    let renderer = VueRenderer::new(site, config, session, owned_path)?;
    let found = renderer.can_handle();
    Ok::<_, RendererError>((renderer, found))
  })
  .await
  .map_err(|e| RendererError::internal(format!("component lookup task failed: {e}")))??;
  if !found {
    return Err(RendererError::not_found(format!("No Vue component for {path}")).into());
  }

  let page = renderer.render().await?;
  let status = StatusCode::from_u16(page.status).unwrap_or(StatusCode::OK);
  Ok((status, Html(page.body)).into_response())
}
