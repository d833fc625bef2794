/* src/server/adapter/axum/src/handler/legacy.rs */

use std::sync::Arc;

use axum::extract::State;
use axum::response::Html;
use vuessr_server::legacy::get_context;
use vuessr_server::{PageContext, PageResponse, RendererError};

use super::AppState;
use crate::error::AxumError;

pub(super) async fn handle_legacy(
  State(state): State<Arc<AppState>>,
) -> Result<Html<String>, AxumError> {
  let legacy =
    state.legacy.as_ref().ok_or_else(|| RendererError::internal("legacy route not configured"))?;
  let mut response =
    PageResponse { status: 200, body: String::new(), context: PageContext::default() };
  get_context(&legacy.command, &legacy.cwd, &mut response).await?;
  Ok(Html(response.body))
}
