/* src/server/adapter/axum/src/error.rs */

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use vuessr_injector::escape_html;
use vuessr_server::RendererError;

/// Newtype wrapper to implement `IntoResponse` for `RendererError`.
/// Required because Rust's orphan rule prevents `impl IntoResponse for RendererError`
/// when both types are foreign to this crate.
pub(crate) struct AxumError(pub RendererError);

impl IntoResponse for AxumError {
  fn into_response(self) -> Response {
    let err = self.0;
    let status = StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    tracing::error!(code = err.code(), status = err.status(), "{}", err.message());
    let title = escape_html(err.title());
    let body = format!(
      concat!(
        "<!DOCTYPE html>\n<html>\n<head><title>{title}</title><meta charset=\"utf-8\"></head>\n",
        "<body>\n<h1>{title}</h1>\n<pre>{message}</pre>\n</body>\n</html>\n"
      ),
      title = title,
      message = escape_html(err.message()),
    );
    (status, Html(body)).into_response()
  }
}

impl From<RendererError> for AxumError {
  fn from(err: RendererError) -> Self {
    Self(err)
  }
}
