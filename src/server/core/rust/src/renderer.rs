/* src/server/core/rust/src/renderer.rs */

use std::future::Future;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, info, warn};
use vuessr_engine::{
  ClientScript, FallbackBody, PageMeta, RenderResponse, render_document, render_fallback,
};

use crate::config::SsrConfig;
use crate::errors::RendererError;
use crate::invoke::{SsrInvocation, SsrOutcome, invoke_ssr};
use crate::locator::{ComponentLocator, locate_component};
use crate::payload::{ServerData, now_timestamp};
use crate::probe::find_runtime;
use crate::site::{PageContext, SessionContext, Site};

/// Rendered page handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResponse {
  pub status: u16,
  pub body: String,
  pub context: PageContext,
}

/// Host page-renderer plugin contract.
pub trait PageRenderer {
  /// Whether this renderer applies to the request it was built for.
  fn can_handle(&self) -> bool;

  fn render(&mut self) -> impl Future<Output = Result<PageResponse, RendererError>> + Send;
}

/// Renders `<app>/www/<path>.vue` through the external Node.js SSR script.
pub struct VueRenderer {
  site: Arc<dyn Site>,
  config: Arc<SsrConfig>,
  session: SessionContext,
  path: String,
  http_status: Option<u16>,
  component: Option<ComponentLocator>,
  context: PageContext,
}

impl VueRenderer {
  /// Resolve the component for `path`. Finding nothing is not an error;
  /// `can_handle` reports it.
  pub fn new(
    site: Arc<dyn Site>,
    config: Arc<SsrConfig>,
    session: SessionContext,
    path: impl Into<String>,
  ) -> Result<Self, RendererError> {
    let path = path.into();
    let component =
      locate_component(site.as_ref(), &path, &config.renderer.component_extension)?;
    Ok(Self {
      site,
      config,
      session,
      path,
      http_status: None,
      component,
      context: PageContext::default(),
    })
  }

  pub fn with_status(mut self, status: u16) -> Self {
    self.http_status = Some(status);
    self
  }

  pub fn component(&self) -> Option<&ComponentLocator> {
    self.component.as_ref()
  }

  pub fn context(&self) -> &PageContext {
    &self.context
  }

  fn update_context(&mut self) {
    if let Some(component) = &self.component {
      self.context.title = component.title();
      self.context.path = self.path.clone();
      self.context.vue_file = component.filename.clone();
    }
  }

  async fn render_html(&self, component: &ComponentLocator) -> Result<String, RendererError> {
    info!(component = %component.file_path.display(), "starting Vue SSR rendering");
    let component_path = component.file_path.display().to_string();

    // The child runs from the app's parent directory, so the script path must not be relative.
    let script = std::path::absolute(&self.config.renderer.script)?;
    if !is_file(&script).await {
      let msg = format!("Node.js Vue SSR renderer not found at {}", script.display());
      error!("{msg}");
      return Ok(render_fallback(&FallbackBody::Message(msg), &component_path));
    }

    let server_data = ServerData::from_session(&self.session);
    let runtime = find_runtime(&self.config.runtime).await?;

    let context_json = match server_data.to_json() {
      Ok(json) => json,
      Err(e) => {
        let msg = format!("Vue SSR Exception: {e}");
        self.site.log_error("Vue Renderer", &msg);
        return Ok(render_fallback(&FallbackBody::Message(msg), &component_path));
      }
    };

    // The renderer runs from the directory above the app package.
    let cwd = component
      .app_path
      .parent()
      .filter(|p| !p.as_os_str().is_empty())
      .unwrap_or(component.app_path.as_path());
    let call = SsrInvocation {
      runtime: &runtime.command,
      script: &script,
      component: &component.file_path,
      context_json: &context_json,
      cwd,
      timeout: self.config.renderer.timeout(),
    };

    match invoke_ssr(self.site.as_ref(), &call).await {
      SsrOutcome::Rendered(response) => {
        info!(component = %component_path, "Vue SSR rendering completed");
        debug!(html = %response.html, "rendered markup");
        Ok(self.build_document(component, &response).await)
      }
      SsrOutcome::Failed(failure) => {
        Ok(render_fallback(&failure.fallback_body(), &component_path))
      }
    }
  }

  async fn build_document(
    &self,
    component: &ComponentLocator,
    response: &RenderResponse,
  ) -> String {
    let client = ClientScript::from_url(&response.client_bundle_url);
    if let ClientScript::Local(url) = &client {
      self.check_static_file(component, url).await;
    }
    let meta = PageMeta {
      title: self.context.title.clone(),
      generated_at: now_timestamp(),
      developer_mode: self.session.developer_mode,
    };
    render_document(&meta, response, &client)
  }

  /// Local bundles are served from `<app>/public/ssr/` as `/assets/<app>/ssr/`.
  /// A missing file is logged; the script tag is emitted regardless.
  async fn check_static_file(&self, component: &ComponentLocator, url: &str) -> bool {
    let prefix = format!("/assets/{}/ssr/", component.app);
    let Some(rest) = url.strip_prefix(&prefix) else {
      warn!(url, "unrecognized static file URL pattern");
      return false;
    };
    let filename = rest.rsplit('/').next().unwrap_or(rest);
    let expected = component.app_path.join("public").join("ssr").join(filename);
    if is_file(&expected).await {
      debug!(path = %expected.display(), "Vue client bundle found");
      true
    } else {
      let msg = format!("Vue client bundle not found at {}", expected.display());
      error!("{msg}");
      self.site.log_error("Vue Renderer", &msg);
      false
    }
  }
}

async fn is_file(path: &Path) -> bool {
  tokio::fs::metadata(path).await.is_ok_and(|m| m.is_file())
}

impl PageRenderer for VueRenderer {
  fn can_handle(&self) -> bool {
    self.component.as_ref().is_some_and(|c| c.file_path.is_file())
  }

  async fn render(&mut self) -> Result<PageResponse, RendererError> {
    let Some(component) = self.component.clone() else {
      return Err(RendererError::not_found(format!("no Vue component for {}", self.path)));
    };
    self.update_context();
    let body = self.render_html(&component).await?;
    Ok(PageResponse {
      status: self.http_status.unwrap_or(200),
      body,
      context: self.context.clone(),
    })
  }
}
