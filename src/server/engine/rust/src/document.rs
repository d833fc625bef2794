/* src/server/engine/rust/src/document.rs */

//! Full-document assembly for rendered pages and the fallback error page.

use serde_json::json;
use vuessr_injector::{escape_html, inject};

use crate::response::RenderResponse;

const DOCUMENT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title><!--ssr:title--></title>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <style>
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
      margin: 0;
      padding: 20px;
      line-height: 1.6;
    }
    .vue-ssr-rendered {
      color: #2c3e50;
    }
    .server-rendered {
      background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
      color: white;
      padding: 12px 20px;
      border-radius: 8px;
      margin-bottom: 20px;
      box-shadow: 0 2px 10px rgba(0,0,0,0.1);
    }

    /* Component styles */
    <!--ssr:styles:html-->
  </style>
</head>
<body>
  <!--ssr:banner:html-->
  <div id="app" class="vue-ssr-rendered"><!--ssr:markup:html--></div>

  <script>
    <!--ssr:server_data_script:html-->
  </script>

  <!--ssr:client_script:html-->
  <!--ssr:hydration_log:html-->
</body>
</html>
"#;

const FALLBACK_TEMPLATE: &str = r#"<!DOCTYPE html>
<html>
<head>
  <title>Vue SSR Error</title>
  <meta charset="utf-8">
  <style>
    body { font-family: Arial, sans-serif; margin: 40px; }
    .error {
      background: #fee;
      border: 1px solid #f88;
      padding: 20px;
      border-radius: 4px;
      color: #c33;
    }
    .error pre { white-space: pre-wrap; margin: 0; }
    .fallback {
      background: #fff3cd;
      border: 1px solid #ffeaa7;
      padding: 15px;
      border-radius: 4px;
      margin-top: 20px;
    }
  </style>
</head>
<body>
  <div class="error">
    <!--ssr:body:html-->
  </div>
  <div class="fallback">
    <p><strong>Note:</strong> This is a fallback view. The Vue component could not be server-rendered.</p>
    <p>Vue file: <code><!--ssr:component--></code></p>
  </div>
</body>
</html>
"#;

/// Page-level values that come from the host rather than the SSR runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageMeta {
  pub title: String,
  /// Human-readable render time, shown in the developer banner.
  pub generated_at: String,
  pub developer_mode: bool,
}

/// Client bundle reference reported by the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientScript {
  None,
  /// Path served by the host, e.g. `/assets/<app>/ssr/client.js`.
  Local(String),
  /// Absolute URL, used verbatim.
  External(String),
}

impl ClientScript {
  pub fn from_url(url: &str) -> Self {
    if url.is_empty() {
      Self::None
    } else if url.starts_with('/') {
      Self::Local(url.to_string())
    } else {
      Self::External(url.to_string())
    }
  }

  pub fn tag(&self) -> String {
    match self {
      Self::None => "<!-- No client bundle available -->".to_string(),
      Self::Local(url) | Self::External(url) => {
        format!(r#"<script src="{}"></script>"#, escape_html(url))
      }
    }
  }
}

/// Content of the fallback page's error panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackBody {
  /// Partial markup produced by the SSR runtime before it failed. Trusted, not escaped.
  Markup(String),
  /// Operator-facing error text. Always escaped.
  Message(String),
}

fn dev_banner(meta: &PageMeta) -> String {
  format!(
    concat!(
      r#"<div class="server-rendered"><small>Server-side rendered with Vue SSR "#,
      r#"<span style="opacity: 0.8;">({})</span></small></div>"#
    ),
    escape_html(&meta.generated_at)
  )
}

/// Assemble the complete document for a successful render.
///
/// `markup`, `styles` and `server_data_script` come from the SSR runtime and are
/// inserted verbatim; everything else is escaped.
pub fn render_document(
  meta: &PageMeta,
  response: &RenderResponse,
  client_script: &ClientScript,
) -> String {
  let (banner, hydration_log) = if meta.developer_mode {
    (dev_banner(meta), "<script>console.log('Vue app hydrated');</script>".to_string())
  } else {
    (String::new(), String::new())
  };
  let data = json!({
    "title": meta.title,
    "styles": response.styles,
    "banner": banner,
    "markup": response.html,
    "server_data_script": response.server_data_script,
    "client_script": client_script.tag(),
    "hydration_log": hydration_log,
  });
  inject(DOCUMENT_TEMPLATE, &data)
}

/// Assemble the static error page. Contains no script tags.
pub fn render_fallback(body: &FallbackBody, component_path: &str) -> String {
  let body_html = match body {
    FallbackBody::Markup(markup) => markup.clone(),
    FallbackBody::Message(message) => format!("<pre>{}</pre>", escape_html(message)),
  };
  inject(FALLBACK_TEMPLATE, &json!({ "body": body_html, "component": component_path }))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn meta(developer_mode: bool) -> PageMeta {
    PageMeta {
      title: "Vue SSR: about".to_string(),
      generated_at: "2024-05-01 10:00:00.000000".to_string(),
      developer_mode,
    }
  }

  fn ok_response() -> RenderResponse {
    RenderResponse {
      success: true,
      html: "<p>hi</p>".to_string(),
      styles: ".card{color:red}".to_string(),
      client_bundle_url: "/assets/app/ssr/b.js".to_string(),
      server_data_script: "window.__SERVER_DATA__ = {\"user\":\"Guest\"};".to_string(),
      error: None,
    }
  }

  #[test]
  fn document_mounts_markup_and_bundle() {
    let resp = ok_response();
    let client = ClientScript::from_url(&resp.client_bundle_url);
    let html = render_document(&meta(false), &resp, &client);
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains(r#"<div id="app" class="vue-ssr-rendered"><p>hi</p></div>"#));
    assert!(html.contains(r#"<script src="/assets/app/ssr/b.js"></script>"#));
    assert!(html.contains(".card{color:red}"));
    assert!(html.contains("window.__SERVER_DATA__ = {\"user\":\"Guest\"};"));
    assert!(html.contains("<title>Vue SSR: about</title>"));
  }

  #[test]
  fn document_escapes_title() {
    let mut m = meta(false);
    m.title = "<script>x</script>".to_string();
    let html = render_document(&m, &ok_response(), &ClientScript::None);
    assert!(html.contains("<title>&lt;script&gt;x&lt;/script&gt;</title>"));
  }

  #[test]
  fn document_without_bundle_has_comment() {
    let html = render_document(&meta(false), &ok_response(), &ClientScript::from_url(""));
    assert!(html.contains("<!-- No client bundle available -->"));
    assert!(!html.contains("<script src="));
  }

  #[test]
  fn developer_mode_adds_banner() {
    let html = render_document(&meta(true), &ok_response(), &ClientScript::None);
    assert!(html.contains("server-rendered"));
    assert!(html.contains("(2024-05-01 10:00:00.000000)"));
    let html = render_document(&meta(false), &ok_response(), &ClientScript::None);
    assert!(!html.contains(r#"<div class="server-rendered">"#));
    assert!(!html.contains("console.log"));
  }

  #[test]
  fn client_script_classification() {
    assert_eq!(ClientScript::from_url(""), ClientScript::None);
    assert_eq!(
      ClientScript::from_url("/assets/app/ssr/c.js"),
      ClientScript::Local("/assets/app/ssr/c.js".to_string())
    );
    assert_eq!(
      ClientScript::from_url("https://cdn.example.com/c.js"),
      ClientScript::External("https://cdn.example.com/c.js".to_string())
    );
  }

  #[test]
  fn external_url_escaped_in_attribute() {
    let tag = ClientScript::from_url(r#"https://cdn/x.js"onload="alert(1)"#).tag();
    assert_eq!(tag, r#"<script src="https://cdn/x.js&quot;onload=&quot;alert(1)"></script>"#);
  }

  #[test]
  fn fallback_escapes_message_and_has_no_scripts() {
    let html = render_fallback(
      &FallbackBody::Message("Vue SSR Error: <boom>".to_string()),
      "/apps/app/www/about.vue",
    );
    assert!(html.contains("Vue SSR Error: &lt;boom&gt;"));
    assert!(html.contains("<code>/apps/app/www/about.vue</code>"));
    assert!(html.contains("<title>Vue SSR Error</title>"));
    assert!(!html.contains("<script"));
    assert!(!html.contains(r#"id="app""#));
  }

  #[test]
  fn fallback_keeps_partial_markup() {
    let html = render_fallback(&FallbackBody::Markup("<h1>partial</h1>".to_string()), "/x.vue");
    assert!(html.contains("<h1>partial</h1>"));
  }
}
