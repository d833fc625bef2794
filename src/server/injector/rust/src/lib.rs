/* src/server/injector/rust/src/lib.rs */

mod helpers;
mod render;
mod token;

pub use helpers::escape_html;

use std::borrow::Cow;

use serde_json::Value;

/// Fill `<!--ssr:key-->` (escaped text) and `<!--ssr:key:html-->` (raw markup)
/// slots in `template` from `data`. Missing keys render as empty strings.
pub fn inject(template: &str, data: &Value) -> String {
  // Stray null bytes never appear in valid HTML; strip them so malformed
  // runtime output cannot smuggle partial markers through.
  let clean: Cow<'_, str> = if template.contains('\0') {
    Cow::Owned(template.replace('\0', ""))
  } else {
    Cow::Borrowed(template)
  };
  let tokens = token::tokenize(&clean);
  render::render(&tokens, data)
}
