/* src/server/injector/rust/src/render.rs */

use serde_json::Value;

use crate::helpers::{escape_html, resolve, stringify};
use crate::token::{SlotMode, Token};

pub(crate) fn render(tokens: &[Token], data: &Value) -> String {
  let mut out = String::new();

  for token in tokens {
    match token {
      Token::Text(value) => out.push_str(value),
      Token::Slot { path, mode } => {
        let value = stringify(resolve(path, data).unwrap_or(&Value::Null));
        match mode {
          SlotMode::Html => out.push_str(&value),
          SlotMode::Text => out.push_str(&escape_html(&value)),
        }
      }
    }
  }

  out
}
