/* src/server/injector/rust/src/token.rs */

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SlotMode {
  Text,
  Html,
}

#[derive(Debug)]
pub(crate) enum Token {
  Text(String),
  Slot { path: String, mode: SlotMode },
}

pub(crate) const MARKER_OPEN: &str = "<!--ssr:";
pub(crate) const MARKER_CLOSE: &str = "-->";

fn slot(directive: &str) -> Token {
  match directive.strip_suffix(":html") {
    Some(path) => Token::Slot { path: path.to_string(), mode: SlotMode::Html },
    None => Token::Slot { path: directive.to_string(), mode: SlotMode::Text },
  }
}

pub(crate) fn tokenize(template: &str) -> Vec<Token> {
  let mut tokens = Vec::new();
  let mut pos = 0;

  while pos < template.len() {
    let Some(rel) = template[pos..].find(MARKER_OPEN) else {
      tokens.push(Token::Text(template[pos..].to_string()));
      break;
    };
    let marker_start = pos + rel;
    if marker_start > pos {
      tokens.push(Token::Text(template[pos..marker_start].to_string()));
    }
    let after_open = marker_start + MARKER_OPEN.len();
    if let Some(close_rel) = template[after_open..].find(MARKER_CLOSE) {
      tokens.push(slot(template[after_open..after_open + close_rel].trim()));
      pos = after_open + close_rel + MARKER_CLOSE.len();
    } else {
      // Unclosed marker -- treat rest as text
      tokens.push(Token::Text(template[marker_start..].to_string()));
      break;
    }
  }

  tokens
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tokenize_empty_template() {
    assert!(tokenize("").is_empty());
  }

  #[test]
  fn tokenize_plain_html() {
    let tokens = tokenize("<p>hello</p>");
    assert_eq!(tokens.len(), 1);
    assert!(matches!(&tokens[0], Token::Text(s) if s == "<p>hello</p>"));
  }

  #[test]
  fn tokenize_text_and_html_slots() {
    let tokens = tokenize("a<!--ssr:title-->b<!--ssr:body:html-->");
    assert_eq!(tokens.len(), 4);
    assert!(matches!(&tokens[1], Token::Slot { path, mode: SlotMode::Text } if path == "title"));
    assert!(matches!(&tokens[3], Token::Slot { path, mode: SlotMode::Html } if path == "body"));
  }

  #[test]
  fn tokenize_unclosed_marker() {
    let tokens = tokenize("x<!--ssr:oops");
    assert_eq!(tokens.len(), 2);
    assert!(matches!(&tokens[1], Token::Text(s) if s == "<!--ssr:oops"));
  }
}
