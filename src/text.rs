//! Small text and markdown helpers shared by the answer-producing nodes.

/// Truncates to at most `max_chars`, cutting on a word boundary and
/// appending an ellipsis when anything was dropped.
pub fn truncate(text: &str, max_chars: usize) -> String {
  if text.chars().count() <= max_chars {
    return text.to_string();
  }
  let cut: String = text.chars().take(max_chars).collect();
  let trimmed = match cut.rfind(' ') {
    Some(ix) => &cut[..ix],
    None => cut.as_str(),
  };
  format!("{trimmed}…")
}

pub fn bold(text: &str) -> String {
  format!("**{text}**")
}

pub fn italic(text: &str) -> String {
  format!("*{text}*")
}

pub fn link(title: &str, url: &str) -> String {
  format!("[{title}]({url})")
}
