//! Text entered through a single-line-friendly input box.
//!
//! Paragraph breaks are `\r` and forced line breaks are `\n` in the host's
//! text model. Since a forced line break is invisible while editing, it is
//! shown as the marker [`SOFT_BREAK_MARKER`] and turned back on submit.
use std::sync::LazyLock;

use regex::Regex;

use crate::numbering::pattern::never_matching_regex;

/// Visible stand-in for a forced line break.
pub const SOFT_BREAK_MARKER: &str = "@#";

static PARAGRAPH_RUN_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\r{2,}").unwrap_or_else(|e| {
    log::error!(
      "Failed to compile PARAGRAPH_RUN_RE regex: {e}\n Falling back to never \
       matching regex."
    );
    never_matching_regex()
  })
});

static ESCAPED_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"\\[nr]").unwrap_or_else(|e| {
    log::error!(
      "Failed to compile ESCAPED_BREAK_RE regex: {e}\n Falling back to never \
       matching regex."
    );
    never_matching_regex()
  })
});

/// Prepare existing text for editing: forced line breaks become markers.
#[must_use]
pub fn encode_soft_breaks(text: &str) -> String {
  text.replace('\n', SOFT_BREAK_MARKER)
}

/// Turn edited text into host text.
///
/// Literal `\n`/`\r` escapes become real breaks, every break becomes a
/// paragraph break, runs of paragraph breaks collapse into one, and markers
/// become forced line breaks.
#[must_use]
pub fn decode_input(text: &str) -> String {
  let unescaped = text.replace(r"\n", "\n").replace(r"\r", "\r");
  let paragraphs = unescaped.replace("\r\n", "\r").replace('\n', "\r");
  PARAGRAPH_RUN_RE
    .replace_all(&paragraphs, "\r")
    .replace(SOFT_BREAK_MARKER, "\n")
}

/// Remove every break: escapes, real breaks and markers.
#[must_use]
pub fn clear_breaks(text: &str) -> String {
  ESCAPED_BREAK_RE
    .replace_all(text, "")
    .replace(['\n', '\r'], "")
    .replace(SOFT_BREAK_MARKER, "")
}

/// Append a marker at the end of `text`.
#[must_use]
pub fn append_soft_break(text: &str) -> String {
  format!("{text}{SOFT_BREAK_MARKER}")
}
