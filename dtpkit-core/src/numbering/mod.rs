//! Numbering tokens for repeated content.
//!
//! A token is the short marker appended to the end of a paragraph, such as
//! `(3)` or ` part II`. This module renders tokens for the members of a
//! [`Group`], strips previously applied ones, and rewrites record text.
//!
//! - [`numeral`]: roman and alphabetic numerals
//! - [`pattern`]: trailing-anchored token grammars
//! - [`apply`]: token application and removal over record sequences
pub mod apply;
pub mod numeral;
pub mod pattern;

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};

pub use self::apply::{apply_numbering, remove_numbering};
use crate::types::Group;

/// Error type for numbering configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberingError {
  #[error(
    "Unsupported numbering style: '{0}'. Expected one of: decimal, \
     full-width-decimal, alpha, roman-upper, roman-lower, part-decimal, \
     part-roman, pt-decimal, dash-decimal, counter-word, none"
  )]
  UnsupportedStyle(String),
}

/// Result type for numbering operations.
pub type NumberingResult<T> = Result<T, NumberingError>;

/// Supported token styles.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub enum NumberingStyle {
  /// `(1)`
  #[default]
  Decimal,
  /// `（1）`, full-width parentheses around half-width digits
  FullWidthDecimal,
  /// `(A)` up to 26
  Alpha,
  /// `(I)` up to 10
  RomanUpper,
  /// `(i)` up to 10
  RomanLower,
  /// ` part 1`
  PartDecimal,
  /// ` part I` up to 10
  PartRoman,
  /// ` Pt. 1`
  PtDecimal,
  /// `- 1`
  DashDecimal,
  /// `その1`
  CounterWord,
  /// Never renders a token; stripping removes a token of any other style.
  StripOnly,
}

impl NumberingStyle {
  /// Every style, in the order they are presented to users.
  pub const ALL: [Self; 11] = [
    Self::Decimal,
    Self::FullWidthDecimal,
    Self::Alpha,
    Self::RomanUpper,
    Self::RomanLower,
    Self::PartDecimal,
    Self::PartRoman,
    Self::PtDecimal,
    Self::DashDecimal,
    Self::CounterWord,
    Self::StripOnly,
  ];

  /// Tag used in configuration files and on the command line.
  #[must_use]
  pub const fn tag(self) -> &'static str {
    match self {
      Self::Decimal => "decimal",
      Self::FullWidthDecimal => "full-width-decimal",
      Self::Alpha => "alpha",
      Self::RomanUpper => "roman-upper",
      Self::RomanLower => "roman-lower",
      Self::PartDecimal => "part-decimal",
      Self::PartRoman => "part-roman",
      Self::PtDecimal => "pt-decimal",
      Self::DashDecimal => "dash-decimal",
      Self::CounterWord => "counter-word",
      Self::StripOnly => "none",
    }
  }

  /// Whether this style renders tokens at all.
  #[must_use]
  pub const fn renders(self) -> bool {
    !matches!(self, Self::StripOnly)
  }
}

impl fmt::Display for NumberingStyle {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.tag())
  }
}

impl FromStr for NumberingStyle {
  type Err = NumberingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let wanted = s.trim().to_lowercase().replace('_', "-");
    Self::ALL
      .into_iter()
      .find(|style| style.tag() == wanted)
      .ok_or_else(|| NumberingError::UnsupportedStyle(s.to_string()))
  }
}

impl TryFrom<String> for NumberingStyle {
  type Error = NumberingError;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value.parse()
  }
}

impl From<NumberingStyle> for String {
  fn from(style: NumberingStyle) -> Self {
    style.tag().to_string()
  }
}

/// Render the token for the `n`th (1-based) occurrence.
///
/// Returns `None` for [`NumberingStyle::StripOnly`]. Roman numerals cover
/// 1 to 10 and letters 1 to 26; beyond that the literal decimal number takes
/// the numeral's place and the framing stays. Member 11 in roman-upper is
/// `(11)`: the fallback is the numeral `11`, not a bare trailing `11`, so the
/// token is still recognised and stripped by its own style's grammar without
/// eating digits that belong to the text.
#[must_use]
pub fn render(n: usize, style: NumberingStyle) -> Option<String> {
  let token = match style {
    NumberingStyle::Decimal => format!("({n})"),
    NumberingStyle::FullWidthDecimal => format!("（{n}）"),
    NumberingStyle::Alpha => format!("({})", numeral::alpha(n)),
    NumberingStyle::RomanUpper => format!("({})", numeral::roman_upper(n)),
    NumberingStyle::RomanLower => format!("({})", numeral::roman_lower(n)),
    NumberingStyle::PartDecimal => format!(" part {n}"),
    NumberingStyle::PartRoman => format!(" part {}", numeral::roman_upper(n)),
    NumberingStyle::PtDecimal => format!(" Pt. {n}"),
    NumberingStyle::DashDecimal => format!("- {n}"),
    NumberingStyle::CounterWord => format!("その{n}"),
    NumberingStyle::StripOnly => return None,
  };
  Some(token)
}

/// Assign a token to every member of `group`, keyed by `source_index`.
///
/// The counter is local to the group.
#[must_use]
pub fn assign(group: &Group, style: NumberingStyle) -> BTreeMap<usize, String> {
  group
    .members
    .iter()
    .enumerate()
    .filter_map(|(position, &source_index)| {
      render(position + 1, style).map(|token| (source_index, token))
    })
    .collect()
}

/// Split trailing paragraph and line terminators off `text`.
///
/// Returns `(body, terminator)`; concatenating both gives back `text`.
#[must_use]
pub fn split_terminator(text: &str) -> (&str, &str) {
  let body = text.trim_end_matches(['\r', '\n']);
  text.split_at(body.len())
}

/// Remove a trailing token of `style` from `text`.
///
/// Trailing terminators are dropped first and are not part of the result.
#[must_use]
pub fn strip(text: &str, style: NumberingStyle) -> String {
  let (body, _) = split_terminator(text);
  pattern::strip_token(body, style)
    .unwrap_or(body)
    .to_string()
}

/// Text cleaner used before grouping and before re-numbering.
///
/// Recognises the tokens of one or more styles; the first style whose grammar
/// matches the end of the text wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cleaner {
  styles: Vec<NumberingStyle>,
}

impl Default for Cleaner {
  fn default() -> Self {
    Self {
      styles: vec![NumberingStyle::Decimal],
    }
  }
}

impl Cleaner {
  #[must_use]
  pub fn new(styles: impl IntoIterator<Item = NumberingStyle>) -> Self {
    let mut unique = Vec::new();
    for style in styles {
      if !unique.contains(&style) {
        unique.push(style);
      }
    }
    Self { styles: unique }
  }

  /// Same cleaner that also recognises `style`.
  #[must_use]
  pub fn with_style(mut self, style: NumberingStyle) -> Self {
    if !self.styles.contains(&style) {
      self.styles.push(style);
    }
    self
  }

  #[must_use]
  pub fn styles(&self) -> &[NumberingStyle] {
    &self.styles
  }

  /// Remove a recognised token from `body`, which must not carry
  /// terminators.
  #[must_use]
  pub fn strip_token<'a>(&self, body: &'a str) -> &'a str {
    self
      .styles
      .iter()
      .find_map(|style| pattern::strip_token(body, *style))
      .unwrap_or(body)
  }

  /// Cleaned text: terminators and any recognised token removed.
  #[must_use]
  pub fn clean(&self, text: &str) -> String {
    let (body, _) = split_terminator(text);
    self.strip_token(body).to_string()
  }
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  fn group_of(members: &[usize]) -> Group {
    Group {
      style:    "body".to_string(),
      text:     "Item".to_string(),
      ancestor: None,
      count:    members.len(),
      members:  members.to_vec(),
    }
  }

  #[test]
  fn test_decimal_tokens_follow_member_order() {
    let tokens = assign(&group_of(&[3, 8, 12]), NumberingStyle::Decimal);
    assert_eq!(tokens.get(&3).map(String::as_str), Some("(1)"));
    assert_eq!(tokens.get(&8).map(String::as_str), Some("(2)"));
    assert_eq!(tokens.get(&12).map(String::as_str), Some("(3)"));
  }

  #[test]
  fn test_roman_upper_falls_back_after_ten() {
    let members: Vec<usize> = (0..11).collect();
    let tokens = assign(&group_of(&members), NumberingStyle::RomanUpper);
    assert_eq!(tokens[&9], "(X)");

    // Member 11 gets the literal number 11 in place of a numeral
    assert_eq!(numeral::roman_upper(11), "11");
    assert_eq!(tokens[&10], "(11)");
    assert_eq!(strip("Step 3(11)\r", NumberingStyle::RomanUpper), "Step 3");
  }

  #[test]
  fn test_render_every_style() {
    let cases = [
      (NumberingStyle::Decimal, "(2)"),
      (NumberingStyle::FullWidthDecimal, "（2）"),
      (NumberingStyle::Alpha, "(B)"),
      (NumberingStyle::RomanUpper, "(II)"),
      (NumberingStyle::RomanLower, "(ii)"),
      (NumberingStyle::PartDecimal, " part 2"),
      (NumberingStyle::PartRoman, " part II"),
      (NumberingStyle::PtDecimal, " Pt. 2"),
      (NumberingStyle::DashDecimal, "- 2"),
      (NumberingStyle::CounterWord, "その2"),
    ];
    for (style, expected) in cases {
      assert_eq!(render(2, style).as_deref(), Some(expected), "{style}");
    }
    assert_eq!(render(2, NumberingStyle::StripOnly), None);
  }

  #[test]
  fn test_strip_only_assigns_nothing() {
    assert!(assign(&group_of(&[0, 1]), NumberingStyle::StripOnly).is_empty());
  }

  #[test]
  fn test_parse_style_tags() {
    assert_eq!(
      "roman-upper".parse::<NumberingStyle>(),
      Ok(NumberingStyle::RomanUpper)
    );
    assert_eq!(
      "Full_Width_Decimal".parse::<NumberingStyle>(),
      Ok(NumberingStyle::FullWidthDecimal)
    );
    assert_eq!("none".parse::<NumberingStyle>(), Ok(NumberingStyle::StripOnly));
    assert_eq!(
      "hex".parse::<NumberingStyle>(),
      Err(NumberingError::UnsupportedStyle("hex".to_string()))
    );
  }

  #[test]
  fn test_style_serde_uses_tags() {
    let json = serde_json::to_string(&NumberingStyle::PtDecimal).unwrap();
    assert_eq!(json, "\"pt-decimal\"");
    let parsed: NumberingStyle =
      serde_json::from_str("\"counter-word\"").unwrap();
    assert_eq!(parsed, NumberingStyle::CounterWord);
    assert!(serde_json::from_str::<NumberingStyle>("\"bogus\"").is_err());
  }

  #[test]
  fn test_split_terminator() {
    assert_eq!(split_terminator("Item(1)\r"), ("Item(1)", "\r"));
    assert_eq!(split_terminator("Item\r\n"), ("Item", "\r\n"));
    assert_eq!(split_terminator("Item"), ("Item", ""));
    assert_eq!(split_terminator("\r"), ("", "\r"));
  }

  #[test]
  fn test_strip_drops_terminator_and_token() {
    assert_eq!(strip("Item(3)\r", NumberingStyle::Decimal), "Item");
    assert_eq!(strip("Item（１２）", NumberingStyle::Decimal), "Item");
    assert_eq!(strip("Item", NumberingStyle::Decimal), "Item");
  }

  #[test]
  fn test_cleaner_recognises_multiple_styles() {
    let cleaner = Cleaner::new([NumberingStyle::Decimal])
      .with_style(NumberingStyle::PartRoman)
      .with_style(NumberingStyle::Decimal);
    assert_eq!(cleaner.styles().len(), 2);
    assert_eq!(cleaner.clean("Chapter part IV\r"), "Chapter");
    assert_eq!(cleaner.clean("Chapter(2)"), "Chapter");
    assert_eq!(cleaner.clean("Chapter- 2"), "Chapter- 2");
  }
}
