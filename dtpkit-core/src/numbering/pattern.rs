//! Trailing-anchored grammars for applied tokens.
//!
//! Every grammar accepts both half-width (`0-9`) and full-width (`０-９`)
//! digits, and the roman/alphabetic ones also accept the decimal fallback.
use std::sync::LazyLock;

use regex::Regex;

use super::NumberingStyle;

const PAREN_DECIMAL: &str = r"[（(][0-9０-９]+[）)]$";
const PAREN_ALPHA: &str = r"[（(](?:[A-Z]|[0-9０-９]+)[）)]$";
const PAREN_ROMAN_UPPER: &str = r"[（(](?:[IVX]+|[0-9０-９]+)[）)]$";
const PAREN_ROMAN_LOWER: &str = r"[（(](?:[ivx]+|[0-9０-９]+)[）)]$";
const PART_DECIMAL: &str = r" part [0-9０-９]+$";
const PART_ROMAN: &str = r" part (?:[IVX]+|[0-9０-９]+)$";
const PT_DECIMAL: &str = r" Pt\. [0-9０-９]+$";
const DASH_DECIMAL: &str = r"- [0-9０-９]+$";
const COUNTER_WORD: &str = r"その[0-9０-９]+$";
const ANY_TOKEN: &str = r"(?:[（(](?:[A-Z]|[IVXivx]+|[0-9０-９]+)[）)]| part (?:[IVX]+|[0-9０-９]+)| Pt\. [0-9０-９]+|- [0-9０-９]+|その[0-9０-９]+)$";

/// A regex that never matches anything.
///
/// # Panics
///
/// Never in practice; the pattern is a constant known to be valid.
#[must_use]
pub fn never_matching_regex() -> Regex {
  Regex::new(r"[^\s\S]").unwrap_or_else(|_| {
    #[allow(
      clippy::expect_used,
      reason = "This pattern is guaranteed to be valid"
    )]
    Regex::new(r"^\b$").expect("regex pattern ^\\b$ should always compile")
  })
}

fn compile(name: &str, pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    log::error!(
      "Failed to compile {name} token regex: {e}\n Falling back to never \
       matching regex."
    );
    never_matching_regex()
  })
}

static PAREN_DECIMAL_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("PAREN_DECIMAL", PAREN_DECIMAL));
static PAREN_ALPHA_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("PAREN_ALPHA", PAREN_ALPHA));
static PAREN_ROMAN_UPPER_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("PAREN_ROMAN_UPPER", PAREN_ROMAN_UPPER));
static PAREN_ROMAN_LOWER_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("PAREN_ROMAN_LOWER", PAREN_ROMAN_LOWER));
static PART_DECIMAL_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("PART_DECIMAL", PART_DECIMAL));
static PART_ROMAN_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("PART_ROMAN", PART_ROMAN));
static PT_DECIMAL_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("PT_DECIMAL", PT_DECIMAL));
static DASH_DECIMAL_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("DASH_DECIMAL", DASH_DECIMAL));
static COUNTER_WORD_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("COUNTER_WORD", COUNTER_WORD));
static ANY_TOKEN_RE: LazyLock<Regex> =
  LazyLock::new(|| compile("ANY_TOKEN", ANY_TOKEN));

/// The grammar recognising tokens of `style`.
///
/// [`NumberingStyle::StripOnly`] recognises a token of any style.
#[must_use]
pub fn token_regex(style: NumberingStyle) -> &'static Regex {
  match style {
    NumberingStyle::Decimal | NumberingStyle::FullWidthDecimal => {
      &*PAREN_DECIMAL_RE
    },
    NumberingStyle::Alpha => &*PAREN_ALPHA_RE,
    NumberingStyle::RomanUpper => &*PAREN_ROMAN_UPPER_RE,
    NumberingStyle::RomanLower => &*PAREN_ROMAN_LOWER_RE,
    NumberingStyle::PartDecimal => &*PART_DECIMAL_RE,
    NumberingStyle::PartRoman => &*PART_ROMAN_RE,
    NumberingStyle::PtDecimal => &*PT_DECIMAL_RE,
    NumberingStyle::DashDecimal => &*DASH_DECIMAL_RE,
    NumberingStyle::CounterWord => &*COUNTER_WORD_RE,
    NumberingStyle::StripOnly => &*ANY_TOKEN_RE,
  }
}

/// `body` without its trailing token, or `None` when it carries none.
#[must_use]
pub fn strip_token(body: &str, style: NumberingStyle) -> Option<&str> {
  token_regex(style).find(body).map(|m| &body[..m.start()])
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_paren_decimal_accepts_both_widths() {
    for text in ["Item(1)", "Item（1）", "Item(１)", "Item（１０）"] {
      assert_eq!(strip_token(text, NumberingStyle::Decimal), Some("Item"));
    }
    assert_eq!(strip_token("Item", NumberingStyle::Decimal), None);
    assert_eq!(strip_token("Item(1) tail", NumberingStyle::Decimal), None);
  }

  #[test]
  fn test_only_last_token_is_removed() {
    assert_eq!(
      strip_token("Item(1)(2)", NumberingStyle::Decimal),
      Some("Item(1)")
    );
  }

  #[test]
  fn test_roman_accepts_decimal_fallback() {
    assert_eq!(strip_token("Item(11)", NumberingStyle::RomanUpper), Some("Item"));
    assert_eq!(strip_token("Item(iv)", NumberingStyle::RomanLower), Some("Item"));
    assert_eq!(strip_token("Item(iv)", NumberingStyle::RomanUpper), None);
  }

  #[test]
  fn test_suffix_styles() {
    assert_eq!(
      strip_token("Chapter part 3", NumberingStyle::PartDecimal),
      Some("Chapter")
    );
    assert_eq!(
      strip_token("Chapter Pt. ３", NumberingStyle::PtDecimal),
      Some("Chapter")
    );
    assert_eq!(
      strip_token("Chapter- 12", NumberingStyle::DashDecimal),
      Some("Chapter")
    );
    assert_eq!(
      strip_token("章その2", NumberingStyle::CounterWord),
      Some("章")
    );
    assert_eq!(strip_token("Chapter part", NumberingStyle::PartRoman), None);
  }

  #[test]
  fn test_any_token() {
    for text in [
      "Item(3)",
      "Item(C)",
      "Item(vi)",
      "Item part II",
      "Item Pt. 4",
      "Item- 5",
      "Itemその6",
    ] {
      assert_eq!(strip_token(text, NumberingStyle::StripOnly), Some("Item"));
    }
    assert_eq!(strip_token("Item", NumberingStyle::StripOnly), None);
  }

  #[test]
  fn test_never_matching_regex() {
    let re = never_matching_regex();
    assert!(!re.is_match(""));
    assert!(!re.is_match("anything at all"));
  }
}
