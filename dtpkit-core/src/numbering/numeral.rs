//! Roman and alphabetic numerals with a decimal fallback.

const ROMAN_UPPER: [&str; 10] =
  ["I", "II", "III", "IV", "V", "VI", "VII", "VIII", "IX", "X"];

const ROMAN_LOWER: [&str; 10] =
  ["i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x"];

/// Upper-case roman numeral for 1..=10, decimal otherwise.
#[must_use]
pub fn roman_upper(n: usize) -> String {
  table_or_decimal(&ROMAN_UPPER, n)
}

/// Lower-case roman numeral for 1..=10, decimal otherwise.
#[must_use]
pub fn roman_lower(n: usize) -> String {
  table_or_decimal(&ROMAN_LOWER, n)
}

/// `A` to `Z` for 1..=26, decimal otherwise.
#[must_use]
pub fn alpha(n: usize) -> String {
  match n {
    1..=26 => {
      u8::try_from(n - 1)
        .map(|offset| char::from(b'A' + offset).to_string())
        .unwrap_or_else(|_| n.to_string())
    },
    _ => n.to_string(),
  }
}

fn table_or_decimal(table: &[&str], n: usize) -> String {
  n.checked_sub(1)
    .and_then(|i| table.get(i))
    .map_or_else(|| n.to_string(), |numeral| (*numeral).to_string())
}
