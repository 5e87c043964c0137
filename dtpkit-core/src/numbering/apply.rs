//! Writing tokens back into record text.
//!
//! Both functions build a new record sequence and leave the input untouched.
//! A member's old token is removed before the new one is appended, and its
//! trailing terminator is put back after the token.
use std::collections::{HashMap, HashSet};

use log::debug;

use super::{Cleaner, NumberingStyle, assign, split_terminator};
use crate::types::{ContentRecord, Group};

/// Number every member of `groups` with `style`.
///
/// With [`NumberingStyle::StripOnly`] members only lose their old token,
/// which is the same as [`remove_numbering`].
#[must_use]
pub fn apply_numbering(
  records: &[ContentRecord],
  groups: &[Group],
  style: NumberingStyle,
  cleaner: &Cleaner,
) -> Vec<ContentRecord> {
  let mut tokens: HashMap<usize, String> = HashMap::new();
  let mut members: HashSet<usize> = HashSet::new();
  for group in groups {
    members.extend(group.members.iter().copied());
    tokens.extend(assign(group, style));
  }

  debug!(
    "Numbering {} records across {} groups with style {style}",
    members.len(),
    groups.len()
  );

  records
    .iter()
    .map(|record| {
      if members.contains(&record.source_index) {
        let token = tokens.get(&record.source_index).map_or("", String::as_str);
        rewrite(record, cleaner, token)
      } else {
        record.clone()
      }
    })
    .collect()
}

/// Strip the recognised token from every member of `groups`.
#[must_use]
pub fn remove_numbering(
  records: &[ContentRecord],
  groups: &[Group],
  cleaner: &Cleaner,
) -> Vec<ContentRecord> {
  apply_numbering(records, groups, NumberingStyle::StripOnly, cleaner)
}

fn rewrite(
  record: &ContentRecord,
  cleaner: &Cleaner,
  token: &str,
) -> ContentRecord {
  let (body, terminator) = split_terminator(&record.raw_text);
  let bare = cleaner.strip_token(body);
  record.with_text(format!("{bare}{token}{terminator}"))
}
