//! Repeated text detection.
//!
//! [`index`] scans a record sequence once and groups records that share a
//! style, a cleaned text and (in hierarchy-aware mode) an enclosing heading.
//! Only groups with two or more members are reported.
//!
//! # Examples
//!
//! ```
//! use dtpkit_core::{ContentRecord, IndexOptions, index};
//!
//! let records = vec![
//!   ContentRecord::heading(0, "h1", "Part A", 1),
//!   ContentRecord::new(1, "body", "xx"),
//!   ContentRecord::new(2, "body", "xx"),
//!   ContentRecord::heading(3, "h1", "Part B", 1),
//!   ContentRecord::new(4, "body", "xx"),
//! ];
//!
//! let groups = index(&records, &IndexOptions::default(), |t| t.to_string());
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].members, vec![1, 2]);
//! ```
pub mod scope;

use std::collections::HashSet;

use indexmap::IndexMap;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

pub use self::scope::{MAX_HEADING_LEVEL, ScopeFrame, ScopeStack};
use crate::types::{ContentRecord, Group, GroupKey};

/// Paragraph styles that never take part in numbering by default.
pub const DEFAULT_EXCLUDED_STYLES: [&str; 2] = ["p.img", "p.table"];

/// Options for [`index`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexOptions {
  /// Styles whose records are skipped entirely.
  pub excluded_styles: HashSet<String>,

  /// Group by enclosing heading and ignore text outside any heading.
  /// When `false`, records are grouped by style and text only.
  pub hierarchy_aware: bool,
}

impl Default for IndexOptions {
  fn default() -> Self {
    Self {
      excluded_styles: DEFAULT_EXCLUDED_STYLES
        .iter()
        .map(ToString::to_string)
        .collect(),
      hierarchy_aware: true,
    }
  }
}

/// Find content repeated within a scope.
///
/// `clean` turns raw text into the text used for grouping; it is expected to
/// remove trailing terminators and any numbering token already applied (see
/// [`crate::numbering::Cleaner::clean`]). Records are consumed in the given
/// order.
///
/// The result is sorted by member count (descending), then by style
/// (ascending, case-insensitive); remaining ties keep first-seen order.
pub fn index<F>(
  records: &[ContentRecord],
  options: &IndexOptions,
  clean: F,
) -> Vec<Group>
where
  F: Fn(&str) -> String,
{
  let mut scopes = ScopeStack::new();
  let mut groups: IndexMap<GroupKey, Group> = IndexMap::new();

  for record in records {
    if options.excluded_styles.contains(&record.style) {
      trace!("Skipping record {} (excluded style)", record.source_index);
      continue;
    }

    let cleaned = clean(&record.raw_text);
    if cleaned.trim().is_empty() || cleaned.chars().count() <= 1 {
      continue;
    }

    let ancestor = match record.level {
      Some(level) if scope::is_heading_level(record.level) => {
        Some(scopes.enter(&cleaned, &record.style, level))
      },
      _ => scopes.current(),
    };

    let key = GroupKey {
      style:    record.style.clone(),
      text:     cleaned,
      ancestor: if options.hierarchy_aware {
        ancestor
      } else {
        None
      },
    };

    groups
      .entry(key)
      .and_modify(|group| {
        group.count += 1;
        group.members.push(record.source_index);
      })
      .or_insert_with_key(|key| {
        Group {
          style:    key.style.clone(),
          text:     key.text.clone(),
          ancestor: key.ancestor.clone(),
          count:    1,
          members:  vec![record.source_index],
        }
      });
  }

  let total = groups.len();
  let mut repeated: Vec<Group> = groups
    .into_values()
    .filter(|group| group.count >= 2)
    .filter(|group| !options.hierarchy_aware || group.ancestor.is_some())
    .collect();

  repeated.sort_by(|a, b| {
    b.count
      .cmp(&a.count)
      .then_with(|| a.style.to_lowercase().cmp(&b.style.to_lowercase()))
  });

  debug!(
    "Indexed {} records into {total} groups, {} repeated",
    records.len(),
    repeated.len()
  );

  repeated
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::{numbering::Cleaner, types::Ancestor};

  fn run(records: &[ContentRecord], options: &IndexOptions) -> Vec<Group> {
    let cleaner = Cleaner::default();
    index(records, options, |t| cleaner.clean(t))
  }

  #[test]
  fn test_siblings_under_different_headings_stay_apart() {
    let records = vec![
      ContentRecord::heading(0, "h1", "Part A", 1),
      ContentRecord::new(1, "body", "xx"),
      ContentRecord::heading(2, "h1", "Part B", 1),
      ContentRecord::new(3, "body", "xx"),
    ];
    assert!(run(&records, &IndexOptions::default()).is_empty());

    let flat = IndexOptions {
      hierarchy_aware: false,
      ..Default::default()
    };
    let groups = run(&records, &flat);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec![1, 3]);
  }

  #[test]
  fn test_two_headings_produce_two_groups() {
    let records = vec![
      ContentRecord::heading(0, "h1", "Part A", 1),
      ContentRecord::new(1, "body", "xx"),
      ContentRecord::new(2, "body", "xx"),
      ContentRecord::heading(3, "h1", "Part B", 1),
      ContentRecord::new(4, "body", "xx"),
      ContentRecord::new(5, "body", "xx"),
    ];
    let groups = run(&records, &IndexOptions::default());
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].members, vec![1, 2]);
    assert_eq!(groups[1].members, vec![4, 5]);
    assert_eq!(
      groups[0].ancestor.as_ref().map(|a| a.key.as_str()),
      Some("Part A")
    );
    assert_eq!(
      groups[1].ancestor.as_ref().map(|a| a.key.as_str()),
      Some("Part B")
    );
  }

  #[test]
  fn test_applied_numbering_collapses() {
    let records = vec![
      ContentRecord::heading(0, "h1", "Guide", 1),
      ContentRecord::new(1, "body", "Item(1)\r"),
      ContentRecord::new(2, "body", "Item(2)\r"),
      ContentRecord::new(3, "body", "Item\r"),
    ];
    let groups = run(&records, &IndexOptions::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].text, "Item");
    assert_eq!(groups[0].count, 3);
    assert_eq!(groups[0].members, vec![1, 2, 3]);
  }

  #[test]
  fn test_excluded_styles_and_short_text() {
    let records = vec![
      ContentRecord::heading(0, "h1", "Guide", 1),
      ContentRecord::new(1, "p.img", "Figure"),
      ContentRecord::new(2, "p.img", "Figure"),
      ContentRecord::new(3, "body", "x"),
      ContentRecord::new(4, "body", "x"),
      ContentRecord::new(5, "body", "   "),
      ContentRecord::new(6, "body", "   "),
    ];
    assert!(run(&records, &IndexOptions::default()).is_empty());
  }

  #[test]
  fn test_top_level_text_is_not_grouped_in_hierarchy_mode() {
    let records = vec![
      ContentRecord::new(0, "body", "Note"),
      ContentRecord::new(1, "body", "Note"),
    ];
    assert!(run(&records, &IndexOptions::default()).is_empty());
  }

  #[test]
  fn test_repeated_subheadings_are_their_own_scope() {
    let records = vec![
      ContentRecord::heading(0, "h1", "Chapter", 1),
      ContentRecord::heading(1, "h2", "Summary", 2),
      ContentRecord::new(2, "body", "Text"),
      ContentRecord::heading(3, "h2", "Summary", 2),
      ContentRecord::new(4, "body", "Text"),
    ];
    let groups = run(&records, &IndexOptions::default());
    assert_eq!(groups.len(), 2);

    // Both "Text" records sit under a "Summary" frame of the same depth
    assert_eq!(groups[0].style, "body");
    assert_eq!(groups[0].members, vec![2, 4]);

    // Each heading is scoped by the frame it opens
    assert_eq!(groups[1].style, "h2");
    assert_eq!(groups[1].members, vec![1, 3]);
    assert_eq!(groups[1].ancestor, Some(Ancestor {
      style:   "h2".to_string(),
      key:     "Summary".to_string(),
      counter: 2,
    }));
  }

  #[test]
  fn test_repeated_headings_group() {
    let top_level = vec![
      ContentRecord::heading(0, "h1", "Appendix", 1),
      ContentRecord::heading(1, "h1", "Appendix", 1),
    ];
    let groups = run(&top_level, &IndexOptions::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec![0, 1]);

    let under_different_parents = vec![
      ContentRecord::heading(0, "h1", "Part A", 1),
      ContentRecord::heading(1, "h2", "Summary", 2),
      ContentRecord::heading(2, "h1", "Part B", 1),
      ContentRecord::heading(3, "h2", "Summary", 2),
    ];
    let groups = run(&under_different_parents, &IndexOptions::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].style, "h2");
    assert_eq!(groups[0].text, "Summary");
    assert_eq!(groups[0].count, 2);
  }

  #[test]
  fn test_out_of_range_levels_are_body_text() {
    let mut deep = ContentRecord::new(1, "body", "Note");
    deep.level = Some(300);
    let mut negative = ContentRecord::new(2, "body", "Note");
    negative.level = Some(-1);
    let records = vec![
      ContentRecord::heading(0, "h1", "Guide", 1),
      deep,
      negative,
    ];

    let groups = run(&records, &IndexOptions::default());
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].members, vec![1, 2]);
    assert_eq!(
      groups[0].ancestor.as_ref().map(|a| a.key.as_str()),
      Some("Guide")
    );
  }

  #[test]
  fn test_ordering_by_count_then_style() {
    let records = vec![
      ContentRecord::heading(0, "h1", "Guide", 1),
      ContentRecord::new(1, "beta", "aa"),
      ContentRecord::new(2, "beta", "aa"),
      ContentRecord::new(3, "Alpha", "bb"),
      ContentRecord::new(4, "Alpha", "bb"),
      ContentRecord::new(5, "gamma", "cc"),
      ContentRecord::new(6, "gamma", "cc"),
      ContentRecord::new(7, "gamma", "cc"),
    ];
    let groups = run(&records, &IndexOptions::default());
    let styles: Vec<&str> = groups.iter().map(|g| g.style.as_str()).collect();
    assert_eq!(styles, vec!["gamma", "Alpha", "beta"]);
  }

  #[test]
  fn test_empty_input() {
    assert!(run(&[], &IndexOptions::default()).is_empty());
  }
}
