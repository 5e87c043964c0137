//! Snapshot types shared by the indexer and the numberer.
//!
//! A [`ContentRecord`] is one paragraph-like unit pulled out of a document.
//! The indexer turns a sequence of them into [`Group`]s of repeated content,
//! each identified by a [`GroupKey`].

use serde::{Deserialize, Serialize};

/// One unit of scannable content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentRecord {
  /// Formatting category (paragraph style name).
  pub style: String,

  /// Text as found in the document. May end with an applied numbering token
  /// and with paragraph or line terminators.
  pub raw_text: String,

  /// Heading depth when this record can open a scope. Values outside
  /// `1..=9` are kept but treated as body text.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub level: Option<i64>,

  /// Stable position within the containing sequence. Strictly increasing.
  pub source_index: usize,
}

impl ContentRecord {
  /// Create a non-heading record.
  #[must_use]
  pub fn new(
    source_index: usize,
    style: impl Into<String>,
    raw_text: impl Into<String>,
  ) -> Self {
    Self {
      style: style.into(),
      raw_text: raw_text.into(),
      level: None,
      source_index,
    }
  }

  /// Create a heading record at the given depth.
  #[must_use]
  pub fn heading(
    source_index: usize,
    style: impl Into<String>,
    raw_text: impl Into<String>,
    level: i64,
  ) -> Self {
    Self {
      level: Some(level),
      ..Self::new(source_index, style, raw_text)
    }
  }

  /// Copy of this record carrying different text.
  #[must_use]
  pub fn with_text(&self, raw_text: String) -> Self {
    Self {
      raw_text,
      ..self.clone()
    }
  }
}

/// The heading scope a record was found under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ancestor {
  /// Paragraph style of the heading.
  pub style:   String,
  /// Cleaned heading text.
  pub key:     String,
  /// Depth counter of the heading frame, starting at 1.
  pub counter: usize,
}

/// Aggregation key of a [`Group`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
  pub style:    String,
  pub text:     String,
  pub ancestor: Option<Ancestor>,
}

/// Content that repeats within one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
  pub style:    String,
  /// Cleaned text shared by every member.
  pub text:     String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ancestor: Option<Ancestor>,
  pub count:    usize,
  /// `source_index` of every member, in scan order.
  pub members:  Vec<usize>,
}

impl Group {
  #[must_use]
  pub fn key(&self) -> GroupKey {
    GroupKey {
      style:    self.style.clone(),
      text:     self.text.clone(),
      ancestor: self.ancestor.clone(),
    }
  }

  /// Short human readable label, e.g. `body: Step（3）`.
  ///
  /// Text longer than 28 characters is cut to 25 followed by an ellipsis.
  #[must_use]
  pub fn label(&self) -> String {
    let text = if self.text.chars().count() > 28 {
      let head: String = self.text.chars().take(25).collect();
      format!("{head}…")
    } else {
      self.text.clone()
    };

    match self.ancestor {
      Some(ref ancestor) => {
        format!("{}: {text}（{}） in {}", self.style, self.count, ancestor.key)
      },
      None => format!("{}: {text}（{}）", self.style, self.count),
    }
  }
}
