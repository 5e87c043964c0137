use dtpkit_core::{
  Cleaner,
  IndexOptions,
  NumberingStyle,
  indexer::DEFAULT_EXCLUDED_STYLES,
};
use serde::{Deserialize, Serialize};

/// Configuration for paragraph numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NumberingConfig {
  /// Style applied by the `number` command.
  pub style: NumberingStyle,

  /// Styles whose tokens are stripped before grouping. The applied `style`
  /// is always recognised as well.
  pub recognize: Vec<NumberingStyle>,

  /// Paragraph styles that never take part in numbering.
  pub excluded_styles: Vec<String>,

  /// Group repeated text per enclosing heading.
  pub hierarchy_aware: bool,
}

impl Default for NumberingConfig {
  fn default() -> Self {
    Self {
      style:           NumberingStyle::Decimal,
      recognize:       vec![NumberingStyle::Decimal],
      excluded_styles: DEFAULT_EXCLUDED_STYLES
        .iter()
        .map(ToString::to_string)
        .collect(),
      hierarchy_aware: true,
    }
  }
}

impl NumberingConfig {
  /// Options for the indexer.
  #[must_use]
  pub fn index_options(&self) -> IndexOptions {
    IndexOptions {
      excluded_styles: self.excluded_styles.iter().cloned().collect(),
      hierarchy_aware: self.hierarchy_aware,
    }
  }

  /// Cleaner recognising every configured style plus `style`.
  #[must_use]
  pub fn cleaner(&self) -> Cleaner {
    Cleaner::new(self.recognize.iter().copied()).with_style(self.style)
  }

  /// Merge another numbering config into this one. Scalars are replaced and
  /// lists are appended without duplicates.
  pub fn merge(&mut self, other: Self) {
    self.style = other.style;
    self.hierarchy_aware = other.hierarchy_aware;
    for style in other.recognize {
      if !self.recognize.contains(&style) {
        self.recognize.push(style);
      }
    }
    for name in other.excluded_styles {
      if !self.excluded_styles.contains(&name) {
        self.excluded_styles.push(name);
      }
    }
  }
}
