//! Heading scope tracking.
//!
//! The stack is monotonic in level: entering a heading pops every frame at
//! the same or a deeper level, so there is at most one frame per level and a
//! pushed frame always deepens the hierarchy. A heading is its own scope: the
//! frame it pushes is the ancestor reported for it and for everything up to
//! the next heading of the same or a shallower level.
use crate::types::Ancestor;

/// Deepest level that opens a scope.
pub const MAX_HEADING_LEVEL: i64 = 9;

/// Whether `level` can open a scope. Anything outside `1..=9` is body text.
#[must_use]
pub const fn is_heading_level(level: Option<i64>) -> bool {
  matches!(level, Some(1..=MAX_HEADING_LEVEL))
}

/// One open heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeFrame {
  pub key:     String,
  pub style:   String,
  pub level:   i64,
  pub counter: usize,
}

impl ScopeFrame {
  fn ancestor(&self) -> Ancestor {
    Ancestor {
      style:   self.style.clone(),
      key:     self.key.clone(),
      counter: self.counter,
    }
  }
}

#[derive(Debug, Default)]
pub struct ScopeStack {
  frames: Vec<ScopeFrame>,
}

impl ScopeStack {
  #[must_use]
  pub const fn new() -> Self {
    Self { frames: Vec::new() }
  }

  /// Open a scope for a heading and return it.
  ///
  /// The new frame's counter is its parent's plus one, or 1 at the top.
  pub fn enter(&mut self, key: &str, style: &str, level: i64) -> Ancestor {
    while self.frames.last().is_some_and(|top| top.level >= level) {
      self.frames.pop();
    }

    let counter = self.frames.last().map_or(1, |frame| frame.counter + 1);
    let frame = ScopeFrame {
      key: key.to_string(),
      style: style.to_string(),
      level,
      counter,
    };
    let ancestor = frame.ancestor();
    self.frames.push(frame);
    ancestor
  }

  /// The innermost open scope.
  #[must_use]
  pub fn current(&self) -> Option<Ancestor> {
    self.frames.last().map(ScopeFrame::ancestor)
  }

  #[must_use]
  pub fn depth(&self) -> usize {
    self.frames.len()
  }
}
