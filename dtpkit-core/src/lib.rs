//! # dtpkit-core
//!
//! Host-independent algorithms behind a handful of desktop publishing
//! automation tasks. The host application's live object graph is replaced by
//! plain snapshots ([`ContentRecord`] sequences and table [`Grid`]s) that a
//! caller extracts from a document, hands to this crate, and writes back.
//!
//! ## Quick Start
//!
//! ```rust
//! use dtpkit_core::{
//!   ContentRecord,
//!   indexer::{IndexOptions, index},
//!   numbering::{Cleaner, NumberingStyle, assign},
//! };
//!
//! let records = vec![
//!   ContentRecord::heading(0, "h1", "Setup", 1),
//!   ContentRecord::new(1, "body", "Step"),
//!   ContentRecord::new(2, "body", "Step(7)"),
//! ];
//!
//! let cleaner = Cleaner::default();
//! let groups = index(&records, &IndexOptions::default(), |t| cleaner.clean(t));
//! assert_eq!(groups.len(), 1);
//!
//! let tokens = assign(&groups[0], NumberingStyle::Decimal);
//! assert_eq!(tokens[&1], "(1)");
//! assert_eq!(tokens[&2], "(2)");
//! ```
//!
//! ## Features
//!
//! - **Repeated text indexing** scoped by the nearest enclosing heading
//! - **Numbering** in several styles, with stripping of previously applied
//!   tokens (half- and full-width digits alike)
//! - **Table transposition** via square padding, with header/footer row
//!   counts carried over
//! - **Text input helpers** for the soft-break marker used in text entry
//!   dialogs
//!
//! ## Transposing a table
//!
//! ```rust
//! use dtpkit_core::transpose::{Grid, transpose};
//!
//! let grid = Grid::from_rows(vec![vec!['a', 'b', 'c'], vec!['d', 'e', 'f']])
//!   .unwrap_or_default();
//! let flipped = transpose(grid);
//!
//! let expected = vec![vec!['a', 'd'], vec!['b', 'e'], vec!['c', 'f']];
//! assert_eq!(flipped.rows(), expected.as_slice());
//! ```

pub mod indexer;
pub mod numbering;
pub mod text_input;
pub mod transpose;
mod types;

pub use crate::{
  indexer::{IndexOptions, index},
  numbering::{Cleaner, NumberingError, NumberingStyle},
  transpose::{Grid, Table, TransposeError, TransposeOptions},
  types::{Ancestor, ContentRecord, Group, GroupKey},
};
