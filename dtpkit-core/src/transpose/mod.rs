//! Row/column transposition through square padding.
//!
//! [`transpose`] works on any rectangular [`Grid`] of payloads. The shorter
//! dimension is padded with default payloads until the grid is square, the
//! upper and lower triangles are swapped pairwise, and the padding is trimmed
//! off so an R×C grid comes back as C×R.
//!
//! [`Table`] wraps a grid with the bookkeeping a real table carries (merged
//! cells, header and footer rows).
pub mod table;

use log::debug;

pub use self::table::{
  CellPayload,
  MergePolicy,
  MergedRegion,
  Table,
  TableCell,
  TransposeOptions,
};

/// Error type for transposition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransposeError {
  #[error(
    "Table contains {count} merged region(s); unmerge them before transposing"
  )]
  MergedCells { count: usize },

  #[error("Row {row} has {found} cells, expected {expected}")]
  Ragged {
    row:      usize,
    expected: usize,
    found:    usize,
  },
}

/// Result type for transposition.
pub type TransposeResult<T> = Result<T, TransposeError>;

/// A rectangular grid of cell payloads, stored row by row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
  rows: Vec<Vec<T>>,
}

impl<T> Default for Grid<T> {
  fn default() -> Self {
    Self { rows: Vec::new() }
  }
}

impl<T> Grid<T> {
  /// Build a grid, checking that every row has the same length.
  ///
  /// # Errors
  ///
  /// Returns [`TransposeError::Ragged`] for the first row whose length
  /// differs from the first row's.
  pub fn from_rows(rows: Vec<Vec<T>>) -> TransposeResult<Self> {
    let expected = rows.first().map_or(0, Vec::len);
    if let Some((row, cells)) =
      rows.iter().enumerate().find(|(_, cells)| cells.len() != expected)
    {
      return Err(TransposeError::Ragged {
        row,
        expected,
        found: cells.len(),
      });
    }
    Ok(Self { rows })
  }

  #[must_use]
  pub fn row_count(&self) -> usize {
    self.rows.len()
  }

  #[must_use]
  pub fn column_count(&self) -> usize {
    self.rows.first().map_or(0, Vec::len)
  }

  #[must_use]
  pub fn is_empty(&self) -> bool {
    self.row_count() == 0 || self.column_count() == 0
  }

  #[must_use]
  pub fn get(&self, row: usize, column: usize) -> Option<&T> {
    self.rows.get(row).and_then(|cells| cells.get(column))
  }

  #[must_use]
  pub fn rows(&self) -> &[Vec<T>] {
    &self.rows
  }

  #[must_use]
  pub fn into_rows(self) -> Vec<Vec<T>> {
    self.rows
  }
}

/// Transpose `grid`, turning R×C into C×R.
///
/// Diagonal cells stay in place; every other pair is swapped as a whole
/// payload. Square grids are never padded, and an empty grid comes back
/// empty.
#[must_use]
pub fn transpose<T: Default>(grid: Grid<T>) -> Grid<T> {
  let rows = grid.row_count();
  let columns = grid.column_count();
  if grid.is_empty() {
    return Grid::default();
  }

  let size = rows.max(columns);
  if rows != columns {
    debug!("Padding {rows}x{columns} grid to {size}x{size}");
  }

  let mut cells: Vec<T> = Vec::with_capacity(size * size);
  for mut row in grid.rows {
    row.resize_with(size, T::default);
    cells.extend(row);
  }
  cells.resize_with(size * size, T::default);

  for row in 0..size {
    for column in (row + 1)..size {
      cells.swap(row * size + column, column * size + row);
    }
  }

  // Original columns are the new rows; each keeps only the original row count
  let mut cells = cells.into_iter();
  let mut transposed = Vec::with_capacity(columns);
  for _ in 0..columns {
    let mut row: Vec<T> = cells.by_ref().take(size).collect();
    row.truncate(rows);
    transposed.push(row);
  }

  Grid { rows: transposed }
}

/// Counts of leading (header) and trailing (footer) rows with a special role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderFooter {
  pub header: usize,
  pub footer: usize,
}

impl HeaderFooter {
  /// Fit the counts to a table of `total_rows` rows, header first.
  #[must_use]
  pub fn recompute(self, total_rows: usize) -> Self {
    let header = self.header.min(total_rows);
    let footer = self.footer.min(total_rows - header);
    Self { header, footer }
  }
}
