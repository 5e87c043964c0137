//! Table snapshots: cells with spans plus header and footer row counts.
use std::{collections::BTreeMap, fmt, str::FromStr};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{Grid, HeaderFooter, TransposeError, TransposeResult, transpose};

/// Content of a cell plus its formatting attributes.
///
/// Attributes (font, font style, point size, fill colour, tint, ...) travel
/// with the contents as one unit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPayload {
  #[serde(default)]
  pub contents: String,

  #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
  pub attributes: BTreeMap<String, String>,
}

impl CellPayload {
  #[must_use]
  pub fn text(contents: impl Into<String>) -> Self {
    Self {
      contents:   contents.into(),
      attributes: BTreeMap::new(),
    }
  }

  #[must_use]
  pub fn with_attribute(
    mut self,
    name: impl Into<String>,
    value: impl Into<String>,
  ) -> Self {
    self.attributes.insert(name.into(), value.into());
    self
  }
}

const fn one() -> usize {
  1
}

#[allow(
  clippy::trivially_copy_pass_by_ref,
  reason = "Signature required by serde's skip_serializing_if"
)]
const fn is_one(value: &usize) -> bool {
  *value == 1
}

/// A table cell as found in the host table.
///
/// A span greater than one marks the anchor of a merged region; the
/// positions it covers still hold their own (usually empty) cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCell {
  #[serde(flatten)]
  pub payload: CellPayload,

  #[serde(default = "one", skip_serializing_if = "is_one")]
  pub row_span: usize,

  #[serde(default = "one", skip_serializing_if = "is_one")]
  pub column_span: usize,
}

impl Default for TableCell {
  fn default() -> Self {
    Self {
      payload:     CellPayload::default(),
      row_span:    1,
      column_span: 1,
    }
  }
}

impl From<CellPayload> for TableCell {
  fn from(payload: CellPayload) -> Self {
    Self {
      payload,
      ..Default::default()
    }
  }
}

impl TableCell {
  #[must_use]
  pub const fn is_merged(&self) -> bool {
    self.row_span > 1 || self.column_span > 1
  }
}

/// Rectangle covered by a merged cell, anchored at its top-left cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedRegion {
  pub row:         usize,
  pub column:      usize,
  pub row_span:    usize,
  pub column_span: usize,
}

impl MergedRegion {
  #[must_use]
  pub const fn contains(&self, row: usize, column: usize) -> bool {
    row >= self.row
      && row < self.row + self.row_span
      && column >= self.column
      && column < self.column + self.column_span
  }
}

/// What to do with merged cells before transposing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
  /// Refuse to transpose.
  Abort,
  /// Dissolve every merged region into unit cells first.
  #[default]
  Unmerge,
}

impl fmt::Display for MergePolicy {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Abort => f.write_str("abort"),
      Self::Unmerge => f.write_str("unmerge"),
    }
  }
}

impl FromStr for MergePolicy {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "abort" => Ok(Self::Abort),
      "unmerge" => Ok(Self::Unmerge),
      other => {
        Err(format!(
          "Invalid merge policy: '{other}'. Expected 'abort' or 'unmerge'"
        ))
      },
    }
  }
}

/// Options for [`Table::transpose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransposeOptions {
  pub merge_policy: MergePolicy,

  /// Keep header rows as headers. When `false` they are treated as body
  /// rows and the result has no header rows.
  pub include_header: bool,
}

impl Default for TransposeOptions {
  fn default() -> Self {
    Self {
      merge_policy:   MergePolicy::Unmerge,
      include_header: true,
    }
  }
}

/// A table snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
  pub rows: Vec<Vec<TableCell>>,

  #[serde(default)]
  pub header_row_count: usize,

  #[serde(default)]
  pub footer_row_count: usize,
}

impl Table {
  /// Build a table of unit cells with no header or footer rows.
  #[must_use]
  pub fn from_payloads(rows: Vec<Vec<CellPayload>>) -> Self {
    Self {
      rows: rows
        .into_iter()
        .map(|row| row.into_iter().map(TableCell::from).collect())
        .collect(),
      header_row_count: 0,
      footer_row_count: 0,
    }
  }

  #[must_use]
  pub fn has_merged_cells(&self) -> bool {
    self.rows.iter().flatten().any(TableCell::is_merged)
  }

  /// Every merged region, in row-major order of their anchors.
  ///
  /// A spanning cell that lies inside an already collected region is not
  /// reported again.
  #[must_use]
  pub fn merged_regions(&self) -> Vec<MergedRegion> {
    let mut regions: Vec<MergedRegion> = Vec::new();
    for (row, cells) in self.rows.iter().enumerate() {
      for (column, cell) in cells.iter().enumerate() {
        if !cell.is_merged()
          || regions.iter().any(|region| region.contains(row, column))
        {
          continue;
        }
        regions.push(MergedRegion {
          row,
          column,
          row_span: cell.row_span,
          column_span: cell.column_span,
        });
      }
    }
    regions
  }

  /// Dissolve every merged region into unit cells.
  pub fn unmerge(&mut self) {
    for cell in self.rows.iter_mut().flatten() {
      cell.row_span = 1;
      cell.column_span = 1;
    }
  }

  /// Header and footer counts as they would be used for transposition.
  #[must_use]
  pub const fn header_footer(&self, include_header: bool) -> HeaderFooter {
    HeaderFooter {
      header: if include_header {
        self.header_row_count
      } else {
        0
      },
      footer: self.footer_row_count,
    }
  }

  /// Swap rows and columns.
  ///
  /// Header and footer row counts are carried over and fitted to the new row
  /// total.
  ///
  /// # Errors
  ///
  /// - [`TransposeError::Ragged`] when rows differ in length
  /// - [`TransposeError::MergedCells`] when merged regions exist and the
  ///   policy is [`MergePolicy::Abort`]
  pub fn transpose(
    mut self,
    options: &TransposeOptions,
  ) -> TransposeResult<Self> {
    let counts = self.header_footer(options.include_header);

    let regions = self.merged_regions();
    if !regions.is_empty() {
      match options.merge_policy {
        MergePolicy::Abort => {
          return Err(TransposeError::MergedCells {
            count: regions.len(),
          });
        },
        MergePolicy::Unmerge => {
          info!("Unmerging {} merged region(s) before transposing", regions.len());
          self.unmerge();
        },
      }
    }

    let grid = Grid::from_rows(self.rows)?;
    debug!(
      "Transposing {}x{} table",
      grid.row_count(),
      grid.column_count()
    );
    let grid = transpose(grid);
    let counts = counts.recompute(grid.row_count());

    Ok(Self {
      rows:             grid.into_rows(),
      header_row_count: counts.header,
      footer_row_count: counts.footer,
    })
  }
}
