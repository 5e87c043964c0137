use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dtpkit_core::{NumberingStyle, transpose::MergePolicy};

/// Command line interface for dtpkit
#[derive(Parser, Debug)]
#[command(
  author,
  version,
  about = "dtpkit: desktop publishing automation on JSON snapshots"
)]
pub struct Cli {
  /// Subcommand to execute (see [`Commands`])
  #[command(subcommand)]
  pub command: Commands,

  /// Enable verbose debug logging
  #[arg(short, long, global = true)]
  pub verbose: bool,

  /// Path to configuration file(s) (TOML or JSON, can be specified multiple
  /// times). Multiple files are merged in order, with later files overriding
  /// earlier ones
  #[arg(short = 'c', long = "config-file", global = true, action = clap::ArgAction::Append)]
  pub config_files: Vec<PathBuf>,

  /// Override configuration values (KEY=VALUE format, can be used multiple
  /// times)
  #[arg(long = "config", global = true, action = clap::ArgAction::Append)]
  pub config_overrides: Vec<String>,
}

/// All supported subcommands for the dtpkit CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
  /// Report paragraphs whose text repeats within the same heading.
  Index {
    /// JSON file holding the content records.
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the groups. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Number every repeated paragraph.
  Number {
    /// JSON file holding the content records.
    #[arg(short, long)]
    input: PathBuf,

    /// Numbering style. Defaults to `numbering.style` from the config.
    #[arg(short, long)]
    style: Option<NumberingStyle>,

    /// Only number groups of these paragraph styles (can be specified
    /// multiple times).
    #[arg(long = "only-style", action = clap::ArgAction::Append)]
    only_styles: Vec<String>,

    /// Where to write the updated records. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Remove numbering from every repeated paragraph.
  Strip {
    /// JSON file holding the content records.
    #[arg(short, long)]
    input: PathBuf,

    /// Only strip groups of these paragraph styles (can be specified
    /// multiple times).
    #[arg(long = "only-style", action = clap::ArgAction::Append)]
    only_styles: Vec<String>,

    /// Where to write the updated records. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,
  },

  /// Swap the rows and columns of a table.
  Transpose {
    /// JSON file holding the table.
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the transposed table. Defaults to stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// How to handle merged cells. Defaults to `transpose.merge_policy`.
    #[arg(short, long = "merge")]
    merge_policy: Option<MergePolicy>,

    /// Treat header and footer rows as body rows.
    #[arg(long = "no-header")]
    no_header: bool,
  },

  /// Convert text typed into a single-line input box. Decodes by default.
  EditText {
    /// File holding the text. Defaults to stdin.
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Show forced line breaks as markers for editing.
    #[arg(long, conflicts_with_all = ["clear", "append_marker"])]
    encode: bool,

    /// Remove every kind of break.
    #[arg(long, conflicts_with = "append_marker")]
    clear: bool,

    /// Append a forced line break marker.
    #[arg(long = "append-marker")]
    append_marker: bool,
  },

  /// Initialize a new dtpkit configuration file
  Init {
    /// Path to create the configuration file at
    #[arg(short, long, default_value = "dtpkit.toml")]
    output: PathBuf,

    /// Format of the configuration file.
    #[arg(short = 'F', long, default_value = "toml", value_parser = ["toml", "json"])]
    format: String,

    /// Force overwrite if file already exists
    #[arg(short, long)]
    force: bool,
  },
}

impl Commands {
  /// Subcommand name as typed on the command line.
  #[must_use]
  pub const fn name(&self) -> &'static str {
    match self {
      Self::Index { .. } => "index",
      Self::Number { .. } => "number",
      Self::Strip { .. } => "strip",
      Self::Transpose { .. } => "transpose",
      Self::EditText { .. } => "edit-text",
      Self::Init { .. } => "init",
    }
  }
}

impl Cli {
  /// Parse command line arguments
  #[must_use]
  pub fn parse_args() -> Self {
    Self::parse()
  }
}
