//! Subcommand implementations.
//!
//! Each command reads a JSON snapshot, runs one of the `dtpkit-core`
//! algorithms on it and writes the result as JSON. The pure parts are exposed
//! separately so they can be tested without touching the filesystem.
use std::{
  collections::HashSet,
  fs,
  io::{self, Write},
  path::Path,
};

use dtpkit_config::{Config, NumberingConfig};
use dtpkit_core::{
  ContentRecord,
  Group,
  NumberingStyle,
  Table,
  TransposeOptions,
  index,
  numbering::{apply_numbering, remove_numbering},
  text_input,
};
use log::{debug, info};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
  cli::Commands,
  error::{DtpkitError, Result},
};

/// How `edit-text` converts its input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditMode {
  #[default]
  Decode,
  Encode,
  Clear,
  AppendMarker,
}

impl EditMode {
  #[must_use]
  pub const fn from_flags(encode: bool, clear: bool, append: bool) -> Self {
    if encode {
      Self::Encode
    } else if clear {
      Self::Clear
    } else if append {
      Self::AppendMarker
    } else {
      Self::Decode
    }
  }
}

/// Groups of repeated records under the configured options.
#[must_use]
pub fn index_records(
  records: &[ContentRecord],
  config: &NumberingConfig,
) -> Vec<Group> {
  let cleaner = config.cleaner();
  index(records, &config.index_options(), |t| cleaner.clean(t))
}

/// Number every reported group, or only groups of `only_styles` when it is
/// not empty.
#[must_use]
pub fn number_records(
  records: &[ContentRecord],
  config: &NumberingConfig,
  style: NumberingStyle,
  only_styles: &[String],
) -> Vec<ContentRecord> {
  let cleaner = config.cleaner().with_style(style);
  let groups = index(records, &config.index_options(), |t| cleaner.clean(t));
  let selected = select_groups(groups, only_styles);
  info!("Numbering {} groups with style {style}", selected.len());
  apply_numbering(records, &selected, style, &cleaner)
}

/// Remove numbering of any recognised style from the reported groups.
#[must_use]
pub fn strip_records(
  records: &[ContentRecord],
  config: &NumberingConfig,
  only_styles: &[String],
) -> Vec<ContentRecord> {
  let cleaner = config.cleaner().with_style(NumberingStyle::StripOnly);
  let groups = index(records, &config.index_options(), |t| cleaner.clean(t));
  let selected = select_groups(groups, only_styles);
  info!("Removing numbering from {} groups", selected.len());
  remove_numbering(records, &selected, &cleaner)
}

/// Transpose `table`.
///
/// # Errors
///
/// Returns an error if the table has merged cells and the policy is abort,
/// or if its rows differ in length.
pub fn transpose_table(table: Table, options: &TransposeOptions) -> Result<Table> {
  Ok(table.transpose(options)?)
}

/// Convert text from the text input box.
#[must_use]
pub fn edit_text(text: &str, mode: EditMode) -> String {
  match mode {
    EditMode::Decode => text_input::decode_input(text),
    EditMode::Encode => text_input::encode_soft_breaks(text),
    EditMode::Clear => text_input::clear_breaks(text),
    EditMode::AppendMarker => text_input::append_soft_break(text),
  }
}

/// Write a commented default configuration file.
///
/// # Errors
///
/// Returns an error if the file exists and `force` is not set, or if it
/// cannot be written.
pub fn init_config(output: &Path, format: &str, force: bool) -> Result<()> {
  if output.exists() && !force {
    return Err(DtpkitError::AlreadyExists(output.display().to_string()));
  }

  if let Some(parent) = output.parent()
    && !parent.as_os_str().is_empty()
    && !parent.exists()
  {
    fs::create_dir_all(parent)?;
    info!("Created directory: {}", parent.display());
  }

  Config::generate_default_config(format, output)?;
  Ok(())
}

/// Run a subcommand against a loaded configuration.
///
/// # Errors
///
/// Returns an error if input cannot be read or parsed, the algorithm rejects
/// it, or output cannot be written.
pub fn run(command: &Commands, config: &Config) -> Result<()> {
  match command {
    Commands::Index { input, output } => {
      let records: Vec<ContentRecord> = read_json(input)?;
      let groups = index_records(&records, &config.numbering);
      info!("Found {} groups of repeated text", groups.len());
      for group in &groups {
        debug!("{}", group.label());
      }
      write_json(&groups, output.as_deref())
    },

    Commands::Number {
      input,
      style,
      only_styles,
      output,
    } => {
      let records: Vec<ContentRecord> = read_json(input)?;
      let style = style.unwrap_or(config.numbering.style);
      let numbered =
        number_records(&records, &config.numbering, style, only_styles);
      write_json(&numbered, output.as_deref())
    },

    Commands::Strip {
      input,
      only_styles,
      output,
    } => {
      let records: Vec<ContentRecord> = read_json(input)?;
      let stripped = strip_records(&records, &config.numbering, only_styles);
      write_json(&stripped, output.as_deref())
    },

    Commands::Transpose {
      input,
      output,
      merge_policy,
      no_header,
    } => {
      let table: Table = read_json(input)?;
      let mut options = config.transpose;
      if let Some(policy) = merge_policy {
        options.merge_policy = *policy;
      }
      if *no_header {
        options.include_header = false;
      }
      let flipped = transpose_table(table, &options)?;
      write_json(&flipped, output.as_deref())
    },

    Commands::EditText {
      input,
      encode,
      clear,
      append_marker,
    } => {
      let text = match input {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
      };
      let mode = EditMode::from_flags(*encode, *clear, *append_marker);
      write_text(&edit_text(&text, mode), None)
    },

    Commands::Init {
      output,
      format,
      force,
    } => init_config(output, format, *force),
  }
}

fn select_groups(groups: Vec<Group>, only_styles: &[String]) -> Vec<Group> {
  if only_styles.is_empty() {
    return groups;
  }
  let wanted: HashSet<&str> = only_styles.iter().map(String::as_str).collect();
  groups
    .into_iter()
    .filter(|group| wanted.contains(group.style.as_str()))
    .collect()
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
  debug!("Reading {}", path.display());
  let content = fs::read_to_string(path)?;
  Ok(serde_json::from_str(&content)?)
}

fn write_json<T: Serialize + ?Sized>(
  value: &T,
  output: Option<&Path>,
) -> Result<()> {
  let mut content = serde_json::to_string_pretty(value)?;
  content.push('\n');
  write_text(&content, output)
}

fn write_text(content: &str, output: Option<&Path>) -> Result<()> {
  if let Some(path) = output {
    fs::write(path, content)?;
    info!("Wrote {}", path.display());
  } else {
    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
  }
  Ok(())
}
