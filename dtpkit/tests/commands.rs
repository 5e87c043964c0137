#![allow(clippy::expect_used, reason = "Fine in tests")]
use std::fs;

use dtpkit::{cli::Commands, commands, error::DtpkitError};
use dtpkit_config::Config;
use dtpkit_core::{ContentRecord, Group, NumberingStyle, Table};
use tempfile::tempdir;

const RECORDS: &str = r#"[
  {"style": "h1", "raw_text": "Chapter one\r", "level": 1, "source_index": 0},
  {"style": "body", "raw_text": "Item(4)\r", "source_index": 1},
  {"style": "body", "raw_text": "Item(9)\r", "source_index": 2},
  {"style": "body", "raw_text": "Item\r", "source_index": 3},
  {"style": "h1", "raw_text": "Chapter two\r", "level": 1, "source_index": 4},
  {"style": "body", "raw_text": "Item\r", "source_index": 5},
  {"style": "p.img", "raw_text": "Figure\r", "source_index": 6},
  {"style": "p.img", "raw_text": "Figure\r", "source_index": 7}
]"#;

#[test]
fn test_index_writes_groups() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input = temp_dir.path().join("records.json");
  let output = temp_dir.path().join("groups.json");
  fs::write(&input, RECORDS).expect("Failed to write records in test");

  commands::run(
    &Commands::Index {
      input,
      output: Some(output.clone()),
    },
    &Config::default(),
  )
  .expect("Index should succeed");

  let groups: Vec<Group> = serde_json::from_str(
    &fs::read_to_string(&output).expect("Failed to read output"),
  )
  .expect("Output should be valid JSON");

  // "Item" repeats only under the first chapter; figures are excluded
  assert_eq!(groups.len(), 1);
  assert_eq!(groups[0].text, "Item");
  assert_eq!(groups[0].members, vec![1, 2, 3]);
}

#[test]
fn test_number_uses_config_style_and_override() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input = temp_dir.path().join("records.json");
  let output = temp_dir.path().join("numbered.json");
  fs::write(&input, RECORDS).expect("Failed to write records in test");

  let mut config = Config::default();
  config
    .apply_overrides(&["numbering.style=full-width-decimal".to_string()])
    .expect("Override should apply");

  commands::run(
    &Commands::Number {
      input:       input.clone(),
      style:       None,
      only_styles: Vec::new(),
      output:      Some(output.clone()),
    },
    &config,
  )
  .expect("Number should succeed");

  let records: Vec<ContentRecord> = serde_json::from_str(
    &fs::read_to_string(&output).expect("Failed to read output"),
  )
  .expect("Output should be valid JSON");
  let texts: Vec<&str> = records.iter().map(|r| r.raw_text.as_str()).collect();
  assert_eq!(texts[1..4], ["Item（1）\r", "Item（2）\r", "Item（3）\r"]);
  assert_eq!(texts[5], "Item\r");

  commands::run(
    &Commands::Number {
      input,
      style: Some(NumberingStyle::DashDecimal),
      only_styles: Vec::new(),
      output: Some(output.clone()),
    },
    &config,
  )
  .expect("Number should succeed");

  let records: Vec<ContentRecord> = serde_json::from_str(
    &fs::read_to_string(&output).expect("Failed to read output"),
  )
  .expect("Output should be valid JSON");
  assert_eq!(records[3].raw_text, "Item- 3\r");
}

#[test]
fn test_transpose_respects_merge_policy() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input = temp_dir.path().join("table.json");
  let output = temp_dir.path().join("flipped.json");
  fs::write(
    &input,
    r#"{
      "rows": [
        [{"contents": "Merged", "column_span": 2}, {"contents": ""}],
        [{"contents": "a"}, {"contents": "b"}]
      ],
      "header_row_count": 1
    }"#,
  )
  .expect("Failed to write table in test");

  let mut config = Config::default();
  config
    .apply_overrides(&["transpose.merge_policy=abort".to_string()])
    .expect("Override should apply");

  let err = commands::run(
    &Commands::Transpose {
      input:        input.clone(),
      output:       Some(output.clone()),
      merge_policy: None,
      no_header:    false,
    },
    &config,
  )
  .expect_err("Merged cells should abort");
  assert!(matches!(err, DtpkitError::Transpose(_)));
  assert!(!output.exists());

  commands::run(
    &Commands::Transpose {
      input,
      output: Some(output.clone()),
      merge_policy: Some(dtpkit_core::transpose::MergePolicy::Unmerge),
      no_header: true,
    },
    &config,
  )
  .expect("Unmerge should succeed");

  let table: Table = serde_json::from_str(
    &fs::read_to_string(&output).expect("Failed to read output"),
  )
  .expect("Output should be valid JSON");
  assert_eq!(table.rows.len(), 2);
  assert_eq!(table.rows[0][0].payload.contents, "Merged");
  assert_eq!(table.rows[0][1].payload.contents, "a");
  assert!(!table.has_merged_cells());
  assert_eq!(table.header_row_count, 0);
}

#[test]
fn test_init_refuses_to_overwrite() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let output = temp_dir.path().join("nested").join("dtpkit.json");

  commands::init_config(&output, "json", false).expect("Init should succeed");
  let loaded = Config::from_file(&output).expect("Generated config loads");
  assert_eq!(loaded, Config::default());

  let err = commands::init_config(&output, "json", false)
    .expect_err("Existing file should be kept");
  assert!(matches!(err, DtpkitError::AlreadyExists(_)));

  commands::init_config(&output, "json", true).expect("Force should overwrite");
}

#[test]
fn test_edit_text_reads_file() {
  let temp_dir = tempdir().expect("Failed to create temp dir in test");
  let input = temp_dir.path().join("text.txt");
  fs::write(&input, "line@#next").expect("Failed to write text in test");

  commands::run(
    &Commands::EditText {
      input:         Some(input),
      encode:        false,
      clear:         true,
      append_marker: false,
    },
    &Config::default(),
  )
  .expect("Edit text should succeed");
}
