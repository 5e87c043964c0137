use std::fmt;

/// Error type for template operations.
#[derive(Debug)]
pub enum TemplateError {
  /// The requested configuration format is not supported.
  UnsupportedFormat(String),
}

impl fmt::Display for TemplateError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::UnsupportedFormat(format) => {
        write!(f, "Unsupported config format: {format}")
      },
    }
  }
}

impl std::error::Error for TemplateError {}

/// Default configuration template in TOML, commented so that every field is
/// explained where it is set.
pub const DEFAULT_TOML_TEMPLATE: &str = r#"# dtpkit configuration file

[numbering]
# Numbering style applied by `dtpkit number`. One of:
#   decimal             Text(1)
#   full-width-decimal  Text（1）
#   alpha               Text(A)
#   roman-upper         Text(I)
#   roman-lower         Text(i)
#   part-decimal        Text part 1
#   part-roman          Text part I
#   pt-decimal          Text Pt. 1
#   dash-decimal        Text- 1
#   counter-word        Textその1
#   none                strip existing numbering only
style = "decimal"

# Styles whose existing numbering is stripped before paragraphs are compared.
# The style above is always recognised as well.
recognize = ["decimal"]

# Paragraph styles that never take part in numbering
excluded_styles = ["p.img", "p.table"]

# Number repeated paragraphs separately under each heading
hierarchy_aware = true

[transpose]
# What to do with merged cells: "unmerge" splits them first, "abort" refuses
merge_policy = "unmerge"

# Carry header and footer row counts over to the transposed table
include_header = true
"#;

/// Default configuration template in JSON.
pub const DEFAULT_JSON_TEMPLATE: &str = r#"{
  "numbering": {
    "style": "decimal",
    "recognize": ["decimal"],
    "excluded_styles": ["p.img", "p.table"],
    "hierarchy_aware": true
  },
  "transpose": {
    "merge_policy": "unmerge",
    "include_header": true
  }
}
"#;

/// Get the default configuration template for `format`.
///
/// # Errors
///
/// Returns an error if the requested format is not supported.
pub fn get_template(format: &str) -> Result<&'static str, TemplateError> {
  match format.to_lowercase().as_str() {
    "toml" => Ok(DEFAULT_TOML_TEMPLATE),
    "json" => Ok(DEFAULT_JSON_TEMPLATE),
    _ => Err(TemplateError::UnsupportedFormat(format.to_string())),
  }
}
