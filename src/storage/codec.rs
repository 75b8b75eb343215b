//! Line codec for the comma-delimited tables.
//!
//! Rows are written as `field, field, field`. A field that contains a comma,
//! a space or a double quote is wrapped in double quotes, with embedded quotes
//! doubled (`""`). The splitter keeps quoted commas inside their field.

pub const FIELD_SEPARATOR: &str = ", ";

/// Prepares a single value for writing.
pub fn lint_field(value: &str) -> String {
    let value = value.trim();
    if value.contains([',', ' ', '"']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Joins a row into one line (without the trailing newline).
pub fn format_row<S: AsRef<str>>(fields: &[S]) -> String {
    fields
        .iter()
        .map(|field| lint_field(field.as_ref()))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// Splits a line on commas outside double quotes. Fields are trimmed and
/// their wrapping quotes removed.
pub fn split_line(line: &str) -> Vec<String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                fields.push(current.trim().to_string());
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    fields.push(current.trim().to_string());
    fields
}
