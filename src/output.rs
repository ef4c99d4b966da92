//! Output rendering.
//!
//! JSON rendering is always available. Table rendering is a build-time
//! capability behind the `table` feature; callers check
//! [`ensure_supported`] up front so an unsupported format is reported
//! before any request is made.

use crate::error::{CatchError, CatchResult};
use serde_json::Value;

/// Output format for result data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// Plain-text table (requires the `table` feature)
    Table,
}

/// Whether this build can render tables
pub fn table_supported() -> bool {
    cfg!(feature = "table")
}

/// Fail early when the requested format is not available in this build
pub fn ensure_supported(format: Format) -> CatchResult<()> {
    if format == Format::Table && !table_supported() {
        return Err(CatchError::FormatUnsupported {
            format: "table".to_string(),
        });
    }
    Ok(())
}

/// Render a JSON value in the requested format
pub fn render(value: &Value, format: Format) -> CatchResult<String> {
    match format {
        Format::Json => Ok(serde_json::to_string_pretty(value)?),
        Format::Table => render_table(value),
    }
}

/// Render an array of observation records as a table.
///
/// Columns are the union of record keys in first-seen order; missing
/// cells are left blank.
#[cfg(feature = "table")]
fn render_table(value: &Value) -> CatchResult<String> {
    use comfy_table::Table;

    let records = match value {
        Value::Array(records) => records.as_slice(),
        // a single object renders as a one-row table
        Value::Object(_) => std::slice::from_ref(value),
        _ => {
            return Err(CatchError::Serialization(
                "table output requires a JSON object or array of objects".to_string(),
            ))
        }
    };

    let mut columns: Vec<String> = Vec::new();
    for record in records {
        if let Value::Object(map) = record {
            for key in map.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
    }

    let mut table = Table::new();
    table.set_header(columns.clone());

    for record in records {
        let cells: Vec<String> = columns
            .iter()
            .map(|column| match record.get(column) {
                None | Some(Value::Null) => String::new(),
                Some(Value::String(s)) => s.clone(),
                Some(other) => other.to_string(),
            })
            .collect();
        table.add_row(cells);
    }

    Ok(table.to_string())
}

#[cfg(not(feature = "table"))]
fn render_table(_value: &Value) -> CatchResult<String> {
    Err(CatchError::FormatUnsupported {
        format: "table".to_string(),
    })
}
