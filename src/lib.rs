//! # Flatiron - nested JSON to flat CSV
//!
//! A library for flattening nested JSON documents (typically AWS CLI
//! describe output) into flat CSV tables.
//!
//! A colon-delimited path like `Reservations:Instances` selects the list of
//! resources to extract; each list element becomes one CSV row, with
//! nested keys collapsed into dotted column names and repeated scalar
//! values joined with `|`.
//!
//! ## Quick Start
//!
//! ```rust
//! use flatiron::{convert, FlattenConfig};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let doc = json!({
//!     "Reservations": [{
//!         "Instances": [
//!             {"Id": "i-1", "Tags": [{"Value": "a"}]},
//!             {"Id": "i-2", "Tags": [{"Value": "b"}, {"Value": "c"}]}
//!         ]
//!     }]
//! });
//!
//! let mut out = Vec::new();
//! let rows = convert(&doc, Some("Reservations:Instances"), FlattenConfig::default(), &mut out)?;
//!
//! assert_eq!(rows, 2);
//! assert_eq!(String::from_utf8(out)?, "Id,Tags.Value\ni-1,a\ni-2,b|c\n");
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};
use serde_json::Value;
use std::io::Write;

pub mod flatten;

// Re-export commonly used types for convenience
pub use flatten::{parse_path, FlatTable, FlattenConfig, FlattenError, JsonFlattener, Record, TableWriter};

/// Main entry point: flatten a parsed JSON document and write it as CSV.
///
/// Returns the number of records written. The CSV header is the sorted,
/// deduplicated union of every key across all records.
pub fn convert<W: Write>(
    value: &Value,
    raw_path: Option<&str>,
    config: FlattenConfig,
    sink: W,
) -> Result<usize> {
    let path = parse_path(raw_path);

    let flattener = JsonFlattener::new(config);
    let table = flattener
        .flatten(value, &path)
        .context("failed to flatten JSON document")?;

    let mut writer = TableWriter::new(sink);
    writer.write_table(&table.records, &table.header())?;

    Ok(table.records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_convert_end_to_end() {
        let doc = json!({
            "Volumes": [
                {"Id": "vol-1", "Size": 8},
                {"Id": "vol-2", "State": "in-use"}
            ]
        });

        let mut out = Vec::new();
        let rows = convert(&doc, Some("Volumes"), FlattenConfig::default(), &mut out).unwrap();

        assert_eq!(rows, 2);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Id,Size,State\nvol-1,8,\nvol-2,,in-use\n"
        );
    }

    #[test]
    fn test_convert_without_path() {
        let doc = json!({"A": {"B": 1, "C": 2}});

        let mut out = Vec::new();
        let rows = convert(&doc, None, FlattenConfig::default(), &mut out).unwrap();

        assert_eq!(rows, 1);
        assert_eq!(String::from_utf8(out).unwrap(), "A.B,A.C\n1,2\n");
    }

    #[test]
    fn test_convert_missing_path_writes_nothing() {
        let doc = json!({"A": 1});

        let mut out = Vec::new();
        let rows = convert(&doc, Some("Nope"), FlattenConfig::default(), &mut out).unwrap();

        assert_eq!(rows, 0);
        assert!(out.is_empty());
    }
}
