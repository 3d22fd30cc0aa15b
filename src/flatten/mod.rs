//! JSON flattening - collapse nested JSON into flat, CSV-ready records
//!
//! This module handles the conversion of nested JSON structures (typically
//! AWS CLI describe output) into flat records of dotted-key/scalar pairs,
//! plus the deduplicated header set needed for tabular output.

pub mod types;
pub mod path;
pub mod flattener;
pub mod writer;

pub use types::{FlatTable, FlattenConfig, FlattenError, Record};
pub use path::parse_path;
pub use flattener::JsonFlattener;
pub use writer::TableWriter;
