use crate::flatten::types::{FlatTable, FlattenConfig, FlattenError, Record};
use serde_json::Value;
use std::collections::BTreeSet;
use std::mem;

/// The core flattener that collapses nested JSON into flat records
pub struct JsonFlattener {
    config: FlattenConfig,
}

/// All mutable state for one flatten call, owned by the entry point and
/// threaded down the recursion by unique reference.
#[derive(Default)]
struct Accumulator {
    /// The record currently being built
    current: Record,
    /// Finished records, one per resource
    records: Vec<Record>,
    /// Union of every dotted key seen across all records
    keys: BTreeSet<String>,
    /// Set when the final waypoint selected a non-array value, whose single
    /// record is finalized by the entry point
    single_record_pending: bool,
}

impl JsonFlattener {
    pub fn new(config: FlattenConfig) -> Self {
        JsonFlattener { config }
    }

    /// Flatten a JSON value into records, optionally descending through
    /// `path` first.
    ///
    /// With an empty path the whole document becomes a single record. With a
    /// path, each element of the list at the path's end becomes one record.
    /// A path segment absent from the data yields an empty table, not an
    /// error.
    pub fn flatten(&self, value: &Value, path: &[String]) -> Result<FlatTable, FlattenError> {
        let mut acc = Accumulator::default();
        self.flatten_value(value, "", path, false, 0, &mut acc)?;

        if path.is_empty() {
            // A non-array root never crosses a record boundary, so the one
            // in-progress record is finalized here. An array root is its own
            // record boundary and has already appended its records.
            if !value.is_array() {
                acc.records.push(mem::take(&mut acc.current));
            }
        } else if acc.single_record_pending {
            // The final waypoint pointed at a non-array value; finalize the
            // single record built from that subtree. A partial record left
            // behind by a faulted list element is never finalized.
            acc.records.push(mem::take(&mut acc.current));
        }

        Ok(FlatTable {
            records: acc.records,
            keys: acc.keys,
        })
    }

    fn flatten_value(
        &self,
        value: &Value,
        key_prefix: &str,
        path: &[String],
        in_list: bool,
        depth: usize,
        acc: &mut Accumulator,
    ) -> Result<(), FlattenError> {
        if depth > self.config.max_depth {
            return Err(FlattenError::MaxDepthExceeded(self.config.max_depth));
        }

        match value {
            Value::Object(obj) => {
                for (key, inner) in obj {
                    match path.first() {
                        Some(waypoint) if waypoint == key => {
                            if path.len() > 1 {
                                // Waypoint matched, keep navigating
                                self.flatten_value(
                                    inner,
                                    key_prefix,
                                    &path[1..],
                                    in_list,
                                    depth + 1,
                                    acc,
                                )?;
                            } else {
                                // Final waypoint: this subtree is the
                                // flattening root for the output records
                                acc.current = Record::default();
                                acc.single_record_pending = false;
                                self.flatten_value(inner, "", &[], false, depth + 1, acc)?;
                                if !inner.is_array() {
                                    acc.single_record_pending = true;
                                }
                            }
                        }
                        // Off-path keys are pruned while navigating
                        Some(_) => {}
                        None => {
                            let child_key = if key_prefix.is_empty() {
                                key.clone()
                            } else {
                                format!("{key_prefix}{}{key}", self.config.key_separator)
                            };
                            self.flatten_value(inner, &child_key, path, in_list, depth + 1, acc)?;
                        }
                    }
                }
            }
            Value::Array(items) => {
                for (idx, item) in items.iter().enumerate() {
                    if let Err(err) =
                        self.flatten_value(item, key_prefix, path, true, depth + 1, acc)
                    {
                        // One malformed element must not abort the whole
                        // conversion
                        log::warn!("skipping list element {idx}: {err}");
                        continue;
                    }
                    if path.is_empty() && key_prefix.is_empty() {
                        // Record boundary: one record per element of the
                        // resource list. Lists crossed while the path is
                        // still being navigated are not boundaries.
                        acc.records.push(mem::take(&mut acc.current));
                    }
                }
            }
            Value::String(s) => self.write_scalar(key_prefix, s.clone(), in_list, acc),
            Value::Number(n) => self.write_scalar(key_prefix, n.to_string(), in_list, acc),
            Value::Bool(b) => self.write_scalar(key_prefix, b.to_string(), in_list, acc),
            Value::Null => self.write_scalar(key_prefix, String::new(), in_list, acc),
        }

        Ok(())
    }

    /// Set a scalar on the current record, joining repeated values for the
    /// same key with the multi-value separator when inside a list context.
    fn write_scalar(&self, full_key: &str, value: String, in_list: bool, acc: &mut Accumulator) {
        if in_list {
            if let Some(existing) = acc.current.get_mut(full_key) {
                if !existing.is_empty() {
                    existing.push_str(&self.config.multi_value_separator);
                    existing.push_str(&value);
                    return;
                }
            }
        }
        acc.current.insert(full_key, value);
        let _ = acc.keys.insert(full_key.to_string());
    }
}
