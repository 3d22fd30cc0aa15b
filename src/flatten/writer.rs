use crate::flatten::types::Record;
use anyhow::{Context, Result};
use std::io::Write;

/// Writes flattened records as a CSV table
pub struct TableWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> TableWriter<W> {
    pub fn new(sink: W) -> Self {
        TableWriter {
            writer: csv::Writer::from_writer(sink),
        }
    }

    /// Write one header row from `keys`, then one row per record.
    ///
    /// The header is written in exactly the order passed; sorting is the
    /// caller's concern. A record missing a key renders that cell as the
    /// empty string. A row that fails to serialize is logged and skipped,
    /// never fatal.
    pub fn write_table(&mut self, records: &[Record], keys: &[&str]) -> Result<()> {
        if keys.is_empty() {
            // Nothing was extracted; leave the output empty
            return Ok(());
        }

        self.writer
            .write_record(keys)
            .context("failed to write CSV header")?;

        for record in records {
            let row: Vec<&str> = keys.iter().map(|key| record.get(key).unwrap_or("")).collect();
            if let Err(err) = self.writer.write_record(&row) {
                log::warn!("skipping row that failed to serialize: {err}");
            }
        }

        self.writer.flush().context("failed to flush CSV output")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> Record {
        let mut record = Record::default();
        for (key, value) in pairs {
            record.insert(*key, *value);
        }
        record
    }

    fn write_to_string(records: &[Record], keys: &[&str]) -> String {
        let mut buffer = Vec::new();
        TableWriter::new(&mut buffer)
            .write_table(records, keys)
            .unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_header_and_rows() {
        let records = vec![
            record(&[("Id", "i-1"), ("Zone", "us-east-1a")]),
            record(&[("Id", "i-2"), ("Zone", "us-east-1b")]),
        ];

        let output = write_to_string(&records, &["Id", "Zone"]);

        assert_eq!(output, "Id,Zone\ni-1,us-east-1a\ni-2,us-east-1b\n");
    }

    #[test]
    fn test_missing_key_renders_empty() {
        let records = vec![record(&[("Id", "i-1")])];

        let output = write_to_string(&records, &["Id", "Zone"]);

        assert_eq!(output, "Id,Zone\ni-1,\n");
    }

    #[test]
    fn test_fields_are_csv_escaped() {
        let records = vec![record(&[("Name", "a,b"), ("Desc", "say \"hi\"")])];

        let output = write_to_string(&records, &["Desc", "Name"]);

        assert_eq!(output, "Desc,Name\n\"say \"\"hi\"\"\",\"a,b\"\n");
    }

    #[test]
    fn test_no_records_writes_header_only() {
        let output = write_to_string(&[], &["Id"]);

        assert_eq!(output, "Id\n");
    }

    #[test]
    fn test_empty_table_writes_nothing() {
        let output = write_to_string(&[], &[]);

        assert!(output.is_empty());
    }

    #[test]
    fn test_header_order_is_preserved() {
        let records = vec![record(&[("a", "1"), ("b", "2")])];

        let output = write_to_string(&records, &["b", "a"]);

        assert_eq!(output, "b,a\n2,1\n");
    }
}
