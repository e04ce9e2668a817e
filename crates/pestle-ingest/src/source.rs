//! Tabular source reader.

use std::path::Path;

use tracing::warn;

use pestle_core::RawRecord;

use crate::error::IngestResult;

/// Rows read from a source file plus the count of rows that would not parse.
#[derive(Debug, Default)]
pub struct SourceBatch {
    pub records: Vec<RawRecord>,
    pub malformed: usize,
}

impl SourceBatch {
    pub fn from_records(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            malformed: 0,
        }
    }

    pub fn rows_read(&self) -> usize {
        self.records.len() + self.malformed
    }
}

/// Read a drug CSV export.
///
/// Columns are matched by header name; missing columns come through as empty
/// strings and unknown columns are ignored. A row that fails to parse is
/// dropped with a warning instead of aborting the run.
pub fn read_records(path: &Path) -> IngestResult<SourceBatch> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;

    let mut batch = SourceBatch::default();
    for (index, row) in reader.deserialize::<RawRecord>().enumerate() {
        match row {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                // Header occupies line 1.
                warn!(line = index + 2, "skipping malformed row: {}", e);
                batch.malformed += 1;
            }
        }
    }
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn reads_rows_by_header_name() {
        let file = write_csv(
            b"drug_name,generic_name,rating,no_of_reviews,medical_condition\n\
              Aspirin,aspirin,4.5,120,Pain\n",
        );
        let batch = read_records(file.path()).unwrap();

        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.malformed, 0);
        assert_eq!(batch.records[0].drug_name, "Aspirin");
        assert_eq!(batch.records[0].rating, "4.5");
        // Column absent from the file.
        assert_eq!(batch.records[0].side_effects, "");
    }

    #[test]
    fn unknown_columns_are_ignored() {
        let file = write_csv(b"drug_name,unrelated\nAspirin,whatever\n");
        let batch = read_records(file.path()).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].drug_name, "Aspirin");
    }

    #[test]
    fn short_rows_fill_missing_fields() {
        let file = write_csv(b"drug_name,generic_name,rating\nAspirin\n");
        let batch = read_records(file.path()).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].generic_name, "");
    }

    #[test]
    fn unreadable_rows_are_counted_not_fatal() {
        let file = write_csv(b"drug_name,rating\nAspirin,4.5\n\xff\xfe,3\n");
        let batch = read_records(file.path()).unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.malformed, 1);
        assert_eq!(batch.rows_read(), 2);
    }

    #[test]
    fn missing_file_is_an_error() {
        let missing = std::path::Path::new("/definitely/not/here.csv");
        assert!(read_records(missing).is_err());
    }
}
