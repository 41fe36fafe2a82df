//! Dataset registry: scans a directory and parses each tabular file.
//!
//! One [`Dataset`] is produced per recognized file (non-recursive). A file
//! that fails to parse is skipped with a warning; a missing or empty
//! directory yields an empty collection rather than an error, leaving the
//! "no data" decision to the caller.

use std::path::Path;

use anyhow::{Context, Result};
use encoding_rs::Encoding;
use log::{debug, warn};

use crate::{
    dataset::{Dataset, DatasetCollection, Value},
    io_utils, normalize,
};

/// Options controlling how raw files are read.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoadOptions {
    /// Overrides extension-based delimiter detection for every file.
    pub delimiter: Option<u8>,
}

/// Loads every `.csv`/`.tsv` file in `dir` into a raw dataset collection.
/// Cells are untyped text at this stage; the value cleaner assigns types.
pub fn load_directory(
    dir: &Path,
    encoding: &'static Encoding,
    options: &LoadOptions,
) -> DatasetCollection {
    let mut collection = DatasetCollection::new();
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            warn!("Data directory {dir:?} is not readable: {err}");
            return collection;
        }
    };

    let mut paths: Vec<_> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && io_utils::is_tabular_file(path))
        .collect();
    // Deterministic last-write-wins ordering for duplicate keys.
    paths.sort();

    for path in paths {
        match load_file(&path, encoding, options) {
            Ok(dataset) => {
                debug!(
                    "Loaded '{}' ({} row(s), {} column(s))",
                    dataset.key,
                    dataset.row_count(),
                    dataset.columns.len()
                );
                collection.insert(dataset);
            }
            Err(err) => {
                warn!(
                    "Skipping {:?}: {err:#}",
                    path.file_name().unwrap_or(path.as_os_str())
                );
            }
        }
    }
    collection
}

/// Parses one tabular file into a raw dataset with normalized column labels.
pub fn load_file(
    path: &Path,
    encoding: &'static Encoding,
    options: &LoadOptions,
) -> Result<Dataset> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .with_context(|| format!("Deriving dataset key from {path:?}"))?;
    let key = normalize::dataset_key(stem);

    let delimiter = io_utils::resolve_input_delimiter(path, options.delimiter);
    let mut reader = io_utils::open_csv_reader(path, delimiter)?;
    let headers = io_utils::reader_headers(&mut reader, encoding)
        .with_context(|| format!("Reading headers from {path:?}"))?;
    let columns = normalize::normalize_headers(&headers);

    let mut dataset = Dataset::new(key, columns);
    for (row_idx, record) in reader.byte_records().enumerate() {
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let decoded = io_utils::decode_record(&record, encoding)
            .with_context(|| format!("Decoding row {}", row_idx + 2))?;
        let row = decoded
            .into_iter()
            .map(|field| Some(Value::Text(field)))
            .collect();
        dataset.rows.push(row);
    }
    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;
    use std::fs;

    #[test]
    fn missing_directory_yields_empty_collection() {
        let collection = load_directory(
            Path::new("/nonexistent/hr_exports"),
            UTF_8,
            &LoadOptions::default(),
        );
        assert!(collection.is_empty());
    }

    #[test]
    fn ragged_file_is_rejected_with_cause() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("broken.csv");
        fs::write(&path, "a,b\n1,2,3\n").expect("write fixture");
        let err = load_file(&path, UTF_8, &LoadOptions::default())
            .expect_err("ragged row should fail");
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn file_key_and_headers_are_canonical() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("Top-Salaries.csv");
        fs::write(&path, "Name,Salary\nAda,120000\n").expect("write fixture");
        let dataset = load_file(&path, UTF_8, &LoadOptions::default()).expect("load");
        assert_eq!(dataset.key, "top_salaries");
        assert_eq!(dataset.columns, vec!["name", "salary"]);
        assert_eq!(dataset.row_count(), 1);
    }
}
