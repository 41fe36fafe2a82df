//! In-memory tabular data model shared by every pipeline stage.
//!
//! A [`Dataset`] is one ingested CSV file: a canonical key, normalized column
//! labels, and rows of typed cells. A cell is `Option<Value>` where `None`
//! marks a missing value, so downstream consumers never see per-source null
//! spellings. A [`DatasetCollection`] owns every dataset for one load cycle.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Value {
    pub fn as_display(&self) -> String {
        match self {
            Value::Text(s) => s.clone(),
            Value::Number(n) => {
                if n.fract() == 0.0 {
                    format!("{n:.0}")
                } else {
                    n.to_string()
                }
            }
            Value::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(d) => Some(*d),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_display())
    }
}

pub type Cell = Option<Value>;

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub key: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Dataset {
    pub fn new(key: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            key: key.into(),
            columns,
            rows: Vec::new(),
        }
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Iterates the non-missing cells of a named column. Returns `None` when
    /// the column is absent so callers can degrade instead of failing.
    pub fn column_values<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value>> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .filter_map(move |row| row.get(idx).and_then(|cell| cell.as_ref())),
        )
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Value> {
        let idx = self.column_index(column)?;
        self.rows.get(row)?.get(idx)?.as_ref()
    }
}

/// Mapping from canonical dataset key to dataset, owned by one load cycle.
#[derive(Debug, Clone, Default)]
pub struct DatasetCollection {
    datasets: HashMap<String, Dataset>,
}

impl DatasetCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a dataset under its key. A duplicate key overwrites the
    /// earlier dataset (last-write-wins).
    pub fn insert(&mut self, dataset: Dataset) {
        self.datasets.insert(dataset.key.clone(), dataset);
    }

    pub fn get(&self, key: &str) -> Option<&Dataset> {
        self.datasets.get(key)
    }

    /// Returns the dataset only when it is present and holds at least one row.
    pub fn get_non_empty(&self, key: &str) -> Option<&Dataset> {
        self.datasets.get(key).filter(|d| !d.is_empty())
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.datasets.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Dataset)> {
        self.datasets.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut dataset = Dataset::new(
            "all_employees",
            vec!["name".to_string(), "salary".to_string()],
        );
        dataset.rows.push(vec![
            Some(Value::Text("Ada".to_string())),
            Some(Value::Number(90_000.0)),
        ]);
        dataset
            .rows
            .push(vec![Some(Value::Text("Grace".to_string())), None]);
        dataset
    }

    #[test]
    fn column_values_skips_missing_cells() {
        let dataset = sample();
        let salaries: Vec<f64> = dataset
            .column_values("salary")
            .expect("salary column")
            .filter_map(|v| v.as_number())
            .collect();
        assert_eq!(salaries, vec![90_000.0]);
    }

    #[test]
    fn column_values_is_none_for_unknown_column() {
        let dataset = sample();
        assert!(dataset.column_values("department").is_none());
    }

    #[test]
    fn collection_insert_is_last_write_wins() {
        let mut collection = DatasetCollection::new();
        collection.insert(sample());
        let mut replacement = Dataset::new("all_employees", vec!["name".to_string()]);
        replacement
            .rows
            .push(vec![Some(Value::Text("Lin".to_string()))]);
        collection.insert(replacement);

        assert_eq!(collection.len(), 1);
        let kept = collection.get("all_employees").expect("dataset");
        assert_eq!(kept.columns, vec!["name".to_string()]);
        assert_eq!(kept.row_count(), 1);
    }

    #[test]
    fn number_display_drops_trailing_zero_fraction() {
        assert_eq!(Value::Number(1234.0).as_display(), "1234");
        assert_eq!(Value::Number(12.5).as_display(), "12.5");
    }
}
