//! Value cleaning: null normalization, text trimming, and type coercion.
//!
//! Cleaning is a pure transform: it consumes a raw dataset and returns a new
//! one with typed cells. Coercion never raises; a cell that fails to parse as
//! its hinted type degrades to missing so partially-valid rows are retained.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::dataset::{Cell, Dataset, DatasetCollection, Value};

/// Tokens treated as missing wherever they appear, compared case-sensitively.
pub const NULL_TOKENS: &[&str] = &["NULL", "null", "", "NA", "N/A", "NaN", "nan"];

/// Textual values that become missing after trimming and dequoting.
const POST_TRIM_NULL_TOKENS: &[&str] = &["None", "<NA>"];

/// Fixed upstream export date pattern, e.g. `17-JUN-03`.
pub const DATE_FORMAT: &str = "%d-%b-%y";

/// Column names coerced to dates unless overridden.
pub const DEFAULT_DATE_COLUMNS: &[&str] = &[
    "hire_date",
    "start_date",
    "end_date",
    "date_of_birth",
    "exit_date",
    "last_promotion_date",
];

/// HR-domain column names coerced to numbers. Classification is name-driven:
/// an unrecognized column stays textual even if its values look numeric.
pub const DEFAULT_NUMERIC_COLUMNS: &[&str] = &[
    "employee_count",
    "salary",
    "avg_salary",
    "min_salary",
    "max_salary",
    "median_salary",
    "tenure",
    "growth_%",
    "turnover_rate_(%)",
    "average_salary",
    "avg_experience_(years)",
    "age",
    "performance_rating",
    "bonus",
    "compensation",
    "fte",
];

fn currency_chars() -> &'static Regex {
    static CURRENCY_CHARS: OnceLock<Regex> = OnceLock::new();
    CURRENCY_CHARS.get_or_init(|| Regex::new(r#"["$,]"#).expect("valid currency pattern"))
}

/// Per-column type classification used while cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnHint {
    Date,
    Numeric,
    Text,
}

/// Column sets driving coercion. Extra names are merged with the built-in
/// defaults; defaults are always retained.
#[derive(Debug, Clone)]
pub struct CleanOptions {
    date_columns: BTreeSet<String>,
    numeric_columns: BTreeSet<String>,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            date_columns: DEFAULT_DATE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            numeric_columns: DEFAULT_NUMERIC_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_date_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.date_columns.extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn with_numeric_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.numeric_columns
            .extend(columns.into_iter().map(Into::into));
        self
    }

    pub fn hint_for(&self, column: &str) -> ColumnHint {
        if self.date_columns.contains(column) {
            ColumnHint::Date
        } else if self.numeric_columns.contains(column) {
            ColumnHint::Numeric
        } else {
            ColumnHint::Text
        }
    }
}

/// Cleans one dataset, returning a new table with typed cells.
pub fn clean_dataset(dataset: &Dataset, options: &CleanOptions) -> Dataset {
    let hints: Vec<ColumnHint> = dataset
        .columns
        .iter()
        .map(|column| options.hint_for(column))
        .collect();

    let mut cleaned = Dataset::new(dataset.key.clone(), dataset.columns.clone());
    cleaned.rows = dataset
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(idx, cell)| {
                    let hint = hints.get(idx).copied().unwrap_or(ColumnHint::Text);
                    clean_cell(cell, hint)
                })
                .collect()
        })
        .collect();
    cleaned
}

/// Cleans every dataset in a collection.
pub fn clean_collection(collection: &DatasetCollection, options: &CleanOptions) -> DatasetCollection {
    let mut cleaned = DatasetCollection::new();
    for (_, dataset) in collection.iter() {
        cleaned.insert(clean_dataset(dataset, options));
    }
    cleaned
}

fn clean_cell(cell: &Cell, hint: ColumnHint) -> Cell {
    let raw = match cell {
        None => return None,
        Some(Value::Text(s)) => s.as_str(),
        // Already-typed cells pass through untouched.
        Some(other) => return Some(other.clone()),
    };
    if NULL_TOKENS.contains(&raw) {
        return None;
    }
    match hint {
        ColumnHint::Text => clean_text(raw),
        ColumnHint::Date => coerce_date(raw),
        ColumnHint::Numeric => coerce_number(raw),
    }
}

fn clean_text(raw: &str) -> Cell {
    let stripped = raw.trim().replace('"', "");
    if POST_TRIM_NULL_TOKENS.contains(&stripped.as_str()) {
        return None;
    }
    Some(Value::Text(stripped))
}

/// Parses the fixed day-abbreviatedMonth-twoDigitYear pattern; anything else
/// degrades to missing. Cells are trimmed and dequoted first, the same
/// pre-pass textual cells receive.
pub fn coerce_date(raw: &str) -> Cell {
    let stripped = raw.trim().replace('"', "");
    NaiveDate::parse_from_str(stripped.trim(), DATE_FORMAT)
        .ok()
        .map(Value::Date)
}

/// Strips literal quotes, currency symbols, and thousands separators, then
/// parses as a number; anything else degrades to missing.
pub fn coerce_number(raw: &str) -> Cell {
    let stripped = currency_chars().replace_all(raw.trim(), "");
    stripped.trim().parse::<f64>().ok().map(Value::Number)
}
