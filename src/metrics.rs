//! Summary metric derivation over a cleaned dataset collection.
//!
//! Each metric is independently optional: when its source dataset or columns
//! are absent it reports [`MetricValue::Unavailable`] instead of failing, so
//! a caller can render a partial metrics panel. Fallback chains are expressed
//! as ordered `(dataset, column)` candidate lists resolved first-success-wins.

use std::fmt;

use chrono::{Local, NaiveDate};
use itertools::Itertools;
use serde::{Serialize, Serializer};

use crate::dataset::{Dataset, DatasetCollection};

pub const EMPLOYEE_ROSTER_KEY: &str = "all_employees";
pub const SALARY_STATISTICS_KEY: &str = "job_salary_statistics";
pub const DEPARTMENT_SALARY_KEY: &str = "department_salary_analysis";
pub const TURNOVER_KEY: &str = "job_turnover_analysis";
pub const TENURE_KEY: &str = "tenure_comparison";
pub const LOCATION_REPORT_KEY: &str = "location_employee_report";

/// Location column names tried in priority order.
const LOCATION_COLUMNS: &[&str] = &["city", "region", "location_name"];
const ROSTER_LOCATION_COLUMNS: &[&str] = &["city", "region", "location"];

/// A derived scalar, or an explicit marker that its inputs were missing.
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Count(usize),
    Currency(f64),
    Years(f64),
    Label(String),
    Unavailable,
}

impl MetricValue {
    pub fn is_available(&self) -> bool {
        !matches!(self, MetricValue::Unavailable)
    }
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(n) => write!(f, "{}", group_thousands(*n as f64)),
            MetricValue::Currency(v) => write!(f, "${}", group_thousands(*v)),
            MetricValue::Years(v) => write!(f, "{v:.1} Yrs"),
            MetricValue::Label(s) => write!(f, "{s}"),
            MetricValue::Unavailable => write!(f, "N/A"),
        }
    }
}

impl Serialize for MetricValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            MetricValue::Count(n) => serializer.serialize_u64(*n as u64),
            MetricValue::Currency(v) | MetricValue::Years(v) => serializer.serialize_f64(*v),
            MetricValue::Label(s) => serializer.serialize_str(s),
            MetricValue::Unavailable => serializer.serialize_none(),
        }
    }
}

/// The fixed set of workforce summary values, recomputed every load cycle.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WorkforceMetrics {
    pub total_employees: MetricValue,
    pub max_salary: MetricValue,
    pub largest_department: MetricValue,
    pub highest_turnover_role: MetricValue,
    pub average_tenure: MetricValue,
    pub top_location: MetricValue,
}

impl WorkforceMetrics {
    /// Label/value pairs in presentation order.
    pub fn entries(&self) -> Vec<(&'static str, &MetricValue)> {
        vec![
            ("Total Employees", &self.total_employees),
            ("Max Documented Salary", &self.max_salary),
            ("Largest Department", &self.largest_department),
            ("Highest Turnover Role", &self.highest_turnover_role),
            ("Average Tenure", &self.average_tenure),
            ("Top Employee Location", &self.top_location),
        ]
    }
}

/// Derives all metrics against today's date.
pub fn derive(collection: &DatasetCollection) -> WorkforceMetrics {
    derive_at(collection, Local::now().date_naive())
}

/// Derives all metrics with an injected clock; `today` feeds the tenure
/// fallback computed from roster hire dates.
pub fn derive_at(collection: &DatasetCollection, today: NaiveDate) -> WorkforceMetrics {
    WorkforceMetrics {
        total_employees: total_employees(collection),
        max_salary: max_salary(collection),
        largest_department: largest_department(collection),
        highest_turnover_role: highest_turnover_role(collection),
        average_tenure: average_tenure(collection, today),
        top_location: top_location(collection),
    }
}

/// One `(dataset key, column)` step of a fallback chain.
#[derive(Debug, Clone, Copy)]
pub struct MetricSource<'a> {
    pub dataset: &'a str,
    pub column: &'a str,
}

/// Resolves an ordered candidate list to the first non-empty dataset that
/// carries the named column. Falls through to `None` when nothing matches.
pub fn resolve_source<'c>(
    collection: &'c DatasetCollection,
    candidates: &[MetricSource<'_>],
) -> Option<(&'c Dataset, usize)> {
    candidates.iter().find_map(|candidate| {
        let dataset = collection.get_non_empty(candidate.dataset)?;
        let idx = dataset.column_index(candidate.column)?;
        Some((dataset, idx))
    })
}

fn total_employees(collection: &DatasetCollection) -> MetricValue {
    match collection.get_non_empty(EMPLOYEE_ROSTER_KEY) {
        Some(roster) => MetricValue::Count(roster.row_count()),
        None => MetricValue::Unavailable,
    }
}

fn max_salary(collection: &DatasetCollection) -> MetricValue {
    let candidates = [
        MetricSource {
            dataset: SALARY_STATISTICS_KEY,
            column: "max_salary",
        },
        MetricSource {
            dataset: EMPLOYEE_ROSTER_KEY,
            column: "salary",
        },
    ];
    let Some((dataset, idx)) = resolve_source(collection, &candidates) else {
        return MetricValue::Unavailable;
    };
    column_numbers(dataset, idx)
        .fold(None::<f64>, |acc, v| Some(acc.map_or(v, |m| m.max(v))))
        .map_or(MetricValue::Unavailable, MetricValue::Currency)
}

fn largest_department(collection: &DatasetCollection) -> MetricValue {
    if let Some(dataset) = collection.get_non_empty(DEPARTMENT_SALARY_KEY)
        && dataset.has_column("department")
        && let Some(count_idx) = dataset.column_index("employee_count")
        && let Some(row) = row_of_max(dataset, count_idx)
        && let Some(label) = label_at(dataset, row, "department")
    {
        return MetricValue::Label(label);
    }
    mode_of(collection, EMPLOYEE_ROSTER_KEY, "department")
        .map_or(MetricValue::Unavailable, MetricValue::Label)
}

fn highest_turnover_role(collection: &DatasetCollection) -> MetricValue {
    let Some(dataset) = collection.get_non_empty(TURNOVER_KEY) else {
        return MetricValue::Unavailable;
    };
    if !dataset.has_column("job_title") {
        return MetricValue::Unavailable;
    }
    let Some(rate_idx) = dataset.column_index("turnover_rate_(%)") else {
        return MetricValue::Unavailable;
    };
    row_of_max(dataset, rate_idx)
        .and_then(|row| label_at(dataset, row, "job_title"))
        .map_or(MetricValue::Unavailable, MetricValue::Label)
}

fn average_tenure(collection: &DatasetCollection, today: NaiveDate) -> MetricValue {
    if let Some(dataset) = collection.get_non_empty(TENURE_KEY)
        && let Some(idx) = dataset.column_index("tenure")
        && let Some(mean) = mean(column_numbers(dataset, idx))
    {
        return MetricValue::Years(mean);
    }
    // Fallback: derive tenure per roster row from the hire date.
    if let Some(roster) = collection.get_non_empty(EMPLOYEE_ROSTER_KEY)
        && let Some(values) = roster.column_values("hire_date")
    {
        let tenures = values
            .filter_map(|v| v.as_date())
            .map(|hired| (today - hired).num_days() as f64 / 365.25);
        if let Some(mean) = mean(tenures) {
            return MetricValue::Years(mean);
        }
    }
    MetricValue::Unavailable
}

fn top_location(collection: &DatasetCollection) -> MetricValue {
    // A count-bearing location report settles this metric; the roster
    // fallback applies only when the report itself is absent or unusable.
    if let Some(dataset) = collection.get_non_empty(LOCATION_REPORT_KEY)
        && let Some(count_idx) = dataset.column_index("employee_count")
    {
        if let Some(location_column) = LOCATION_COLUMNS
            .iter()
            .copied()
            .find(|column| dataset.has_column(column))
            && let Some(row) = row_of_max(dataset, count_idx)
            && let Some(label) = label_at(dataset, row, location_column)
        {
            return MetricValue::Label(label);
        }
        return MetricValue::Unavailable;
    }
    if let Some(roster) = collection.get_non_empty(EMPLOYEE_ROSTER_KEY)
        && let Some(location_column) = ROSTER_LOCATION_COLUMNS
            .iter()
            .copied()
            .find(|column| roster.has_column(column))
        && let Some(label) = mode_of(collection, EMPLOYEE_ROSTER_KEY, location_column)
    {
        return MetricValue::Label(label);
    }
    MetricValue::Unavailable
}

fn column_numbers<'a>(dataset: &'a Dataset, idx: usize) -> impl Iterator<Item = f64> + 'a {
    dataset
        .rows
        .iter()
        .filter_map(move |row| row.get(idx).and_then(|cell| cell.as_ref()))
        .filter_map(|value| value.as_number())
}

/// Index of the row holding the maximum numeric value in `idx`, skipping
/// missing and non-numeric cells.
fn row_of_max(dataset: &Dataset, idx: usize) -> Option<usize> {
    dataset
        .rows
        .iter()
        .enumerate()
        .filter_map(|(row_idx, row)| {
            let value = row.get(idx)?.as_ref()?.as_number()?;
            Some((row_idx, value))
        })
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(row_idx, _)| row_idx)
}

fn label_at(dataset: &Dataset, row: usize, column: &str) -> Option<String> {
    dataset.cell(row, column).map(|value| value.as_display())
}

/// Most frequent value of a column, ties broken by the lexicographically
/// smaller label so results are deterministic.
fn mode_of(collection: &DatasetCollection, key: &str, column: &str) -> Option<String> {
    let dataset = collection.get_non_empty(key)?;
    let values = dataset.column_values(column)?;
    let mut counts = values.map(|value| value.as_display()).counts();
    counts
        .drain()
        .sorted_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)))
        .next()
        .map(|(label, _)| label)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

fn group_thousands(value: f64) -> String {
    let rounded = value.round() as i64;
    let digits = rounded.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (pos, ch) in digits.chars().enumerate() {
        if pos > 0 && (digits.len() - pos).is_multiple_of(3) {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_group_thousands() {
        assert_eq!(MetricValue::Currency(90_000.0).to_string(), "$90,000");
        assert_eq!(MetricValue::Currency(1_234_567.0).to_string(), "$1,234,567");
        assert_eq!(MetricValue::Count(42).to_string(), "42");
        assert_eq!(MetricValue::Years(5.25).to_string(), "5.2 Yrs");
        assert_eq!(MetricValue::Unavailable.to_string(), "N/A");
    }

    #[test]
    fn unavailable_serializes_as_null() {
        let json = serde_json::to_value(MetricValue::Unavailable).expect("serialize");
        assert!(json.is_null());
        let json = serde_json::to_value(MetricValue::Count(7)).expect("serialize");
        assert_eq!(json, serde_json::json!(7));
    }
}
