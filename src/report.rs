//! Presentation adapter: renders pipeline output as ASCII tables or JSON.
//!
//! Consumes the cleaned collection and derived metrics read-only; everything
//! here is replaceable without touching the pipeline itself.

use anyhow::Result;
use serde_json::json;

use crate::{
    dataset::{Dataset, DatasetCollection},
    metrics::WorkforceMetrics,
    table,
};

pub fn render_metrics_table(metrics: &WorkforceMetrics) -> String {
    let headers = vec!["metric".to_string(), "value".to_string()];
    let rows = metrics
        .entries()
        .into_iter()
        .map(|(label, value)| vec![label.to_string(), value.to_string()])
        .collect::<Vec<_>>();
    table::render_table(&headers, &rows)
}

pub fn render_metrics_json(metrics: &WorkforceMetrics) -> Result<String> {
    let formatted = metrics
        .entries()
        .into_iter()
        .map(|(label, value)| (label.to_string(), json!(value.to_string())))
        .collect::<serde_json::Map<_, _>>();
    let payload = json!({
        "metrics": metrics,
        "formatted": formatted,
    });
    Ok(serde_json::to_string_pretty(&payload)?)
}

/// Inventory of the collection: key, row count, column count per dataset,
/// sorted by key for stable output.
pub fn render_inventory(collection: &DatasetCollection) -> String {
    let headers = vec![
        "dataset".to_string(),
        "rows".to_string(),
        "columns".to_string(),
    ];
    let mut rows = collection
        .iter()
        .map(|(key, dataset)| {
            vec![
                key.clone(),
                dataset.row_count().to_string(),
                dataset.columns.len().to_string(),
            ]
        })
        .collect::<Vec<_>>();
    rows.sort();
    table::render_table(&headers, &rows)
}

/// First `limit` rows of one cleaned dataset; missing cells render empty.
pub fn render_preview(dataset: &Dataset, limit: usize) -> String {
    let rows = dataset
        .rows
        .iter()
        .take(limit)
        .map(|row| {
            row.iter()
                .map(|cell| cell.as_ref().map(|v| v.as_display()).unwrap_or_default())
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render_table(&dataset.columns, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Value;
    use crate::metrics::MetricValue;

    #[test]
    fn metrics_table_contains_every_entry() {
        let metrics = WorkforceMetrics {
            total_employees: MetricValue::Count(100),
            max_salary: MetricValue::Currency(120_000.0),
            largest_department: MetricValue::Label("Engineering".to_string()),
            highest_turnover_role: MetricValue::Unavailable,
            average_tenure: MetricValue::Years(4.0),
            top_location: MetricValue::Unavailable,
        };
        let rendered = render_metrics_table(&metrics);
        assert!(rendered.contains("Total Employees"));
        assert!(rendered.contains("$120,000"));
        assert!(rendered.contains("N/A"));
    }

    #[test]
    fn metrics_json_carries_raw_and_formatted_values() {
        let metrics = WorkforceMetrics {
            total_employees: MetricValue::Count(100),
            max_salary: MetricValue::Unavailable,
            largest_department: MetricValue::Unavailable,
            highest_turnover_role: MetricValue::Unavailable,
            average_tenure: MetricValue::Unavailable,
            top_location: MetricValue::Unavailable,
        };
        let rendered = render_metrics_json(&metrics).expect("render json");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");
        assert_eq!(parsed["metrics"]["total_employees"], 100);
        assert!(parsed["metrics"]["max_salary"].is_null());
        assert_eq!(parsed["formatted"]["Max Documented Salary"], "N/A");
    }

    #[test]
    fn preview_renders_missing_cells_as_empty() {
        let mut dataset = Dataset::new(
            "all_employees",
            vec!["name".to_string(), "salary".to_string()],
        );
        dataset
            .rows
            .push(vec![Some(Value::Text("Ada".to_string())), None]);
        let rendered = render_preview(&dataset, 10);
        assert!(rendered.contains("Ada"));
    }
}
