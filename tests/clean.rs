use hr_metrics::clean::{
    CleanOptions, DATE_FORMAT, NULL_TOKENS, clean_dataset, coerce_date, coerce_number,
};
use hr_metrics::dataset::{Cell, Dataset, Value};
use hr_metrics::normalize::normalize_column_name;
use proptest::prelude::*;

fn text(value: &str) -> Cell {
    Some(Value::Text(value.to_string()))
}

fn textual_dataset(column: &str, values: &[&str]) -> Dataset {
    let mut dataset = Dataset::new("sample", vec![column.to_string()]);
    dataset.rows = values.iter().map(|v| vec![text(v)]).collect();
    dataset
}

#[test]
fn recognized_null_tokens_map_to_missing_and_lookalikes_survive() {
    let dataset = textual_dataset("department", &["NULL", "NA", "n/a-not-in-list"]);
    let cleaned = clean_dataset(&dataset, &CleanOptions::default());
    assert_eq!(cleaned.rows[0][0], None);
    assert_eq!(cleaned.rows[1][0], None);
    assert_eq!(cleaned.rows[2][0], text("n/a-not-in-list"));
}

#[test]
fn numeric_column_coerces_currency_and_degrades_garbage() {
    let dataset = textual_dataset("salary", &["$1,234", "abc"]);
    let cleaned = clean_dataset(&dataset, &CleanOptions::default());
    assert_eq!(cleaned.rows[0][0], Some(Value::Number(1234.0)));
    assert_eq!(cleaned.rows[1][0], None);
}

#[test]
fn date_column_only_accepts_the_export_pattern() {
    let dataset = textual_dataset("hire_date", &["17-JUN-03", "2003-17-06"]);
    let cleaned = clean_dataset(&dataset, &CleanOptions::default());
    assert_eq!(
        cleaned.rows[0][0],
        Some(Value::Date(
            chrono::NaiveDate::from_ymd_opt(2003, 6, 17).expect("valid date")
        ))
    );
    assert_eq!(cleaned.rows[1][0], None);
}

#[test]
fn export_date_pattern_matches_the_documented_shape() {
    assert_eq!(DATE_FORMAT, "%d-%b-%y");
}

proptest! {
    #[test]
    fn unlisted_tokens_survive_text_cleaning(raw in "[a-zA-Z][a-zA-Z0-9 _/-]{0,24}") {
        prop_assume!(!NULL_TOKENS.contains(&raw.as_str()));
        let trimmed = raw.trim().to_string();
        prop_assume!(trimmed != "None" && trimmed != "<NA>");

        let dataset = textual_dataset("department", &[raw.as_str()]);
        let cleaned = clean_dataset(&dataset, &CleanOptions::default());
        prop_assert_eq!(cleaned.rows[0][0].clone(), text(&trimmed));
    }

    #[test]
    fn column_normalization_is_idempotent(raw in ".{0,40}") {
        let once = normalize_column_name(&raw);
        prop_assert_eq!(normalize_column_name(&once), once.clone());
    }

    #[test]
    fn numeric_coercion_never_panics(raw in ".{0,40}") {
        match coerce_number(&raw) {
            Some(Value::Number(_)) | None => {}
            Some(_) => prop_assert!(false, "numeric coercion produced a non-number"),
        }
    }

    #[test]
    fn date_coercion_never_panics(raw in ".{0,40}") {
        match coerce_date(&raw) {
            Some(Value::Date(_)) | None => {}
            Some(_) => prop_assert!(false, "date coercion produced a non-date"),
        }
    }
}
