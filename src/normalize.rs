//! Canonical naming for dataset keys and column labels.
//!
//! Every table that enters the pipeline has its labels rewritten here so the
//! cleaner and the metric deriver can reference canonical names
//! unconditionally. Both transforms are idempotent.

/// Normalizes a column label: trim, lowercase, internal spaces to
/// underscores. Touches the label only, never cell values.
pub fn normalize_column_name(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Derives the canonical dataset key from a file name: extension stripped,
/// lowercased, spaces and hyphens mapped to underscores.
pub fn dataset_key(file_stem: &str) -> String {
    file_stem.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Normalizes a full header row, disambiguating duplicates with a numeric
/// suffix so column names stay unique within one dataset.
pub fn normalize_headers(headers: &[String]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::with_capacity(headers.len());
    for header in headers {
        let base = normalize_column_name(header);
        let mut candidate = base.clone();
        let mut counter = 2usize;
        while seen.contains(&candidate) {
            candidate = format!("{base}_{counter}");
            counter += 1;
        }
        seen.push(candidate);
    }
    seen
}
