//! Per-country ratio extraction from raw upstream rows.

use std::collections::BTreeMap;

use serde_json::Value;

/// Country name mapped to a ratio in `[0, inf)`.
///
/// A `BTreeMap` keeps the keys in lexicographic order, so everything built
/// on top of it iterates countries deterministically.
pub type RatioMap = BTreeMap<String, f64>;

/// Walk the raw rows of one dataset and build `country -> numerator / denominator`.
///
/// Each row is expected to carry an `"all"` object with a `"country"` string
/// plus the two numeric fields. Rows that are missing any of those, whose
/// denominator is not a finite positive number, or whose quotient overflows
/// to a non-finite value are skipped rather than failing the whole dataset.
/// A country repeated across rows keeps the last ratio seen.
pub fn ratio_by_country(
    rows: &[Value],
    numerator_field: &str,
    denominator_field: &str,
) -> RatioMap {
    let mut ratios = RatioMap::new();
    for row in rows {
        let Some(all) = row.get("all").and_then(Value::as_object) else {
            continue;
        };
        let Some(country) = all.get("country").and_then(Value::as_str) else {
            continue;
        };
        if country.is_empty() {
            continue;
        }
        let Some(numerator) = all.get(numerator_field).and_then(Value::as_f64) else {
            continue;
        };
        let Some(denominator) = all.get(denominator_field).and_then(Value::as_f64) else {
            continue;
        };
        if !numerator.is_finite() || numerator < 0.0 {
            continue;
        }
        if !denominator.is_finite() || denominator <= 0.0 {
            continue;
        }
        let ratio = numerator / denominator;
        // Two finite fields can still overflow the quotient.
        if !ratio.is_finite() {
            continue;
        }
        ratios.insert(country.to_string(), ratio);
    }
    ratios
}
