//! Key intersection of two ratio maps into paired series.

use super::ratio::RatioMap;

/// Two equal-length series over the countries common to both inputs,
/// in lexicographic country order.
#[derive(Debug, Clone, Default)]
pub struct AlignedSeries {
    pub countries: Vec<String>,
    pub series_a: Vec<f64>,
    pub series_b: Vec<f64>,
}

impl AlignedSeries {
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// Intersect two ratio maps on their country keys.
///
/// Countries present in only one map are dropped from both sides, so the
/// output series are always the same length and `series_a[i]` /
/// `series_b[i]` describe the same country.
pub fn align(map_a: &RatioMap, map_b: &RatioMap) -> AlignedSeries {
    let mut aligned = AlignedSeries::default();
    for (country, &a) in map_a {
        let Some(&b) = map_b.get(country) else {
            continue;
        };
        aligned.countries.push(country.clone());
        aligned.series_a.push(a);
        aligned.series_b.push(b);
    }
    aligned
}
