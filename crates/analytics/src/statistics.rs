use core_types::{Field, Reading};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mean, minimum and maximum of one field. All three are `None` when no
/// reading carried the field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Per-field statistics plus the number of readings they were computed over.
///
/// Serializes flat, e.g. `{"count": 3, "lpg": {"mean": .., "min": .., "max": ..}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsSummary {
    pub count: usize,
    #[serde(flatten)]
    pub fields: BTreeMap<Field, FieldStats>,
}

/// Computes count/mean/min/max for each of `fields` over `records`.
///
/// Values are converted to `f64` first. The result does not depend on the
/// order of `records`.
pub fn compute_stats(records: &[Reading], fields: &[Field]) -> StatsSummary {
    let fields = fields
        .iter()
        .map(|&field| (field, field_stats(records, field)))
        .collect();

    StatsSummary {
        count: records.len(),
        fields,
    }
}

fn field_stats(records: &[Reading], field: Field) -> FieldStats {
    let mut values: Vec<f64> = records.iter().filter_map(|r| r.value(field)).collect();
    if values.is_empty() {
        return FieldStats::default();
    }

    // Summing in a canonical order keeps the mean bit-identical across permutations.
    values.sort_by(f64::total_cmp);
    let min = values[0];
    let max = values[values.len() - 1];
    let sum: f64 = values.iter().sum();
    // Rounding can push the mean of near-equal values a ulp outside [min, max].
    let mean = (sum / values.len() as f64).clamp(min, max);

    FieldStats {
        mean: Some(mean),
        min: Some(min),
        max: Some(max),
    }
}
