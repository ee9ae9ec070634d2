use core_types::{Field, Reading};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Risk thresholds for one sensor category, keyed by field.
pub type Thresholds = BTreeMap<Field, f64>;

/// Share of readings whose value exceeded the field's threshold, in `[0, 1]`.
///
/// A field without an entry was not evaluated; that is different from an
/// entry of `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskEntry {
    pub fraction: f64,
}

impl RiskEntry {
    pub fn percent(&self) -> f64 {
        self.fraction * 100.0
    }
}

/// Computes the fraction of `records` strictly above each threshold.
///
/// Only fields present in `thresholds` get an entry. A value equal to the
/// threshold counts as safe, and an empty record set yields `0.0`.
pub fn evaluate_risk(records: &[Reading], thresholds: &Thresholds) -> BTreeMap<Field, RiskEntry> {
    thresholds
        .iter()
        .map(|(&field, &threshold)| {
            let fraction = if records.is_empty() {
                0.0
            } else {
                let above = records
                    .iter()
                    .filter(|r| r.value(field).is_some_and(|v| v > threshold))
                    .count();
                above as f64 / records.len() as f64
            };
            (field, RiskEntry { fraction })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn lpg_readings(values: &[Decimal]) -> Vec<Reading> {
        let day = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                Reading::new(day.and_hms_opt(i as u32, 0, 0).unwrap(), "1")
                    .with_value(Field::Lpg, *v)
            })
            .collect()
    }

    #[test]
    fn fraction_of_values_above_threshold() {
        let records = lpg_readings(&[dec!(10), dec!(20), dec!(30)]);
        let thresholds = Thresholds::from([(Field::Lpg, 15.0)]);
        let risk = evaluate_risk(&records, &thresholds);
        assert!((risk[&Field::Lpg].fraction - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn boundary_values_are_safe() {
        let records = lpg_readings(&[dec!(800), dec!(800.00), dec!(800.01)]);
        let thresholds = Thresholds::from([(Field::Lpg, 800.0)]);
        let risk = evaluate_risk(&records, &thresholds);
        assert!((risk[&Field::Lpg].fraction - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn fields_without_threshold_are_not_evaluated() {
        let records = lpg_readings(&[dec!(900)]);
        let risk = evaluate_risk(&records, &Thresholds::new());
        assert!(risk.is_empty());

        let only_co = Thresholds::from([(Field::Co, 50.0)]);
        let risk = evaluate_risk(&records, &only_co);
        assert!(!risk.contains_key(&Field::Lpg));
        // The record carries no CO value, so nothing exceeded the threshold.
        assert_eq!(risk[&Field::Co].fraction, 0.0);
    }

    #[test]
    fn empty_records_yield_zero_risk() {
        let thresholds = Thresholds::from([(Field::Lpg, 800.0)]);
        let risk = evaluate_risk(&[], &thresholds);
        assert_eq!(risk[&Field::Lpg], RiskEntry { fraction: 0.0 });
    }

    #[test]
    fn order_does_not_change_the_result() {
        let mut records = lpg_readings(&[dec!(900), dec!(100), dec!(850), dec!(799.99), dec!(1000)]);
        let thresholds = Thresholds::from([(Field::Lpg, 800.0)]);
        let forward = evaluate_risk(&records, &thresholds);
        records.reverse();
        assert_eq!(forward, evaluate_risk(&records, &thresholds));
        records.swap(0, 3);
        assert_eq!(forward, evaluate_risk(&records, &thresholds));
    }

    #[test]
    fn serializes_as_a_bare_fraction() {
        let json = serde_json::to_value(RiskEntry { fraction: 0.25 }).unwrap();
        assert_eq!(json, serde_json::json!(0.25));
        assert_eq!(RiskEntry { fraction: 0.25 }.percent(), 25.0);
    }
}
