use analytics::{
    resolve_period, AnalyticsEngine, AnalyticsError, ReportOptions, SeriesMode, Thresholds,
};
use chrono::{NaiveDate, NaiveDateTime};
use core_types::{Field, GasRecord, Reading, SensorKind};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, day)
        .unwrap()
        .and_hms_opt(hour, 15, 0)
        .unwrap()
}

fn gas_record(timestamp: NaiveDateTime, lpg: Decimal) -> GasRecord {
    GasRecord {
        id: Uuid::new_v4(),
        timestamp,
        lpg,
        co: dec!(20.5),
        smoke: dec!(120),
        system_id: "1".to_string(),
    }
}

fn gas_thresholds() -> Thresholds {
    Thresholds::from([
        (Field::Lpg, 800.0),
        (Field::Co, 50.0),
        (Field::Smoke, 300.0),
    ])
}

#[test]
fn gas_report_over_last_seven_days() {
    let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    let period = resolve_period("last7", reference).unwrap();

    // Five readings over three days, stored out of order; one falls outside the period.
    let stored = vec![
        gas_record(at(14, 18), dec!(950.00)),
        gas_record(at(12, 9), dec!(400.00)),
        gas_record(at(15, 7), dec!(800.00)),
        gas_record(at(12, 21), dec!(812.40)),
        gas_record(at(14, 6), dec!(300.10)),
        gas_record(at(1, 6), dec!(999.99)),
    ];
    let records: Vec<Reading> = stored
        .iter()
        .filter(|r| period.contains(r.timestamp))
        .map(Reading::from)
        .collect();
    assert_eq!(records.len(), 5);

    let options = ReportOptions::new(Some(gas_thresholds()), SeriesMode::Full);
    let report = AnalyticsEngine::new()
        .assemble(&period.label, &records, SensorKind::Gas.fields(), &options)
        .unwrap();

    assert_eq!(report.label, "09/03/2024 – 15/03/2024");
    assert_eq!(report.count, 5);
    // 950.00 and 812.40 exceed 800; 800.00 sits on the boundary and is safe.
    assert!((report.risk[&Field::Lpg].fraction - 2.0 / 5.0).abs() < 1e-12);
    assert_eq!(report.risk[&Field::Co].fraction, 0.0);

    let lpg = &report.series[&Field::Lpg];
    assert_eq!(lpg.len(), 5);
    assert!(lpg.windows(2).all(|w| w[0].x <= w[1].x));
    assert_eq!(
        report.series_values(Field::Lpg),
        vec![400.0, 812.4, 300.1, 950.0, 800.0]
    );

    let stats = report.stats[&Field::Lpg];
    assert_eq!(stats.min, Some(300.1));
    assert_eq!(stats.max, Some(950.0));
    assert!(stats.min <= stats.mean && stats.mean <= stats.max);
}

#[test]
fn document_variant_downsamples_to_the_chart_budget() {
    let records: Vec<Reading> = (0..48)
        .map(|i| {
            let timestamp = at(15, 0) + chrono::Duration::minutes(30 * i);
            Reading::from(&gas_record(timestamp, Decimal::from(700 + i * 5)))
        })
        .collect();

    let options = ReportOptions::new(Some(gas_thresholds()), SeriesMode::Downsampled(8));
    let report = AnalyticsEngine::new()
        .assemble("15/03/2024", &records, SensorKind::Gas.fields(), &options)
        .unwrap();

    for field in SensorKind::Gas.fields() {
        assert_eq!(report.series[field].len(), 8);
    }
    // floor(i * 48 / 8) = 6 * i
    let expected: Vec<f64> = (0..8).map(|i| (700 + 6 * i * 5) as f64).collect();
    assert_eq!(report.series_values(Field::Lpg), expected);
}

#[test]
fn no_data_is_distinguishable_from_invalid_period() {
    let reference = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert!(matches!(
        resolve_period("yesterday", reference),
        Err(AnalyticsError::InvalidPeriod(k)) if k == "yesterday"
    ));

    let period = resolve_period("today", reference).unwrap();
    let result = AnalyticsEngine::new().assemble(
        &period.label,
        &[],
        SensorKind::Camera.fields(),
        &ReportOptions::default(),
    );
    assert_eq!(result.unwrap_err(), AnalyticsError::NoData);
}
