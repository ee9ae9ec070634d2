use crate::error::AnalyticsError;
use chrono::{Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The reporting windows a client can ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Today,
    Last7,
    Month,
}

impl PeriodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Today => "today",
            PeriodKind::Last7 => "last7",
            PeriodKind::Month => "month",
        }
    }
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodKind {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "today" => Ok(PeriodKind::Today),
            "last7" => Ok(PeriodKind::Last7),
            "month" => Ok(PeriodKind::Month),
            other => Err(AnalyticsError::InvalidPeriod(other.to_string())),
        }
    }
}

/// A resolved, inclusive `[start, end]` range of local wall-clock time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Period {
    pub kind: PeriodKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub label: String,
}

impl Period {
    /// Resolves `kind` relative to `reference`. Both bounds cover whole days.
    ///
    /// Fails with `InvalidPeriod` when the window would start before the
    /// earliest representable date.
    pub fn resolve(kind: PeriodKind, reference: NaiveDate) -> Result<Self, AnalyticsError> {
        let days_back = match kind {
            PeriodKind::Today => 0,
            PeriodKind::Last7 => 6,
            PeriodKind::Month => u64::from(reference.day0()),
        };
        let first_day = reference
            .checked_sub_days(Days::new(days_back))
            .ok_or_else(|| AnalyticsError::InvalidPeriod(format!("{kind} ending {reference}")))?;

        let label = match kind {
            PeriodKind::Today => reference.format("%d/%m/%Y").to_string(),
            PeriodKind::Last7 => format!(
                "{} – {}",
                first_day.format("%d/%m/%Y"),
                reference.format("%d/%m/%Y")
            ),
            PeriodKind::Month => first_day.format("%B %Y").to_string(),
        };

        Ok(Self {
            kind,
            start: first_day.and_time(NaiveTime::MIN),
            end: end_of_day(reference),
            label,
        })
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Parses `keyword` and resolves it against `reference`.
///
/// The reference date is injected rather than read from the clock so that
/// resolution stays pure; transport code passes `Local::now().date_naive()`.
pub fn resolve_period(keyword: &str, reference: NaiveDate) -> Result<Period, AnalyticsError> {
    let kind = keyword.parse::<PeriodKind>()?;
    Period::resolve(kind, reference)
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    // Subtracting from midnight wraps to 23:59:59.999999999.
    date.and_time(NaiveTime::MIN - Duration::nanoseconds(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        date(y, m, d).and_hms_opt(h, min, s).unwrap()
    }

    #[test]
    fn today_covers_the_whole_reference_day() {
        let period = resolve_period("today", date(2024, 3, 15)).unwrap();
        assert_eq!(period.kind, PeriodKind::Today);
        assert_eq!(period.start, at(2024, 3, 15, 0, 0, 0));
        assert_eq!(
            period.end,
            date(2024, 3, 15)
                .and_hms_nano_opt(23, 59, 59, 999_999_999)
                .unwrap()
        );
        assert_eq!(period.label, "15/03/2024");
    }

    #[test]
    fn last7_starts_six_days_back() {
        let period = resolve_period("last7", date(2024, 3, 15)).unwrap();
        assert_eq!(period.start, at(2024, 3, 9, 0, 0, 0));
        assert_eq!(period.end.date(), date(2024, 3, 15));
        assert_eq!(period.label, "09/03/2024 – 15/03/2024");
    }

    #[test]
    fn last7_crosses_month_and_year_boundaries() {
        let period = resolve_period("last7", date(2024, 1, 3)).unwrap();
        assert_eq!(period.start, at(2023, 12, 28, 0, 0, 0));
        assert_eq!(period.label, "28/12/2023 – 03/01/2024");
    }

    #[test]
    fn month_starts_on_the_first() {
        let period = resolve_period("month", date(2024, 3, 15)).unwrap();
        assert_eq!(period.start, at(2024, 3, 1, 0, 0, 0));
        assert_eq!(period.end.date(), date(2024, 3, 15));
        assert_eq!(period.label, "March 2024");

        let first = resolve_period("month", date(2024, 2, 1)).unwrap();
        assert_eq!(first.start, at(2024, 2, 1, 0, 0, 0));
        assert_eq!(first.label, "February 2024");
    }

    #[test]
    fn unknown_keywords_are_rejected() {
        let err = resolve_period("bogus", date(2024, 3, 15)).unwrap_err();
        assert_eq!(err, AnalyticsError::InvalidPeriod("bogus".to_string()));
        // Keywords are case-sensitive.
        assert!(resolve_period("Today", date(2024, 3, 15)).is_err());
        assert!(resolve_period("lastmonth", date(2024, 3, 15)).is_err());
    }

    #[test]
    fn bounds_are_inclusive() {
        let period = resolve_period("today", date(2024, 3, 15)).unwrap();
        assert!(period.start <= period.end);
        assert!(period.contains(period.start));
        assert!(period.contains(period.end));
        assert!(period.contains(at(2024, 3, 15, 12, 0, 0)));
        assert!(!period.contains(at(2024, 3, 16, 0, 0, 0)));
        assert!(!period.contains(at(2024, 3, 14, 23, 59, 59)));
    }

    #[test]
    fn windows_before_the_earliest_date_are_rejected() {
        let err = resolve_period("last7", NaiveDate::MIN).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidPeriod(_)));

        let today = resolve_period("today", NaiveDate::MIN).unwrap();
        assert_eq!(today.start, NaiveDate::MIN.and_time(NaiveTime::MIN));
        let month = resolve_period("month", NaiveDate::MIN).unwrap();
        assert_eq!(month.start.date(), NaiveDate::MIN);
    }
}
