use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid period '{0}': expected one of today, last7, month")]
    InvalidPeriod(String),

    #[error("No readings were found for the requested period")]
    NoData,
}
