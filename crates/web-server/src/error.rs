use analytics::AnalyticsError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] database::DbError),
    #[error(transparent)]
    Analytics(#[from] AnalyticsError),
    #[error(transparent)]
    Input(#[from] CoreError),
    #[error("Rendering error: {0}")]
    Render(#[from] renderer::RenderError),
    #[error("Configuration error: {0}")]
    Config(#[from] configuration::error::ConfigError),
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Analytics(AnalyticsError::InvalidPeriod(period)) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid period '{period}'. Use today, last7 or month."),
            ),
            AppError::Analytics(AnalyticsError::NoData) => (
                StatusCode::NOT_FOUND,
                "No data for the requested period".to_string(),
            ),
            AppError::Input(CoreError::UnknownSensor(sensor)) => {
                (StatusCode::NOT_FOUND, format!("Unknown sensor '{sensor}'"))
            }
            AppError::Input(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()),
            AppError::Database(database::DbError::InvalidReference(reference)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Referenced record does not exist: {reference}"),
            ),
            AppError::Database(db_err) => {
                tracing::error!(error = ?db_err, "Database error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal database error occurred".to_string(),
                )
            }
            AppError::Render(render_err) => {
                tracing::error!(error = ?render_err, "Report rendering failed.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "The report could not be rendered".to_string(),
                )
            }
            AppError::Config(config_err) => {
                tracing::error!(error = ?config_err, "Configuration error.");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A server configuration error occurred".to_string(),
                )
            }
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
