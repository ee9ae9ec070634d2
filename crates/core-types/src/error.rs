use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown sensor category: {0}")]
    UnknownSensor(String),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid payload for {0}: {1}")]
    InvalidInput(String, String),
}
