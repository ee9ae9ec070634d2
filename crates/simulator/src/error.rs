use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulatorError {
    #[error("Storage error: {0}")]
    Store(#[from] database::DbError),

    #[error("Simulator task for '{0}' failed: {1}")]
    TaskFailed(String, String),
}
