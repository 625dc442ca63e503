use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("malformed calendar date: {0:?}")]
    InvalidDate(String),

    #[error("records for {0:?} do not form a consecutive ascending day run")]
    BrokenRun(String),

    #[error("check string for {name:?} is not base-36: {value:?}")]
    BadCheckString { name: String, value: String },

    #[error("malformed store blob: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("storage backend: {0}")]
    Io(#[from] std::io::Error),
}
