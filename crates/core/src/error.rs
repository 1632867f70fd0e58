#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed field key: '{0}'")]
    MalformedKey(String),

    #[error("Unknown field code: '{0}'")]
    UnknownField(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
