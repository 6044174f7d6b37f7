use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("cell index {index} is outside the grid (expected 0..{limit})")]
    IndexOutOfRange { index: usize, limit: usize },
    #[error("empty key token")]
    EmptyKey,
    #[error("unknown modifier '{modifier}' in key '{token}'")]
    UnknownModifier { modifier: String, token: String },
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
