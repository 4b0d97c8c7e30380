use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown condition: {0}")]
    UnknownCondition(String),
}
