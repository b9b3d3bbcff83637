use thiserror::Error;

/// Configuration failures. The engines never fail at runtime; an unreachable
/// goal is reported through the returned path, not through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("lap must be at least 1")]
    ZeroLap,
    #[error("invalid value {value:?} for {name}")]
    InvalidEnv { name: &'static str, value: String },
}
