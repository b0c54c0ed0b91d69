use thiserror::Error;

/// Input validation failures of the orbit and sweep queries.
///
/// Divergence of an orbit is not an error: non-finite states are a valid
/// dynamical outcome and propagate into the returned data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    #[error("sweep range must satisfy min <= max, got min = {min}, max = {max}")]
    InvalidRange { min: f64, max: f64 },
    #[error("sweep range must contain at least one sample")]
    EmptyRange,
    #[error("sweep range bounds must be finite, got min = {min}, max = {max}")]
    NonFiniteBound { min: f64, max: f64 },
    #[error("transient of {transient} steps exceeds the total of {total} steps")]
    TransientExceedsTotal { transient: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, MapError>;
