use sectorspace_common::DimensionsError;

/// Errors raised by sector tree construction and coordinate lookups.
///
/// Neither kind is recoverable inside the tree; both propagate to the caller
/// unchanged.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IndexError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("invalid coordinate on axis `{axis}`: {reason}")]
    InvalidCoordinate { axis: String, reason: String },
}

impl IndexError {
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration(reason.into())
    }

    pub(crate) fn coordinate(axis: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidCoordinate {
            axis: axis.into(),
            reason: reason.into(),
        }
    }
}

impl From<DimensionsError> for IndexError {
    fn from(err: DimensionsError) -> Self {
        Self::InvalidConfiguration(err.to_string())
    }
}
