//! Errors for the fallible editor and lookup APIs.
//!
//! Rendering never fails: resolution, formatting and assembly degrade to a
//! renderable result instead of returning these.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ImageItError {
    #[error("index {index} is out of range for a list of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("unknown mapping operator: {0}")]
    UnknownOperator(String),

    #[error("{0} is already in the list")]
    DuplicateMappingId(String),

    #[error("mapping id must not be empty")]
    EmptyMappingId,

    #[error("sensors are locked")]
    SensorsLocked,

    #[error("container has no layout size ({width}x{height})")]
    ContainerNotLaidOut { width: f64, height: f64 },
}

pub type Result<T> = std::result::Result<T, ImageItError>;
