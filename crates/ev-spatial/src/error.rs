//! Spatial-subsystem error type.

use thiserror::Error;

use ev_core::{CoreError, SegmentId};

/// Errors produced by `ev-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no candidate segments: {0}")]
    NoCandidates(&'static str),

    #[error("segment {0} has no vertices")]
    EmptySegment(SegmentId),

    #[error("station at {0} must have at least one charger")]
    InvalidChargerCount(ev_core::Point),

    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
