use thiserror::Error;

/// Failures surfaced by field construction and the render loop.
///
/// Every variant is recoverable from the page's point of view: callers log
/// and leave the host element empty instead of propagating.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FieldError {
    #[error("rendering surface unavailable: {0}")]
    SurfaceUnavailable(String),
    #[error("rendering surface lost")]
    SurfaceLost,
    #[error("invalid field config: {0}")]
    InvalidConfig(&'static str),
    #[error("frame scheduler error: {0}")]
    Scheduler(String),
}

pub type FieldResult<T> = Result<T, FieldError>;
