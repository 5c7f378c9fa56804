use std::fmt;

/// Convenience result type used across echotrail.
pub type TrailResult<T> = Result<T, TrailError>;

/// Top-level error taxonomy used by pipeline APIs.
#[derive(thiserror::Error, Debug)]
pub enum TrailError {
    /// Invalid user-provided parameters or frame data.
    #[error("validation error: {0}")]
    Validation(String),

    /// The capture source failed and retries were exhausted.
    #[error("capture error: {0}")]
    Capture(String),

    /// The display sink could not present a frame.
    #[error("display error: {0}")]
    Display(String),

    /// Errors when loading or parsing configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrailError {
    /// Build a [`TrailError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TrailError::Capture`] value.
    pub fn capture(msg: impl Into<String>) -> Self {
        Self::Capture(msg.into())
    }

    /// Build a [`TrailError::Display`] value.
    pub fn display(msg: impl Into<String>) -> Self {
        Self::Display(msg.into())
    }

    /// Build a [`TrailError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

/// Returned by [`crate::FrameHistory::enqueue`] when every slot is occupied.
///
/// The rejected frame is handed back; the history never takes ownership on failure.
pub struct CapacityExceeded<F> {
    frame: F,
    capacity: usize,
}

impl<F> CapacityExceeded<F> {
    pub(crate) fn new(frame: F, capacity: usize) -> Self {
        Self { frame, capacity }
    }

    /// Capacity of the history that rejected the frame.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Recover the rejected frame.
    pub fn into_frame(self) -> F {
        self.frame
    }
}

impl<F> fmt::Debug for CapacityExceeded<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CapacityExceeded")
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}

impl<F> fmt::Display for CapacityExceeded<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "frame history is full ({} slots)", self.capacity)
    }
}

impl<F> std::error::Error for CapacityExceeded<F> {}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
