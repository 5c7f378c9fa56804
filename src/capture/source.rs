use crate::foundation::error::TrailResult;
use crate::frame::Frame;

/// A supplier of captured frames, polled once per pipeline cycle.
///
/// `Ok(None)` (or an empty [`Frame`]) ends the stream. Errors are treated as transient and
/// retried by [`crate::RetryPolicy`].
pub trait CaptureSource {
    /// Fetch the next frame.
    fn read_frame(&mut self) -> TrailResult<Option<Frame>>;

    /// Short description used in logs.
    fn describe(&self) -> String {
        "capture source".to_string()
    }
}
