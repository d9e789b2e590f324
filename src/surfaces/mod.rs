//! Page surfaces module
//!
//! The deadline guard reads a timer surface and submits a form. These are the
//! traits it depends on plus the in-memory implementations used by the server.

pub mod recorded;
pub mod traits;

// Re-export main types
pub use recorded::{RecordedDisplay, RecordedForm, RecordedSurface, Submission, SurfaceView};
pub use traits::{DisplayTarget, ExamForm, TimerSurface};
