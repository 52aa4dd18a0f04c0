/// World harness with scripted pointer gestures.
pub mod harness;
/// Widgets that log their hook invocations.
pub mod recorder;
/// Display surfaces for tests.
pub mod surface;

pub use harness::Harness;
pub use recorder::{Log, Recorder, log};
pub use surface::RecordingSurface;
