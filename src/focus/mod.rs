//! Focus requests and the camera that follows them.

mod camera;
mod director;
mod signal;

pub use camera::{CameraPose, Projection};
pub use director::CameraDirector;
pub use signal::{FocusClock, FocusSignal};
