pub mod animator;
pub mod discovery;
pub mod gesture;
pub mod session;

pub use animator::{FrameLoop, FrameStep, FrameToken, Scale};
pub use discovery::DiscoveryQueue;
pub use gesture::{wheel_target, ImageKey, PinchReference, PinchTracker, TapRecord, TapTracker};
pub use session::{SessionId, ZoomSession};
