use super::animator::{FrameLoop, Scale};
use super::gesture::{PinchTracker, TapTracker};

/// Generation counter bumped on every open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionId(pub u64);

// Everything the overlay mutates while open; reset on close
#[derive(Debug, Default)]
pub struct ZoomSession {
    pub active: bool,
    pub id: SessionId,
    pub scale: Scale,
    pub pinch: PinchTracker,
    pub taps: TapTracker,
    pub frames: FrameLoop,
    /// Body overflow captured by the first open, restored on close.
    pub restore_overflow: Option<String>,
}

impl ZoomSession {
    pub fn next_id(&mut self) -> SessionId {
        self.id = SessionId(self.id.0 + 1);
        self.id
    }

    /// Scale and pinch back to rest. Tap history and the session id survive.
    pub fn reset_view(&mut self) {
        self.scale.reset();
        self.pinch.reset();
    }
}
