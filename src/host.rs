use crate::state::{FrameToken, SessionId};

/// Rendering and scheduling environment the controller drives.
///
/// Scheduling calls are fire-and-forget: the host later calls back into
/// [`ZoomController::on_frame`](crate::controller::ZoomController::on_frame)
/// and [`ZoomController::on_clear_timer`](crate::controller::ZoomController::on_clear_timer)
/// with the token or session it was given.
pub trait Host {
    fn show_overlay(&mut self, src: &str, alt: &str);
    fn hide_overlay(&mut self);
    fn clear_preview_source(&mut self);
    fn apply_scale(&mut self, scale: f64);

    fn body_overflow(&self) -> String;
    fn set_body_overflow(&mut self, value: &str);

    /// Returns `false` when the platform refused to schedule the frame.
    fn request_frame(&mut self, token: FrameToken) -> bool;
    fn cancel_frame(&mut self);
    fn schedule_source_clear(&mut self, delay_ms: u32, session: SessionId);
}
