use crate::config::ZoomConfig;
use crate::geometry::Point;
use crate::host::Host;
use crate::state::{wheel_target, FrameStep, FrameToken, ImageKey, SessionId, ZoomSession};

const SCROLL_LOCKED: &str = "hidden";

/// Where a click on the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Background,
    /// The preview image, or anything else inside the overlay.
    Preview,
}

/// The overlay state machine. Owns the session and the host it renders through.
pub struct ZoomController<H: Host> {
    host: H,
    config: ZoomConfig,
    session: ZoomSession,
}

impl<H: Host> ZoomController<H> {
    pub fn new(host: H, config: ZoomConfig) -> Self {
        Self {
            host,
            config,
            session: ZoomSession::default(),
        }
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn session(&self) -> &ZoomSession {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.active
    }

    pub fn displayed_scale(&self) -> f64 {
        self.session.scale.displayed()
    }

    pub fn target_scale(&self) -> f64 {
        self.session.scale.target()
    }

    pub fn open(&mut self, src: &str, alt: &str) -> bool {
        if src.trim().is_empty() {
            log::debug!("zoom: ignoring open without an image source");
            return false;
        }
        self.cancel_animation();
        self.session.reset_view();
        self.host.apply_scale(self.session.scale.displayed());
        self.host.show_overlay(src, alt);
        if !self.session.active {
            // Only the first open captures; a re-open must not record our own lock.
            self.session.restore_overflow = Some(self.host.body_overflow());
            self.host.set_body_overflow(SCROLL_LOCKED);
            self.session.active = true;
        }
        let id = self.session.next_id();
        log::debug!("zoom: opened session {} for {}", id.0, src);
        true
    }

    pub fn close(&mut self) {
        if !self.session.active {
            return;
        }
        self.session.active = false;
        self.host.hide_overlay();
        let restore = self.session.restore_overflow.take().unwrap_or_default();
        self.host.set_body_overflow(&restore);
        self.cancel_animation();
        self.session.reset_view();
        self.session.taps.reset();
        self.host.apply_scale(self.session.scale.displayed());
        self.host
            .schedule_source_clear(self.config.clear_delay_ms, self.session.id);
        log::debug!("zoom: closed session {}", self.session.id.0);
    }

    /// Deferred teardown after a close. Skipped when a newer session is open.
    pub fn on_clear_timer(&mut self, session: SessionId) {
        if self.session.active || session != self.session.id {
            log::debug!("zoom: skipping stale source clear for session {}", session.0);
            return;
        }
        self.host.clear_preview_source();
    }

    /// A click/tap on a bound image. Returns whether it opened the overlay.
    pub fn on_image_tap(&mut self, image: ImageKey, at_ms: f64, src: &str, alt: &str) -> bool {
        let window = self.config.double_tap_ms;
        if self.session.taps.register(image, at_ms, window) {
            return self.open(src, alt);
        }
        false
    }

    pub fn on_image_double_click(&mut self, src: &str, alt: &str) -> bool {
        self.session.taps.reset();
        self.open(src, alt)
    }

    pub fn on_overlay_click(&mut self, target: ClickTarget) {
        if target == ClickTarget::Background {
            self.close();
        }
    }

    pub fn on_key(&mut self, key: &str) {
        if key == "Escape" && self.session.active {
            self.close();
        }
    }

    /// Returns whether the event was consumed and its default should be suppressed.
    pub fn on_wheel(&mut self, delta_y: f64) -> bool {
        if !self.session.active {
            return false;
        }
        let target = wheel_target(
            self.session.scale.target(),
            delta_y,
            self.config.wheel_sensitivity,
        );
        self.retarget(target);
        true
    }

    pub fn on_touch_start(&mut self, touches: &[Point]) {
        if !self.session.active {
            return;
        }
        let scale = self.session.scale.target();
        self.session.pinch.start(touches, scale);
    }

    /// Returns whether the move was a pinch whose default should be suppressed.
    pub fn on_touch_move(&mut self, touches: &[Point]) -> bool {
        if !self.session.active {
            return false;
        }
        let current = self.session.scale.target();
        match self.session.pinch.update(touches, current) {
            Some(target) => {
                self.retarget(target);
                true
            }
            None => false,
        }
    }

    pub fn on_touch_end(&mut self, remaining: usize) {
        self.session.pinch.end(remaining);
    }

    pub fn on_frame(&mut self, token: FrameToken) {
        if !self.session.frames.accepts(token) {
            return;
        }
        let step = self
            .session
            .scale
            .step(self.config.smoothing, self.config.settle_epsilon);
        match step {
            FrameStep::Eased(scale) => {
                self.host.apply_scale(scale);
                self.schedule(token);
            }
            FrameStep::Settled(scale) => {
                self.host.apply_scale(scale);
                self.session.frames.stop();
            }
        }
    }

    fn retarget(&mut self, target: f64) {
        self.session.scale.set_target(target);
        if self.session.frames.running().is_none() && !self.session.scale.is_settled() {
            let token = self.session.frames.begin();
            self.schedule(token);
        }
    }

    // A refused frame ends the loop so the next retarget can start a fresh one.
    fn schedule(&mut self, token: FrameToken) {
        if !self.host.request_frame(token) {
            self.session.frames.stop();
        }
    }

    fn cancel_animation(&mut self) {
        if self.session.frames.stop() {
            self.host.cancel_frame();
        }
    }
}
