// Easing of the displayed scale toward the target, driven one frame at a time.

use crate::geometry::{clamp_scale, MIN_SCALE};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    displayed: f64,
    target: f64,
}

impl Default for Scale {
    fn default() -> Self {
        Self {
            displayed: MIN_SCALE,
            target: MIN_SCALE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameStep {
    /// Moved toward the target; another frame is needed.
    Eased(f64),
    /// Reached the target; the loop goes idle.
    Settled(f64),
}

impl Scale {
    pub fn displayed(&self) -> f64 {
        self.displayed
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn set_target(&mut self, target: f64) {
        self.target = clamp_scale(target);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_settled(&self) -> bool {
        self.displayed == self.target
    }

    /// Eases one frame, then snaps once the remaining gap is below `epsilon`.
    pub fn step(&mut self, smoothing: f64, epsilon: f64) -> FrameStep {
        self.displayed = clamp_scale(self.displayed + (self.target - self.displayed) * smoothing);
        if (self.target - self.displayed).abs() < epsilon {
            self.displayed = self.target;
            return FrameStep::Settled(self.displayed);
        }
        FrameStep::Eased(self.displayed)
    }
}

/// Identity of one scheduled animation loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameToken(pub u64);

#[derive(Debug, Default)]
pub struct FrameLoop {
    issued: u64,
    running: Option<FrameToken>,
}

impl FrameLoop {
    /// Starts a new loop; any earlier token stops being accepted.
    pub fn begin(&mut self) -> FrameToken {
        self.issued += 1;
        let token = FrameToken(self.issued);
        self.running = Some(token);
        token
    }

    pub fn accepts(&self, token: FrameToken) -> bool {
        self.running == Some(token)
    }

    pub fn running(&self) -> Option<FrameToken> {
        self.running
    }

    /// Drops the current loop. Returns whether one was live.
    pub fn stop(&mut self) -> bool {
        self.running.take().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MAX_SCALE;

    #[test]
    fn converges_and_snaps() {
        let mut scale = Scale::default();
        scale.set_target(2.0);
        let mut frames = 0;
        loop {
            frames += 1;
            match scale.step(0.15, 0.001) {
                FrameStep::Eased(v) => assert!(v > 1.0 && v < 2.0),
                FrameStep::Settled(v) => {
                    assert_eq!(v, 2.0);
                    break;
                }
            }
            assert!(frames < 200, "did not converge");
        }
        assert!(scale.is_settled());
    }

    #[test]
    fn first_step_follows_smoothing() {
        let mut scale = Scale::default();
        scale.set_target(3.0);
        assert_eq!(scale.step(0.15, 0.001), FrameStep::Eased(1.3));
    }

    #[test]
    fn gap_at_epsilon_settles_in_one_frame() {
        let mut scale = Scale {
            displayed: 1.0,
            target: 1.001,
        };
        assert_eq!(scale.step(0.15, 0.001), FrameStep::Settled(1.001));
        assert!(scale.is_settled());
    }

    #[test]
    fn settled_steps_are_idempotent() {
        let mut scale = Scale::default();
        assert_eq!(scale.step(0.15, 0.001), FrameStep::Settled(1.0));
        assert_eq!(scale.step(0.15, 0.001), FrameStep::Settled(1.0));
        assert_eq!(scale.displayed(), 1.0);
    }

    #[test]
    fn targets_are_clamped() {
        let mut scale = Scale::default();
        scale.set_target(10.0);
        assert_eq!(scale.target(), MAX_SCALE);
        scale.set_target(-1.0);
        assert_eq!(scale.target(), 1.0);
    }

    #[test]
    fn new_loop_invalidates_old_token() {
        let mut frames = FrameLoop::default();
        let first = frames.begin();
        assert!(frames.accepts(first));
        let second = frames.begin();
        assert!(!frames.accepts(first));
        assert!(frames.accepts(second));
        assert!(frames.stop());
        assert!(!frames.accepts(second));
        assert!(!frames.stop());
    }
}
