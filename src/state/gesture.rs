// Tap, pinch and wheel interpretation. Pure state, no dom access.

use crate::geometry::{clamp_scale, distance_between_touches, Point};

/// Identity handed out to each bound image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageKey(pub u32);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TapRecord {
    pub image: ImageKey,
    pub at_ms: f64,
}

#[derive(Debug, Default, Clone)]
pub struct TapTracker {
    last: Option<TapRecord>,
}

impl TapTracker {
    /// Records a tap and reports whether it completes a double tap.
    pub fn register(&mut self, image: ImageKey, at_ms: f64, window_ms: f64) -> bool {
        if let Some(prev) = self.last {
            let elapsed = at_ms - prev.at_ms;
            if prev.image == image && elapsed >= 0.0 && elapsed <= window_ms {
                self.last = None;
                return true;
            }
        }
        self.last = Some(TapRecord { image, at_ms });
        false
    }

    pub fn last(&self) -> Option<TapRecord> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PinchReference {
    pub distance: f64,
    pub scale: f64,
}

#[derive(Debug, Default, Clone)]
pub struct PinchTracker {
    reference: Option<PinchReference>,
}

impl PinchTracker {
    pub fn start(&mut self, touches: &[Point], scale: f64) {
        self.reference = if touches.len() == 2 {
            Some(PinchReference {
                distance: distance_between_touches(touches),
                scale,
            })
        } else {
            None
        };
    }

    /// Computes the new target scale for a move and re-bases on it.
    /// Returns `None` when the move is not a two-finger pinch.
    pub fn update(&mut self, touches: &[Point], current_scale: f64) -> Option<f64> {
        if touches.len() != 2 {
            self.reference = None;
            return None;
        }
        let distance = distance_between_touches(touches);
        if distance <= 0.0 {
            return None;
        }
        let reference = match self.reference {
            Some(r) if r.distance > 0.0 => r,
            _ => PinchReference {
                distance,
                scale: current_scale,
            },
        };
        let target = clamp_scale(reference.scale * (distance / reference.distance));
        self.reference = Some(PinchReference {
            distance,
            scale: target,
        });
        Some(target)
    }

    pub fn end(&mut self, remaining: usize) {
        if remaining < 2 {
            self.reference = None;
        }
    }

    pub fn reference(&self) -> Option<PinchReference> {
        self.reference
    }

    pub fn reset(&mut self) {
        self.reference = None;
    }
}

pub fn wheel_target(current: f64, delta_y: f64, sensitivity: f64) -> f64 {
    clamp_scale(current - delta_y * sensitivity)
}
