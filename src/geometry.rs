// Touch geometry and scale bounds shared by the gesture and animation code.

pub const MIN_SCALE: f64 = 1.0;
pub const MAX_SCALE: f64 = 4.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Distance between the first two contacts, or 0 when fewer than two are down.
pub fn distance_between_touches(points: &[Point]) -> f64 {
    match points {
        [a, b, ..] => {
            let dx = a.x - b.x;
            let dy = a.y - b.y;
            (dx * dx + dy * dy).sqrt()
        }
        _ => 0.0,
    }
}

pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamp into `[MIN_SCALE, MAX_SCALE]`. NaN collapses to `MIN_SCALE`.
pub fn clamp_scale(value: f64) -> f64 {
    if value.is_nan() {
        return MIN_SCALE;
    }
    clamp(value, MIN_SCALE, MAX_SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_needs_two_points() {
        assert_eq!(distance_between_touches(&[]), 0.0);
        assert_eq!(distance_between_touches(&[Point::new(4.0, 4.0)]), 0.0);
    }

    #[test]
    fn distance_is_euclidean() {
        let d = distance_between_touches(&[Point::new(0.0, 0.0), Point::new(3.0, 4.0)]);
        assert_eq!(d, 5.0);
        let d = distance_between_touches(&[Point::new(3.0, 4.0), Point::new(0.0, 0.0)]);
        assert_eq!(d, 5.0);
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp(0.5, 1.0, 4.0), 1.0);
        assert_eq!(clamp(2.5, 1.0, 4.0), 2.5);
        assert_eq!(clamp(9.0, 1.0, 4.0), 4.0);
    }

    #[test]
    fn clamp_scale_handles_nan_and_infinity() {
        assert_eq!(clamp_scale(f64::NAN), MIN_SCALE);
        assert_eq!(clamp_scale(f64::INFINITY), MAX_SCALE);
        assert_eq!(clamp_scale(f64::NEG_INFINITY), MIN_SCALE);
    }
}
