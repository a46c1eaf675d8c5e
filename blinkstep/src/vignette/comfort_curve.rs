use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One speed-to-radius key of the comfort curve.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CurveKey {
    pub speed: f32,
    pub radius: f32,
}

/// Maps movement speed to a vignette radius.
pub trait VignetteRadiusStrategy {
    fn radius_for_speed(&self, speed: f32) -> f32;
}

/// Piecewise-linear speed-to-radius curve. Keys are kept sorted by speed;
/// sampling clamps outside the key range.
#[derive(Clone, Debug)]
pub struct ComfortCurve {
    keys: Vec<CurveKey>,
}

impl ComfortCurve {
    /// Build a curve from keys in any order. Non-finite keys are dropped.
    pub fn from_keys(keys: Vec<CurveKey>) -> Self {
        let mut keys: Vec<CurveKey> = keys
            .into_iter()
            .filter(|key| {
                let finite = key.speed.is_finite() && key.radius.is_finite();
                if !finite {
                    warn!("Dropping non-finite comfort curve key {:?}", key);
                }
                finite
            })
            .collect();
        keys.sort_by_key(|key| OrderedFloat(key.speed));
        ComfortCurve { keys }
    }

    /// Sample the curve at `speed`. An empty curve reads fully open.
    pub fn sample(&self, speed: f32) -> f32 {
        if self.keys.is_empty() {
            return 1.0;
        }

        let first = self.keys[0];
        let last = self.keys[self.keys.len() - 1];
        if speed <= first.speed {
            return first.radius;
        }
        if speed >= last.speed {
            return last.radius;
        }

        for pair in self.keys.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if speed <= b.speed {
                let span = b.speed - a.speed;
                if span <= f32::EPSILON {
                    return b.radius;
                }
                let t = (speed - a.speed) / span;
                return a.radius + (b.radius - a.radius) * t;
            }
        }

        last.radius
    }
}

impl VignetteRadiusStrategy for ComfortCurve {
    fn radius_for_speed(&self, speed: f32) -> f32 {
        self.sample(speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(speed: f32, radius: f32) -> CurveKey {
        CurveKey { speed, radius }
    }

    #[test]
    fn test_sampling_clamps_outside_key_range() {
        let curve = ComfortCurve::from_keys(vec![key(0.0, 1.0), key(150.0, 0.8), key(600.0, 0.45)]);

        assert_eq!(curve.sample(-50.0), 1.0);
        assert_eq!(curve.sample(0.0), 1.0);
        assert_eq!(curve.sample(600.0), 0.45);
        assert_eq!(curve.sample(5000.0), 0.45);
    }

    #[test]
    fn test_sampling_interpolates_between_keys() {
        let curve = ComfortCurve::from_keys(vec![key(0.0, 1.0), key(150.0, 0.8), key(600.0, 0.45)]);

        assert!((curve.sample(75.0) - 0.9).abs() < 1e-6);
        assert!((curve.sample(375.0) - 0.625).abs() < 1e-6);
    }

    #[test]
    fn test_unsorted_keys_are_sorted_by_speed() {
        let curve = ComfortCurve::from_keys(vec![key(600.0, 0.45), key(0.0, 1.0), key(150.0, 0.8)]);

        assert!((curve.sample(75.0) - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_non_finite_keys_are_dropped() {
        let curve = ComfortCurve::from_keys(vec![
            key(f32::NAN, 0.2),
            key(0.0, 1.0),
            key(100.0, 0.5),
            key(f32::INFINITY, 0.0),
        ]);

        assert_eq!(curve.sample(200.0), 0.5);
        assert!((curve.sample(50.0) - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_empty_curve_reads_fully_open() {
        let curve = ComfortCurve::from_keys(vec![]);
        assert_eq!(curve.sample(300.0), 1.0);
    }
}
