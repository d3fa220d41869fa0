//! Decorative floating-image motion.
//!
//! Each floating image loops through a short list of keyframes forever.
//! Keyframes are spaced evenly over one period and every segment between two
//! keyframes is eased with the CSS `ease-in-out` curve. Before the start
//! delay has elapsed the image rests on its first keyframe.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::engine::SimTime;

/// Control points of CSS `ease-in-out`.
const EASE_IN_OUT: (f64, f64, f64, f64) = (0.42, 0.0, 0.58, 1.0);

/// Keyframed loop for one decorative image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct FloatMotion {
    /// Image path handed to the asset resolver.
    #[validate(length(min = 1))]
    pub image: String,
    /// Horizontal offset keyframes, px.
    #[validate(length(min = 1))]
    pub x: Vec<f64>,
    /// Vertical offset keyframes, px.
    #[validate(length(min = 1))]
    pub y: Vec<f64>,
    /// Rotation keyframes, degrees.
    #[validate(length(min = 1))]
    pub rotate: Vec<f64>,
    /// Length of one loop.
    #[validate(range(min = 1))]
    pub duration_ms: u64,
    /// Wait before the first loop starts.
    #[serde(default)]
    pub delay_ms: u64,
    /// Constant opacity.
    #[validate(range(min = 0.0, max = 1.0))]
    pub opacity: f64,
}

/// Sampled position of a floating image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Pose {
    pub x: f64,
    pub y: f64,
    pub rotate: f64,
    pub opacity: f64,
}

impl FloatMotion {
    /// Sample the pose at virtual time `t`.
    #[must_use]
    pub fn pose_at(&self, t: SimTime) -> Pose {
        let progress = self.loop_progress(t);
        Pose {
            x: sample(&self.x, progress),
            y: sample(&self.y, progress),
            rotate: sample(&self.rotate, progress),
            opacity: self.opacity,
        }
    }

    /// Fraction of the current loop in `[0, 1)`, or 0 during the delay.
    fn loop_progress(&self, t: SimTime) -> f64 {
        let elapsed = t.as_millis().saturating_sub(self.delay_ms);
        if elapsed == 0 || self.duration_ms == 0 {
            return 0.0;
        }
        (elapsed % self.duration_ms) as f64 / self.duration_ms as f64
    }
}

fn sample(keyframes: &[f64], progress: f64) -> f64 {
    match keyframes {
        [] => 0.0,
        [only] => *only,
        _ => {
            let segments = (keyframes.len() - 1) as f64;
            let scaled = progress.clamp(0.0, 1.0) * segments;
            let index = (scaled.floor() as usize).min(keyframes.len() - 2);
            let local = scaled - index as f64;
            let from = keyframes[index];
            let to = keyframes[index + 1];
            from + (to - from) * ease_in_out(local)
        }
    }
}

/// CSS `ease-in-out`: cubic Bezier through (0,0), (0.42,0), (0.58,1), (1,1).
///
/// Input is clamped to `[0, 1]`.
#[must_use]
pub fn ease_in_out(t: f64) -> f64 {
    let (x1, y1, x2, y2) = EASE_IN_OUT;
    cubic_bezier(x1, y1, x2, y2, t)
}

fn cubic_bezier(x1: f64, y1: f64, x2: f64, y2: f64, x: f64) -> f64 {
    let x = x.clamp(0.0, 1.0);
    if x == 0.0 || x == 1.0 {
        return x;
    }
    let s = solve_curve_x(x1, x2, x);
    bezier_coord(y1, y2, s)
}

fn bezier_coord(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
}

fn bezier_slope(p1: f64, p2: f64, s: f64) -> f64 {
    let inv = 1.0 - s;
    3.0 * inv * inv * p1 + 6.0 * inv * s * (p2 - p1) + 3.0 * s * s * (1.0 - p2)
}

/// Curve parameter `s` whose x coordinate is `x`.
///
/// Newton first; bisection when the slope flattens out.
fn solve_curve_x(x1: f64, x2: f64, x: f64) -> f64 {
    const EPSILON: f64 = 1e-7;

    let mut s = x;
    for _ in 0..8 {
        let err = bezier_coord(x1, x2, s) - x;
        if err.abs() < EPSILON {
            return s;
        }
        let slope = bezier_slope(x1, x2, s);
        if slope.abs() < 1e-6 {
            break;
        }
        s -= err / slope;
    }

    let (mut lo, mut hi) = (0.0, 1.0);
    s = x;
    for _ in 0..64 {
        let value = bezier_coord(x1, x2, s);
        if (value - x).abs() < EPSILON {
            break;
        }
        if value < x {
            lo = s;
        } else {
            hi = s;
        }
        s = (lo + hi) / 2.0;
    }
    s
}

/// The floating-image table of the page.
#[must_use]
pub fn default_floating() -> Vec<FloatMotion> {
    let entry = |n: u8, x: f64, y: f64, rot: (f64, f64), duration_s: u64, delay_ms: u64, opacity: f64| {
        FloatMotion {
            image: format!("/images/floating-3d/floating-{n}.png"),
            x: vec![0.0, x, 0.0],
            y: vec![0.0, y, 0.0],
            rotate: vec![rot.0, rot.1, rot.0],
            duration_ms: duration_s * 1000,
            delay_ms,
            opacity,
        }
    };

    vec![
        entry(3, 50.0, -15.0, (-1.0, 2.0), 9, 1000, 0.25),
        entry(4, -45.0, 20.0, (2.0, -2.0), 11, 1500, 0.30),
        entry(5, 40.0, -25.0, (-2.0, 1.0), 7, 2000, 0.28),
        entry(6, -50.0, 18.0, (3.0, -1.0), 10, 2500, 0.32),
        entry(7, 45.0, -20.0, (-1.0, 2.0), 12, 3000, 0.27),
        entry(8, -40.0, 22.0, (2.0, -3.0), 9, 3500, 0.30),
        entry(1, 60.0, -18.0, (-2.0, 1.0), 13, 4000, 0.20),
        entry(3, -55.0, 28.0, (3.0, -2.0), 11, 4500, 0.22),
        entry(5, 48.0, -22.0, (-1.0, 2.0), 10, 5000, 0.24),
    ]
}
