//! Timing curves for the spin transition

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing function
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
}

impl CubicBezier {
    /// Fast start, long gentle stop
    pub const SPIN: CubicBezier = CubicBezier::new(0.1, 0.7, 0.1, 1.0);

    pub const LINEAR: CubicBezier = CubicBezier::new(0.0, 0.0, 1.0, 1.0);

    /// `x1` and `x2` must lie in `[0, 1]` for the curve to be a function of time
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Map linear progress in `[0, 1]` to eased progress
    pub fn ease(&self, progress: f64) -> f64 {
        if progress <= 0.0 {
            return 0.0;
        }
        if progress >= 1.0 {
            return 1.0;
        }
        let t = self.solve_t(progress);
        sample(self.y1, self.y2, t)
    }

    /// Find the curve parameter whose x coordinate is `x`
    fn solve_t(&self, x: f64) -> f64 {
        const EPSILON: f64 = 1e-7;

        // Newton-Raphson converges in a few steps for well-behaved curves
        let mut t = x;
        for _ in 0..8 {
            let err = sample(self.x1, self.x2, t) - x;
            if err.abs() < EPSILON {
                return t;
            }
            let slope = sample_derivative(self.x1, self.x2, t);
            if slope.abs() < 1e-6 {
                break;
            }
            t -= err / slope;
        }

        // Bisection fallback
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        for _ in 0..64 {
            let value = sample(self.x1, self.x2, t);
            if (value - x).abs() < EPSILON {
                break;
            }
            if value < x {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
        t
    }
}

/// One coordinate of the curve with end points fixed at 0 and 1
fn sample(a1: f64, a2: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * a1 + 3.0 * u * t * t * a2 + t * t * t
}

fn sample_derivative(a1: f64, a2: f64, t: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * a1 + 6.0 * u * t * (a2 - a1) + 3.0 * t * t * (1.0 - a2)
}
