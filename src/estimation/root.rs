//! Derivative-free scalar root finding on the positive half-line.
//!
//! A bracket is grown geometrically around a seed, then refined with Brent's
//! method (inverse quadratic interpolation and secant steps, falling back to
//! bisection). Both phases are capped so a bad seed surfaces as an error
//! instead of looping.

use crate::error::{Error, Result};

/// Growth factor applied to the bracket on each expansion.
const EXPANSION_FACTOR: f64 = 2.0;

/// Settings for [`RootFinder::solve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootFinder {
    /// Absolute tolerance on the root location.
    pub tolerance: f64,
    /// Maximum number of Brent iterations.
    pub max_iterations: usize,
    /// Maximum number of bracket expansions.
    pub max_expansions: usize,
}

impl Default for RootFinder {
    fn default() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 100,
            max_expansions: 64,
        }
    }
}

/// A located root.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root {
    /// Location of the root.
    pub value: f64,
    /// Function value at `value`.
    pub residual: f64,
    /// Brent iterations used.
    pub iterations: usize,
}

impl RootFinder {
    /// Find a root of `f` on (0, ∞), starting the search at `seed > 0`.
    ///
    /// # Errors
    ///
    /// `NoBracket` if no sign change is found within `max_expansions`,
    /// `NoConvergence` if Brent's method exhausts `max_iterations`.
    pub fn solve<F>(&self, mut f: F, seed: f64) -> Result<Root>
    where
        F: FnMut(f64) -> f64,
    {
        let f_seed = f(seed);
        if f_seed == 0.0 {
            return Ok(Root {
                value: seed,
                residual: 0.0,
                iterations: 0,
            });
        }

        let (lo, hi, f_lo, f_hi) = self.bracket(&mut f, seed)?;
        self.brent(&mut f, lo, hi, f_lo, f_hi)
    }

    /// Grow `[seed / F, seed * F]` until `f` changes sign across it.
    ///
    /// The side whose value is closer to zero is moved, which for a monotone
    /// function always walks toward the root.
    fn bracket<F>(&self, f: &mut F, seed: f64) -> Result<(f64, f64, f64, f64)>
    where
        F: FnMut(f64) -> f64,
    {
        let mut lo = seed / EXPANSION_FACTOR;
        let mut hi = seed * EXPANSION_FACTOR;
        let mut f_lo = f(lo);
        let mut f_hi = f(hi);

        for _ in 0..self.max_expansions {
            if !f_lo.is_finite() || !f_hi.is_finite() {
                break;
            }
            if f_lo.signum() != f_hi.signum() || f_lo == 0.0 || f_hi == 0.0 {
                return Ok((lo, hi, f_lo, f_hi));
            }
            if f_lo.abs() < f_hi.abs() {
                lo /= EXPANSION_FACTOR;
                f_lo = f(lo);
            } else {
                hi *= EXPANSION_FACTOR;
                f_hi = f(hi);
            }
        }

        if f_lo.is_finite() && f_hi.is_finite() && f_lo.signum() != f_hi.signum() {
            return Ok((lo, hi, f_lo, f_hi));
        }
        Err(Error::NoBracket {
            expansions: self.max_expansions,
        })
    }

    fn brent<F>(&self, f: &mut F, a: f64, b: f64, fa: f64, fb: f64) -> Result<Root>
    where
        F: FnMut(f64) -> f64,
    {
        let (mut a, mut b, mut fa, mut fb) = (a, b, fa, fb);
        let (mut c, mut fc) = (b, fb);
        let mut d = b - a;
        let mut e = d;

        for iteration in 1..=self.max_iterations {
            if fb.signum() == fc.signum() && fb != 0.0 {
                // Root lies in [a, b]: reset the contrapoint
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * self.tolerance;
            let half = 0.5 * (c - b);
            if half.abs() <= tol || fb == 0.0 {
                return Ok(Root {
                    value: b,
                    residual: fb,
                    iterations: iteration,
                });
            }

            if e.abs() >= tol && fa.abs() > fb.abs() {
                let s = fb / fa;
                let (mut p, mut q) = if a == c {
                    (2.0 * half * s, 1.0 - s)
                } else {
                    let q = fa / fc;
                    let r = fb / fc;
                    (
                        s * (2.0 * half * q * (q - r) - (b - a) * (r - 1.0)),
                        (q - 1.0) * (r - 1.0) * (s - 1.0),
                    )
                };
                if p > 0.0 {
                    q = -q;
                }
                p = p.abs();

                let interp_limit = 3.0 * half * q - (tol * q).abs();
                let step_limit = (e * q).abs();
                if 2.0 * p < interp_limit.min(step_limit) {
                    e = d;
                    d = p / q;
                } else {
                    d = half;
                    e = d;
                }
            } else {
                d = half;
                e = d;
            }

            a = b;
            fa = fb;
            b += if d.abs() > tol { d } else { tol.copysign(half) };
            fb = f(b);
        }

        Err(Error::NoConvergence {
            iterations: self.max_iterations,
            residual: fb,
        })
    }
}
