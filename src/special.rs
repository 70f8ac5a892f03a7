//! Polygamma functions used by the likelihood equation and Fisher information.

/// Digamma function ψ(x) = d/dx ln Γ(x).
///
/// Returns NaN for x ≤ 0.
#[inline]
pub fn digamma(x: f64) -> f64 {
    if x <= 0.0 {
        return f64::NAN;
    }
    statrs::function::gamma::digamma(x)
}

/// Trigamma function ψ'(x) = d²/dx² ln Γ(x).
///
/// Shifts x above 8 with the recurrence ψ'(x) = ψ'(x+1) + 1/x², then applies
/// the asymptotic series (Abramowitz & Stegun 6.4.12). Returns NaN for x ≤ 0.
pub fn trigamma(x: f64) -> f64 {
    if x <= 0.0 || x.is_nan() {
        return f64::NAN;
    }

    let mut val = 0.0;
    let mut x = x;
    while x < 8.0 {
        val += 1.0 / (x * x);
        x += 1.0;
    }

    // ψ'(x) ≈ 1/x + 1/(2x²) + 1/(6x³) - 1/(30x⁵) + 1/(42x⁷) - 1/(30x⁹)
    let inv_x = 1.0 / x;
    let inv_x2 = inv_x * inv_x;
    val += inv_x
        + 0.5 * inv_x2
        + inv_x2
            * inv_x
            * (1.0 / 6.0 - inv_x2 * (1.0 / 30.0 - inv_x2 * (1.0 / 42.0 - inv_x2 / 30.0)));

    val
}
