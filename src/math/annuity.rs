//! Fixed-rate annuity formulas.
//!
//! For a principal `L`, per-period rate `r` and `n` periods, the level payment is:
//!
//! ```text
//! P = L * r * (1 + r)^n / ((1 + r)^n - 1) = L * r / (1 - (1 + r)^-n)
//! ```
//!
//! and the balance outstanding after `k` payments is:
//!
//! ```text
//! B_k = L * (1 - (1 + r)^(k - n)) / (1 - (1 + r)^-n)
//! ```
//!
//! Numerical notes:
//! - `1 - (1 + r)^-m` is computed as `-expm1(-m * ln1p(r))`. It stays in `(0, 1]`
//!   for any finite `r > 0`, so neither small rates (cancellation) nor large rates
//!   (`(1 + r)^n` overflowing) produce NaN.
//! - At `r = 0` both formulas divide by zero; the limits are `P = L / n` and
//!   `B_k = L * (1 - k / n)`, which we return directly.

/// `1 - (1 + r)^-m`, the discounted share of one unit after `m` periods.
fn discount_complement(rate: f64, periods: f64) -> f64 {
    -(-periods * rate.ln_1p()).exp_m1()
}

/// Level payment that amortizes `principal` over `periods` installments.
///
/// Callers validate inputs; `periods` must be > 0 and `rate` >= 0.
pub fn annuity_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    let n = periods as f64;
    if rate == 0.0 {
        return principal / n;
    }
    principal * rate / discount_complement(rate, n)
}

/// Outstanding principal after `paid` of `periods` level installments.
pub fn remaining_balance(principal: f64, rate: f64, periods: u32, paid: u32) -> f64 {
    let n = periods as f64;
    let k = paid as f64;
    if rate == 0.0 {
        return principal * (1.0 - k / n);
    }
    principal * discount_complement(rate, n - k) / discount_complement(rate, n)
}
