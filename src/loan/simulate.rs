//! Fixed-rate loan simulation.
//!
//! Given a `LoanRequest` we compute, in one pass:
//! - the principal `L = price - down payment`
//! - the level monthly payment (principal + interest) over `n = years * 12`
//! - optional borrower insurance and notary fees
//! - total interest and total cost of the purchase
//!
//! Input is validated up front; a rejected request never yields partial figures.

use tracing::debug;

use crate::domain::{LoanRequest, LoanSimulation};
use crate::error::CalcError;
use crate::math::annuity_payment;

/// Monthly insurance surcharge as a fraction of the P&I payment.
///
/// A flat simplification, not a real insurance quote.
pub const INSURANCE_RATE: f64 = 0.036;

/// Notary fees as a fraction of the property price.
pub const NOTARY_FEE_RATE: f64 = 0.08;

/// Longest accepted term; also bounds the schedule at 1200 rows.
pub const MAX_LOAN_TERM_YEARS: u32 = 100;

/// Simulate a fixed-rate loan.
pub fn simulate_loan(request: &LoanRequest) -> Result<LoanSimulation, CalcError> {
    let result = validate_loan_request(request).and_then(|n| compute(request, n));
    if let Err(err) = &result {
        debug!(%err, "loan request rejected");
    }
    result
}

fn compute(request: &LoanRequest, n: u32) -> Result<LoanSimulation, CalcError> {
    let loan_amount = request.loan_amount();
    let monthly_payment = annuity_payment(loan_amount, request.monthly_rate(), n);

    let insurance_monthly_cost = if request.include_insurance {
        monthly_payment * INSURANCE_RATE
    } else {
        0.0
    };
    let notary_fees = if request.include_notary_fees {
        request.property_price * NOTARY_FEE_RATE
    } else {
        0.0
    };

    let total_interest = monthly_payment * n as f64 - loan_amount;
    let total_cost = request.property_price + total_interest + notary_fees;

    let total_monthly_payment = monthly_payment + insurance_monthly_cost;
    if ![monthly_payment, total_monthly_payment, total_interest, total_cost]
        .iter()
        .all(|v| v.is_finite())
    {
        // Above 100 % a month the rate alone drives the overflow.
        let field = if request.monthly_rate() > 1.0 {
            "annual_rate_percent"
        } else {
            "property_price"
        };
        return Err(CalcError::invalid(
            field,
            "loan figures exceed the representable range",
        ));
    }

    debug!(
        loan_amount,
        months = n,
        rate = request.annual_rate_percent,
        monthly_payment,
        "loan simulated"
    );

    Ok(LoanSimulation {
        loan_amount,
        number_of_payments: n,
        monthly_payment,
        insurance_monthly_cost,
        total_monthly_payment,
        total_interest,
        notary_fees,
        total_cost,
    })
}

/// Check a request against the calculator's input bounds.
///
/// Returns the number of monthly installments.
pub fn validate_loan_request(request: &LoanRequest) -> Result<u32, CalcError> {
    let price = request.property_price;
    let down = request.down_payment;
    let rate = request.annual_rate_percent;

    if !(price.is_finite() && price > 0.0) {
        return Err(CalcError::invalid(
            "property_price",
            format!("must be a finite amount > 0 (got {price})"),
        ));
    }
    if !(down.is_finite() && down >= 0.0) {
        return Err(CalcError::invalid(
            "down_payment",
            format!("must be a finite amount >= 0 (got {down})"),
        ));
    }
    if down >= price {
        return Err(CalcError::invalid(
            "down_payment",
            format!("must be below the property price ({down} >= {price})"),
        ));
    }
    let years = request.loan_term_years;
    if years == 0 || years > MAX_LOAN_TERM_YEARS {
        return Err(CalcError::invalid(
            "loan_term_years",
            format!("must be within 1-{MAX_LOAN_TERM_YEARS} (got {years})"),
        ));
    }
    let n = request.number_of_payments().ok_or_else(|| {
        CalcError::invalid("loan_term_years", format!("{years} years is too many installments"))
    })?;
    if !(rate.is_finite() && rate >= 0.0) {
        return Err(CalcError::invalid(
            "annual_rate_percent",
            format!("must be a finite rate >= 0 (got {rate})"),
        ));
    }
    Ok(n)
}
