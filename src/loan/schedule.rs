//! Amortization schedule (one row per installment).
//!
//! Balances come from the closed-form remaining-balance formula rather than a
//! running subtraction, so rounding error does not accumulate over 360 rows and
//! the last balance is exactly zero.

use tracing::debug;

use crate::domain::{AmortizationRow, LoanRequest, LoanSimulation, YearlyRow};
use crate::error::CalcError;
use crate::loan::simulate_loan;
use crate::math::remaining_balance;

/// Full installment table for a loan.
#[derive(Debug, Clone)]
pub struct AmortizationSchedule {
    pub simulation: LoanSimulation,
    pub rows: Vec<AmortizationRow>,
}

/// Build the per-installment schedule for a request.
pub fn amortization_schedule(request: &LoanRequest) -> Result<AmortizationSchedule, CalcError> {
    let simulation = simulate_loan(request)?;
    let principal = simulation.loan_amount;
    let rate = request.monthly_rate();
    let payment = simulation.monthly_payment;
    let n = simulation.number_of_payments;

    let mut rows = Vec::with_capacity(n as usize);
    let mut prev_balance = principal;
    for period in 1..=n {
        let balance = remaining_balance(principal, rate, n, period);
        let interest = prev_balance * rate;
        rows.push(AmortizationRow {
            period,
            year: (period - 1) / 12 + 1,
            payment,
            principal: payment - interest,
            interest,
            balance,
        });
        prev_balance = balance;
    }

    debug!(rows = rows.len(), "amortization schedule built");

    Ok(AmortizationSchedule { simulation, rows })
}

impl AmortizationSchedule {
    /// Fold installments per loan year.
    pub fn yearly_summary(&self) -> Vec<YearlyRow> {
        let mut out: Vec<YearlyRow> = Vec::new();
        for row in &self.rows {
            match out.last_mut() {
                Some(last) if last.year == row.year => {
                    last.payment += row.payment;
                    last.principal += row.principal;
                    last.interest += row.interest;
                    last.balance = row.balance;
                }
                _ => out.push(YearlyRow {
                    year: row.year,
                    payment: row.payment,
                    principal: row.principal,
                    interest: row.interest,
                    balance: row.balance,
                }),
            }
        }
        out
    }

    /// `(years elapsed, balance)` points starting at the full principal.
    pub fn balance_curve(&self) -> Vec<(f64, f64)> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push((0.0, self.simulation.loan_amount));
        for row in &self.rows {
            out.push((row.period as f64 / 12.0, row.balance));
        }
        out
    }

    /// `(years elapsed, cumulative interest paid)` points starting at zero.
    pub fn cumulative_interest_curve(&self) -> Vec<(f64, f64)> {
        let mut out = Vec::with_capacity(self.rows.len() + 1);
        out.push((0.0, 0.0));
        let mut paid = 0.0;
        for row in &self.rows {
            paid += row.interest;
            out.push((row.period as f64 / 12.0, paid));
        }
        out
    }
}
