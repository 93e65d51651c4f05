//! Shared calculation workflow used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! request -> simulation -> schedule (loan) or request -> estimate (valuation)
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::domain::{EstimationRequest, EstimationResult, LoanRequest, LoanSimulation};
use crate::error::CalcError;
use crate::loan::{AmortizationSchedule, amortization_schedule};
use crate::valuation::{ValuationTables, estimate_value};

/// All computed outputs for one loan request.
#[derive(Debug, Clone)]
pub struct LoanRun {
    pub request: LoanRequest,
    pub schedule: AmortizationSchedule,
}

impl LoanRun {
    pub fn simulation(&self) -> &LoanSimulation {
        &self.schedule.simulation
    }
}

/// Simulate a loan and expand its schedule.
pub fn run_loan(request: &LoanRequest) -> Result<LoanRun, CalcError> {
    let schedule = amortization_schedule(request)?;
    Ok(LoanRun {
        request: *request,
        schedule,
    })
}

/// All computed outputs for one valuation request.
#[derive(Debug, Clone)]
pub struct EstimateRun {
    pub request: EstimationRequest,
    pub result: EstimationResult,
}

/// Run the valuation heuristic.
pub fn run_estimate(
    request: &EstimationRequest,
    tables: &ValuationTables,
) -> Result<EstimateRun, CalcError> {
    let result = estimate_value(request, tables)?;
    Ok(EstimateRun {
        request: request.clone(),
        result,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loan::simulate_loan;

    #[test]
    fn loan_run_matches_direct_simulation() {
        let request = LoanRequest {
            property_price: 400_000.0,
            down_payment: 80_000.0,
            loan_term_years: 25,
            annual_rate_percent: 3.9,
            include_insurance: true,
            include_notary_fees: true,
        };
        let run = run_loan(&request).unwrap();
        assert_eq!(*run.simulation(), simulate_loan(&request).unwrap());
        assert_eq!(run.schedule.rows.len(), 300);
    }

    #[test]
    fn rejected_request_produces_no_run() {
        let request = LoanRequest {
            property_price: 100_000.0,
            down_payment: 100_000.0,
            loan_term_years: 20,
            annual_rate_percent: 3.0,
            include_insurance: false,
            include_notary_fees: false,
        };
        assert!(run_loan(&request).is_err());
    }
}
