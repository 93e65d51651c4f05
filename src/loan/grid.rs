//! Rate × term comparison grid.
//!
//! Each cell is an independent `simulate_loan` call, so cells are evaluated in
//! parallel. Output order is row-major over `(rates, terms)` regardless of
//! scheduling.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::{GridCell, LoanRequest};
use crate::error::CalcError;
use crate::loan::simulate_loan;

/// Default rates (percent) offered by `immo compare`.
pub const DEFAULT_RATES: [f64; 5] = [2.5, 3.0, 3.5, 4.0, 4.5];

/// Default terms (years) offered by `immo compare`.
pub const DEFAULT_TERMS: [u32; 4] = [15, 20, 25, 30];

/// Simulate `base` for every `(rate, term)` combination.
///
/// Any rejected combination rejects the whole grid.
pub fn compare_rates_terms(
    base: &LoanRequest,
    rates: &[f64],
    terms: &[u32],
) -> Result<Vec<GridCell>, CalcError> {
    if rates.is_empty() {
        return Err(CalcError::invalid("rates", "at least one rate is required"));
    }
    if terms.is_empty() {
        return Err(CalcError::invalid("terms", "at least one term is required"));
    }

    let combos: Vec<(f64, u32)> = rates
        .iter()
        .flat_map(|&r| terms.iter().map(move |&t| (r, t)))
        .collect();

    let cells = combos
        .par_iter()
        .map(|&(annual_rate_percent, loan_term_years)| {
            let request = LoanRequest {
                annual_rate_percent,
                loan_term_years,
                ..*base
            };
            simulate_loan(&request).map(|simulation| GridCell {
                annual_rate_percent,
                loan_term_years,
                simulation,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(cells = cells.len(), "comparison grid evaluated");
    Ok(cells)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> LoanRequest {
        LoanRequest {
            property_price: 250_000.0,
            down_payment: 50_000.0,
            loan_term_years: 25,
            annual_rate_percent: 3.0,
            include_insurance: false,
            include_notary_fees: true,
        }
    }

    #[test]
    fn grid_is_row_major() {
        let cells = compare_rates_terms(&base(), &DEFAULT_RATES, &DEFAULT_TERMS).unwrap();
        assert_eq!(cells.len(), DEFAULT_RATES.len() * DEFAULT_TERMS.len());
        for (i, cell) in cells.iter().enumerate() {
            assert_eq!(cell.annual_rate_percent, DEFAULT_RATES[i / DEFAULT_TERMS.len()]);
            assert_eq!(cell.loan_term_years, DEFAULT_TERMS[i % DEFAULT_TERMS.len()]);
        }
    }

    #[test]
    fn cells_match_direct_simulation() {
        let cells = compare_rates_terms(&base(), &[3.5], &[20]).unwrap();
        let direct = simulate_loan(&LoanRequest {
            annual_rate_percent: 3.5,
            loan_term_years: 20,
            ..base()
        })
        .unwrap();
        assert_eq!(cells[0].simulation, direct);
    }

    #[test]
    fn longer_terms_cost_more_interest() {
        let cells = compare_rates_terms(&base(), &[4.0], &[15, 20, 25, 30]).unwrap();
        for pair in cells.windows(2) {
            assert!(pair[1].simulation.monthly_payment < pair[0].simulation.monthly_payment);
            assert!(pair[1].simulation.total_interest > pair[0].simulation.total_interest);
        }
    }

    #[test]
    fn one_bad_cell_rejects_grid() {
        let err = compare_rates_terms(&base(), &[3.0, -1.0], &[20]).unwrap_err();
        assert_eq!(err.field(), "annual_rate_percent");
        assert!(compare_rates_terms(&base(), &[], &[20]).is_err());
        assert!(compare_rates_terms(&base(), &[3.0], &[]).is_err());
    }
}
