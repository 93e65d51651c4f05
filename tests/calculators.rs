//! End-to-end checks through the public library API.

use immo_calc::domain::{Amenities, Condition, EstimationRequest, LoanRequest, PropertyType, Quote};
use immo_calc::io::{new_quote_file, read_quote_json, write_quote_json, write_schedule_csv};
use immo_calc::report::format_quote;
use immo_calc::{
    ValuationTables, amortization_schedule, compare_rates_terms, estimate_value, simulate_loan,
};

fn loan() -> LoanRequest {
    LoanRequest {
        property_price: 300_000.0,
        down_payment: 60_000.0,
        loan_term_years: 20,
        annual_rate_percent: 3.5,
        include_insurance: false,
        include_notary_fees: true,
    }
}

fn apartment() -> EstimationRequest {
    EstimationRequest {
        address: "3 quai Saint-Vincent".to_string(),
        city: "Lyon".to_string(),
        postal_code: "69001".to_string(),
        property_type: PropertyType::Apartment,
        area_sqm: 60.0,
        rooms: 3,
        bedrooms: 2,
        floor: Some(2),
        construction_year: None,
        condition: Condition::Average,
        amenities: Amenities {
            parking: false,
            balcony: true,
            elevator: false,
        },
    }
}

#[test]
fn schedule_agrees_with_summary() {
    let sim = simulate_loan(&loan()).unwrap();
    let schedule = amortization_schedule(&loan()).unwrap();

    assert_eq!(schedule.simulation, sim);
    assert_eq!(schedule.rows.len(), 240);

    let interest: f64 = schedule.rows.iter().map(|r| r.interest).sum();
    assert!((interest - sim.total_interest).abs() < 1e-4, "{interest} vs {}", sim.total_interest);
    assert_eq!(schedule.rows.last().unwrap().balance, 0.0);

    let years = schedule.yearly_summary();
    assert_eq!(years.len(), 20);
    let principal: f64 = years.iter().map(|y| y.principal).sum();
    assert!((principal - sim.loan_amount).abs() < 1e-4);
}

#[test]
fn grid_contains_base_simulation() {
    let rates = [3.0, 3.5];
    let terms = [20, 25];
    let cells = compare_rates_terms(&loan(), &rates, &terms).unwrap();

    let cell = cells
        .iter()
        .find(|c| c.annual_rate_percent == 3.5 && c.loan_term_years == 20)
        .unwrap();
    assert_eq!(cell.simulation, simulate_loan(&loan()).unwrap());
    assert_eq!(cells[1].loan_term_years, 25);
    assert_eq!(cells[2].annual_rate_percent, 3.5);
}

#[test]
fn lyon_apartment_estimate() {
    let res = estimate_value(&apartment(), &ValuationTables::default()).unwrap();
    // 60 * 3500 * 1.3 * 0.9 + 8000
    assert_eq!(res.estimated_price, 253_700.0);
    assert_eq!(res.price_per_sqm, 4_228.0);
    assert_eq!(res.min_price, 228_330.0);
    assert_eq!(res.max_price, 279_070.0);
}

#[test]
fn saved_quotes_render_like_fresh_ones() {
    let dir = std::env::temp_dir().join(format!("immo_it_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();

    let request = apartment();
    let result = estimate_value(&request, &ValuationTables::default()).unwrap();
    let file = new_quote_file(Quote::Estimate { request, result }, "CHF");
    let path = dir.join("estimate.json");
    write_quote_json(&path, &file).unwrap();

    let back = read_quote_json(&path).unwrap();
    assert_eq!(back, file);
    let text = format_quote(&back);
    assert!(text.contains("253,700 CHF"), "{text}");
    assert!(text.contains("Lyon"));

    let schedule = amortization_schedule(&loan()).unwrap();
    let csv = dir.join("schedule.csv");
    write_schedule_csv(&csv, &schedule.rows).unwrap();
    let body = std::fs::read_to_string(&csv).unwrap();
    assert_eq!(body.lines().count(), 241);
    assert!(body.lines().last().unwrap().ends_with(",0.00"));

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn rejected_inputs_name_their_field() {
    let bad_loan = LoanRequest {
        down_payment: 300_000.0,
        ..loan()
    };
    assert_eq!(simulate_loan(&bad_loan).unwrap_err().field(), "down_payment");
    assert_eq!(amortization_schedule(&bad_loan).unwrap_err().field(), "down_payment");

    let bad_area = EstimationRequest {
        area_sqm: 0.0,
        ..apartment()
    };
    let err = estimate_value(&bad_area, &ValuationTables::default()).unwrap_err();
    assert_eq!(err.field(), "area_sqm");
}
