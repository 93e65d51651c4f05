//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the calculators stay clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::domain::{
    AmortizationRow, EstimationRequest, EstimationResult, GridCell, LoanRequest, LoanSimulation,
    Quote, QuoteFile, YearlyRow,
};

/// Format the loan summary block.
pub fn format_loan_summary(request: &LoanRequest, sim: &LoanSimulation, currency: &str) -> String {
    let mut out = String::new();

    out.push_str("=== immo - Loan simulation ===\n");
    out.push_str(&format!("Property price : {}\n", fmt_money(request.property_price, currency)));
    out.push_str(&format!("Down payment   : {}\n", fmt_money(request.down_payment, currency)));
    out.push_str(&format!(
        "Term / rate    : {} years ({} payments) at {:.2}%\n",
        request.loan_term_years, sim.number_of_payments, request.annual_rate_percent
    ));
    out.push('\n');

    out.push_str(&format!("Loan amount        : {}\n", fmt_money(sim.loan_amount, currency)));
    out.push_str(&format!("Monthly payment    : {}\n", fmt_money(sim.monthly_payment, currency)));
    if request.include_insurance {
        out.push_str(&format!(
            "Insurance / month  : {}\n",
            fmt_money(sim.insurance_monthly_cost, currency)
        ));
    }
    out.push_str(&format!(
        "Total per month    : {}\n",
        fmt_money(sim.total_monthly_payment, currency)
    ));
    out.push_str(&format!("Total interest     : {}\n", fmt_money(sim.total_interest, currency)));
    if request.include_notary_fees {
        out.push_str(&format!("Notary fees        : {}\n", fmt_money(sim.notary_fees, currency)));
    }
    out.push_str(&format!("Total cost         : {}\n", fmt_money(sim.total_cost, currency)));

    out
}

/// Format a yearly amortization table.
pub fn format_yearly_table(rows: &[YearlyRow], currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&table_header("year", currency));
    for r in rows {
        out.push_str(
            format!(
                "{:>6} {:>16} {:>16} {:>16} {:>16}\n",
                r.year,
                fmt_amount(r.payment),
                fmt_amount(r.principal),
                fmt_amount(r.interest),
                fmt_amount(r.balance),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

/// Format a monthly amortization table.
pub fn format_monthly_table(rows: &[AmortizationRow], currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&table_header("month", currency));
    for r in rows {
        out.push_str(
            format!(
                "{:>6} {:>16} {:>16} {:>16} {:>16}\n",
                r.period,
                fmt_amount(r.payment),
                fmt_amount(r.principal),
                fmt_amount(r.interest),
                fmt_amount(r.balance),
            )
            .trim_end(),
        );
        out.push('\n');
    }
    out
}

fn table_header(period_label: &str, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Amounts in {currency}\n"));
    out.push_str(
        format!(
            "{:>6} {:>16} {:>16} {:>16} {:>16}\n",
            period_label, "payment", "principal", "interest", "balance"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:->6} {:->16} {:->16} {:->16} {:->16}\n", "", "", "", "", "").trim_end());
    out.push('\n');
    out
}

/// Format a rate × term grid of monthly payments (rates down, terms across).
pub fn format_grid(cells: &[GridCell], rates: &[f64], terms: &[u32], currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!("Monthly payment (P&I, {currency}) by rate and term\n"));

    let mut header = format!("{:>8}", "rate");
    for t in terms {
        header.push_str(&format!(" {:>12}", format!("{t}y")));
    }
    out.push_str(&header);
    out.push('\n');
    out.push_str(&"-".repeat(header.len()));
    out.push('\n');

    for (i, rate) in rates.iter().enumerate() {
        let mut line = format!("{:>7.2}%", rate);
        for j in 0..terms.len() {
            let cell = cells.get(i * terms.len() + j);
            let v = cell
                .map(|c| fmt_amount(c.simulation.monthly_payment))
                .unwrap_or_else(|| "-".to_string());
            line.push_str(&format!(" {v:>12}"));
        }
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Format a valuation report.
pub fn format_estimate(request: &EstimationRequest, res: &EstimationResult, currency: &str) -> String {
    let mut out = String::new();

    out.push_str("=== immo - Property estimate ===\n");
    let location = [request.address.as_str(), request.postal_code.as_str(), request.city.as_str()]
        .iter()
        .filter(|s| !s.trim().is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join(", ");
    if !location.is_empty() {
        out.push_str(&format!("Location  : {location}\n"));
    }
    out.push_str(&format!(
        "Property  : {} | {:.1} m² | {} rooms, {} bedrooms | {}\n",
        request.property_type.display_name(),
        request.area_sqm,
        request.rooms,
        request.bedrooms,
        request.condition.display_name(),
    ));
    let mut extras = Vec::new();
    if let Some(floor) = request.floor {
        extras.push(format!("floor {floor}"));
    }
    if let Some(year) = request.construction_year {
        extras.push(format!("built {year}"));
    }
    if request.amenities.parking {
        extras.push("parking".to_string());
    }
    if request.amenities.balcony {
        extras.push("balcony".to_string());
    }
    if request.amenities.elevator {
        extras.push("elevator".to_string());
    }
    if !extras.is_empty() {
        out.push_str(&format!("Details   : {}\n", extras.join(", ")));
    }
    out.push('\n');

    out.push_str(&format!("Estimated price : {}\n", fmt_whole(res.estimated_price, currency)));
    out.push_str(&format!("Price per m²    : {}\n", fmt_whole(res.price_per_sqm, currency)));
    out.push_str(&format!(
        "Range           : {} - {}\n",
        fmt_whole(res.min_price, currency),
        fmt_whole(res.max_price, currency)
    ));
    out.push_str(&format!(
        "Confidence      : {}% (based on {} comparable properties)\n",
        res.confidence_level, res.comparable_properties_count
    ));
    out.push('\n');

    out.push_str("Breakdown:\n");
    out.push_str(&format!("- base price/m²   : {}\n", fmt_whole(res.base_price_per_sqm, currency)));
    out.push_str(&format!("- location factor : x{:.2}\n", res.location_multiplier));
    out.push_str(&format!("- condition factor: x{:.2}\n", res.condition_multiplier));
    out.push_str(&format!("- amenities bonus : {}\n", fmt_whole(res.amenities_bonus, currency)));
    out.push_str("Indicative estimate only; not an appraisal.\n");

    out
}

/// Format a saved quote file.
pub fn format_quote(file: &QuoteFile) -> String {
    let mut out = format!("Saved by {} at {}\n\n", file.tool, file.generated_at.to_rfc3339());
    match &file.quote {
        Quote::Loan { request, result } => {
            out.push_str(&format_loan_summary(request, result, &file.currency));
        }
        Quote::Estimate { request, result } => {
            out.push_str(&format_estimate(request, result, &file.currency));
        }
    }
    out
}

/// `1234567.891` -> `1,234,567.89`.
pub fn fmt_amount(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let cents = (v.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    let sign = if v < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}{whole}.{:02}", cents % 100)
}

/// Amount with two decimals and currency label.
pub fn fmt_money(v: f64, currency: &str) -> String {
    format!("{} {currency}", fmt_amount(v))
}

/// Whole-unit amount with currency label (`472,500 EUR`).
pub fn fmt_whole(v: f64, currency: &str) -> String {
    if !v.is_finite() {
        return format!("{v} {currency}");
    }
    let units = v.abs().round() as u64;
    let sign = if v < 0.0 && units > 0 { "-" } else { "" };
    format!("{sign}{} {currency}", group_thousands(units))
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amenities, Condition, PropertyType};
    use crate::loan::{amortization_schedule, compare_rates_terms, simulate_loan};
    use crate::valuation::{ValuationTables, estimate_value};

    fn loan() -> LoanRequest {
        LoanRequest {
            property_price: 300_000.0,
            down_payment: 60_000.0,
            loan_term_years: 20,
            annual_rate_percent: 3.5,
            include_insurance: true,
            include_notary_fees: true,
        }
    }

    #[test]
    fn amounts_are_grouped() {
        assert_eq!(fmt_amount(0.0), "0.00");
        assert_eq!(fmt_amount(999.999), "1,000.00");
        assert_eq!(fmt_amount(1_391.903), "1,391.90");
        assert_eq!(fmt_amount(-1_234_567.891), "-1,234,567.89");
        assert_eq!(fmt_whole(472_500.0, "EUR"), "472,500 EUR");
        assert_eq!(fmt_money(24_000.0, "EUR"), "24,000.00 EUR");
    }

    #[test]
    fn loan_summary_lists_key_figures() {
        let req = loan();
        let sim = simulate_loan(&req).unwrap();
        let text = format_loan_summary(&req, &sim, "EUR");
        assert!(text.contains("Loan amount        : 240,000.00 EUR"));
        assert!(text.contains("Monthly payment    : 1,391.90 EUR"));
        assert!(text.contains("Notary fees        : 24,000.00 EUR"));
        assert!(text.contains("Insurance / month"));
    }

    #[test]
    fn summary_omits_disabled_options() {
        let req = LoanRequest {
            include_insurance: false,
            include_notary_fees: false,
            ..loan()
        };
        let sim = simulate_loan(&req).unwrap();
        let text = format_loan_summary(&req, &sim, "EUR");
        assert!(!text.contains("Insurance"));
        assert!(!text.contains("Notary"));
    }

    #[test]
    fn yearly_table_has_one_line_per_year() {
        let schedule = amortization_schedule(&loan()).unwrap();
        let text = format_yearly_table(&schedule.yearly_summary(), "EUR");
        // currency line + header + rule + 20 years
        assert_eq!(text.lines().count(), 23);
        assert!(text.lines().last().unwrap().trim_end().ends_with("0.00"));
    }

    #[test]
    fn grid_table_shape() {
        let rates = [3.0, 4.0];
        let terms = [20, 25, 30];
        let cells = compare_rates_terms(&loan(), &rates, &terms).unwrap();
        let text = format_grid(&cells, &rates, &terms, "EUR");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 5);
        assert!(lines[1].contains("20y") && lines[1].contains("30y"));
        assert!(lines[3].trim_start().starts_with("3.00%"));
    }

    #[test]
    fn estimate_report_mentions_band() {
        let req = EstimationRequest {
            address: String::new(),
            city: "Paris".to_string(),
            postal_code: String::new(),
            property_type: PropertyType::Apartment,
            area_sqm: 75.0,
            rooms: 3,
            bedrooms: 2,
            floor: None,
            construction_year: None,
            condition: Condition::Good,
            amenities: Amenities::default(),
        };
        let res = estimate_value(&req, &ValuationTables::default()).unwrap();
        let text = format_estimate(&req, &res, "EUR");
        assert!(text.contains("Estimated price : 472,500 EUR"));
        assert!(text.contains("Range           : 425,250 EUR - 519,750 EUR"));
        assert!(text.contains("Location  : Paris"));
        assert!(!text.contains("Details"));
    }
}
