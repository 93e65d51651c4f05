//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - filled in from CLI flags or the interactive form
//! - passed by reference into the pure calculators
//! - saved to quote JSON and reloaded later for display

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Loan parameters entered by a prospective buyer.
///
/// All currency amounts share one unit (see `Settings::currency`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    pub property_price: f64,
    pub down_payment: f64,
    pub loan_term_years: u32,
    /// Nominal annual rate in percent (`3.5` means 3.5 %).
    pub annual_rate_percent: f64,
    pub include_insurance: bool,
    pub include_notary_fees: bool,
}

impl LoanRequest {
    /// Principal to borrow (`price - down payment`).
    pub fn loan_amount(&self) -> f64 {
        self.property_price - self.down_payment
    }

    /// Number of monthly installments, `None` if it does not fit a `u32`.
    pub fn number_of_payments(&self) -> Option<u32> {
        self.loan_term_years.checked_mul(12)
    }

    /// Per-period compounding rate as a decimal.
    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate_percent / 100.0 / 12.0
    }
}

/// Result of a loan simulation.
///
/// Figures are kept unrounded; rounding happens only when formatting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanSimulation {
    pub loan_amount: f64,
    pub number_of_payments: u32,
    /// Principal + interest only.
    pub monthly_payment: f64,
    pub insurance_monthly_cost: f64,
    pub total_monthly_payment: f64,
    pub total_interest: f64,
    pub notary_fees: f64,
    pub total_cost: f64,
}

/// One installment of an amortization schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    /// 1-based installment number.
    pub period: u32,
    /// 1-based loan year the installment belongs to.
    pub year: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Outstanding principal after this installment.
    pub balance: f64,
}

/// Installments folded per loan year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyRow {
    pub year: u32,
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Outstanding principal at the end of the year.
    pub balance: f64,
}

/// One cell of a rate × term comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub annual_rate_percent: f64,
    pub loan_term_years: u32,
    pub simulation: LoanSimulation,
}

/// Kind of property being valued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PropertyType {
    Apartment,
    House,
    Studio,
    Office,
}

impl PropertyType {
    pub const ALL: [PropertyType; 4] = [
        PropertyType::Apartment,
        PropertyType::House,
        PropertyType::Studio,
        PropertyType::Office,
    ];

    /// Human-readable label for terminal output.
    pub fn display_name(self) -> &'static str {
        match self {
            PropertyType::Apartment => "Apartment",
            PropertyType::House => "House",
            PropertyType::Studio => "Studio",
            PropertyType::Office => "Office",
        }
    }
}

/// Overall state of the property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Excellent,
    Good,
    Average,
    Poor,
}

impl Condition {
    pub const ALL: [Condition; 4] = [
        Condition::Excellent,
        Condition::Good,
        Condition::Average,
        Condition::Poor,
    ];

    pub fn display_name(self) -> &'static str {
        match self {
            Condition::Excellent => "Excellent",
            Condition::Good => "Good",
            Condition::Average => "Average",
            Condition::Poor => "Poor",
        }
    }
}

/// Amenity flags that add a flat bonus to the estimate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amenities {
    pub parking: bool,
    pub balcony: bool,
    pub elevator: bool,
}

/// Property description submitted for a valuation.
///
/// Only `property_type`, `area_sqm`, `city`, `condition` and `amenities` feed the
/// heuristic; the remaining fields are carried through to reports and quote files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimationRequest {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub property_type: PropertyType,
    pub area_sqm: f64,
    pub rooms: u32,
    pub bedrooms: u32,
    pub floor: Option<i32>,
    pub construction_year: Option<i32>,
    pub condition: Condition,
    pub amenities: Amenities,
}

/// Illustrative valuation.
///
/// Prices are rounded to whole currency units. This is a rough heuristic, not an
/// appraisal: `confidence_level` and `comparable_properties_count` are fixed
/// parameters, not derived from market data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimationResult {
    pub estimated_price: f64,
    pub price_per_sqm: f64,
    pub min_price: f64,
    pub max_price: f64,
    /// Percent.
    pub confidence_level: u8,
    pub comparable_properties_count: u32,

    pub base_price_per_sqm: f64,
    pub location_multiplier: f64,
    pub condition_multiplier: f64,
    pub amenities_bonus: f64,
}

/// A saved quote file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteFile {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub currency: String,
    #[serde(flatten)]
    pub quote: Quote,
}

/// Request/result pair stored in a quote file, tagged by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Quote {
    Loan {
        request: LoanRequest,
        result: LoanSimulation,
    },
    Estimate {
        request: EstimationRequest,
        result: EstimationResult,
    },
}
