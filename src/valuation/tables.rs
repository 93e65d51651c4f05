//! Static multiplier tables for the valuation heuristic.
//!
//! Every figure here is a placeholder business parameter. `ValuationTables`
//! carries them as data so a different set can be supplied without touching the
//! estimator.

use serde::{Deserialize, Serialize};

use crate::domain::{Amenities, Condition, PropertyType};

/// A city pattern and its price multiplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationRule {
    /// Substring matched against the city name, ignoring case.
    pub pattern: String,
    pub multiplier: f64,
}

impl LocationRule {
    pub fn new(pattern: &str, multiplier: f64) -> Self {
        Self {
            pattern: pattern.to_lowercase(),
            multiplier,
        }
    }
}

/// Parameters of the valuation heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationTables {
    pub apartment_price_per_sqm: f64,
    pub house_price_per_sqm: f64,
    pub studio_price_per_sqm: f64,
    pub office_price_per_sqm: f64,

    /// Ordered: the first rule whose pattern the city contains wins.
    pub locations: Vec<LocationRule>,
    pub default_location_multiplier: f64,

    pub excellent_multiplier: f64,
    pub good_multiplier: f64,
    pub average_multiplier: f64,
    pub poor_multiplier: f64,

    pub parking_bonus: f64,
    pub balcony_bonus: f64,
    pub elevator_bonus: f64,

    /// Half-width of the price band as a fraction of the estimate.
    pub band: f64,
    /// Reported confidence, percent.
    pub confidence_level: u8,
    pub comparable_properties_count: u32,
}

impl Default for ValuationTables {
    fn default() -> Self {
        Self {
            apartment_price_per_sqm: 3500.0,
            house_price_per_sqm: 4200.0,
            studio_price_per_sqm: 4800.0,
            office_price_per_sqm: 3000.0,
            locations: vec![
                LocationRule::new("paris", 1.8),
                LocationRule::new("lyon", 1.3),
                LocationRule::new("marseille", 1.1),
            ],
            default_location_multiplier: 1.0,
            excellent_multiplier: 1.15,
            good_multiplier: 1.0,
            average_multiplier: 0.9,
            poor_multiplier: 0.8,
            parking_bonus: 15_000.0,
            balcony_bonus: 8_000.0,
            elevator_bonus: 5_000.0,
            band: 0.10,
            confidence_level: 85,
            comparable_properties_count: 12,
        }
    }
}

impl ValuationTables {
    pub fn base_price_per_sqm(&self, property_type: PropertyType) -> f64 {
        match property_type {
            PropertyType::Apartment => self.apartment_price_per_sqm,
            PropertyType::House => self.house_price_per_sqm,
            PropertyType::Studio => self.studio_price_per_sqm,
            PropertyType::Office => self.office_price_per_sqm,
        }
    }

    /// Case-insensitive substring lookup, first match wins.
    pub fn location_multiplier(&self, city: &str) -> f64 {
        let city = city.to_lowercase();
        self.locations
            .iter()
            .find(|rule| !rule.pattern.is_empty() && city.contains(&rule.pattern.to_lowercase()))
            .map(|rule| rule.multiplier)
            .unwrap_or(self.default_location_multiplier)
    }

    pub fn condition_multiplier(&self, condition: Condition) -> f64 {
        match condition {
            Condition::Excellent => self.excellent_multiplier,
            Condition::Good => self.good_multiplier,
            Condition::Average => self.average_multiplier,
            Condition::Poor => self.poor_multiplier,
        }
    }

    pub fn amenities_bonus(&self, amenities: Amenities) -> f64 {
        let mut bonus = 0.0;
        if amenities.parking {
            bonus += self.parking_bonus;
        }
        if amenities.balcony {
            bonus += self.balcony_bonus;
        }
        if amenities.elevator {
            bonus += self.elevator_bonus;
        }
        bonus
    }
}
