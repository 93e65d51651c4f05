//! Property price estimate from static multipliers.
//!
//! ```text
//! estimate = round(area * base(type) * location(city) * condition + bonus(amenities))
//! ```
//!
//! The band is `±tables.band` around the estimate. This is an illustrative
//! figure for a marketing widget, not a statistical model.

use tracing::debug;

use crate::domain::{EstimationRequest, EstimationResult};
use crate::error::CalcError;
use crate::valuation::ValuationTables;

/// Estimate the value of a property.
pub fn estimate_value(
    request: &EstimationRequest,
    tables: &ValuationTables,
) -> Result<EstimationResult, CalcError> {
    let area = request.area_sqm;
    if !(area.is_finite() && area > 0.0) {
        let err = CalcError::invalid("area_sqm", format!("must be a finite area > 0 (got {area})"));
        debug!(%err, "estimation request rejected");
        return Err(err);
    }

    let base_price_per_sqm = tables.base_price_per_sqm(request.property_type);
    let location_multiplier = tables.location_multiplier(&request.city);
    let condition_multiplier = tables.condition_multiplier(request.condition);
    let amenities_bonus = tables.amenities_bonus(request.amenities);

    let estimated_price = (area * base_price_per_sqm * location_multiplier * condition_multiplier
        + amenities_bonus)
        .round();

    debug!(
        city = %request.city,
        property_type = request.property_type.display_name(),
        area,
        estimated_price,
        "property estimated"
    );

    Ok(EstimationResult {
        estimated_price,
        price_per_sqm: (estimated_price / area).round(),
        min_price: (estimated_price * (1.0 - tables.band)).round(),
        max_price: (estimated_price * (1.0 + tables.band)).round(),
        confidence_level: tables.confidence_level,
        comparable_properties_count: tables.comparable_properties_count,
        base_price_per_sqm,
        location_multiplier,
        condition_multiplier,
        amenities_bonus,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Amenities, Condition, PropertyType};

    fn paris_apartment() -> EstimationRequest {
        EstimationRequest {
            address: "12 rue de Rivoli".to_string(),
            city: "Paris".to_string(),
            postal_code: "75001".to_string(),
            property_type: PropertyType::Apartment,
            area_sqm: 75.0,
            rooms: 3,
            bedrooms: 2,
            floor: Some(4),
            construction_year: Some(1890),
            condition: Condition::Good,
            amenities: Amenities::default(),
        }
    }

    #[test]
    fn paris_apartment_reference() {
        let res = estimate_value(&paris_apartment(), &ValuationTables::default()).unwrap();
        assert_eq!(res.estimated_price, 472_500.0);
        assert_eq!(res.price_per_sqm, 6_300.0);
        assert_eq!(res.min_price, 425_250.0);
        assert_eq!(res.max_price, 519_750.0);
        assert_eq!(res.confidence_level, 85);
        assert_eq!(res.comparable_properties_count, 12);
        assert_eq!(res.location_multiplier, 1.8);
    }

    #[test]
    fn amenities_and_condition_apply() {
        let req = EstimationRequest {
            city: "Bordeaux".to_string(),
            property_type: PropertyType::House,
            area_sqm: 100.0,
            condition: Condition::Excellent,
            amenities: Amenities {
                parking: true,
                balcony: false,
                elevator: true,
            },
            ..paris_apartment()
        };
        let res = estimate_value(&req, &ValuationTables::default()).unwrap();
        // 100 * 4200 * 1.0 * 1.15 + 15000 + 5000
        assert_eq!(res.estimated_price, 503_000.0);
        assert_eq!(res.price_per_sqm, 5_030.0);
        assert_eq!(res.amenities_bonus, 20_000.0);
    }

    #[test]
    fn poor_condition_is_cheaper_than_excellent() {
        let tables = ValuationTables::default();
        let mut prices = Vec::new();
        for condition in Condition::ALL {
            let req = EstimationRequest {
                condition,
                ..paris_apartment()
            };
            prices.push(estimate_value(&req, &tables).unwrap().estimated_price);
        }
        assert!(prices.windows(2).all(|w| w[0] > w[1]), "prices {prices:?}");
    }

    #[test]
    fn rejects_non_positive_area() {
        for area in [0.0, -10.0, f64::NAN] {
            let req = EstimationRequest {
                area_sqm: area,
                ..paris_apartment()
            };
            let err = estimate_value(&req, &ValuationTables::default()).unwrap_err();
            assert_eq!(err.field(), "area_sqm");
        }
    }

    #[test]
    fn custom_tables_are_honored() {
        let tables = ValuationTables {
            apartment_price_per_sqm: 1000.0,
            confidence_level: 60,
            comparable_properties_count: 3,
            ..ValuationTables::default()
        };
        let req = EstimationRequest {
            city: "Nantes".to_string(),
            area_sqm: 50.0,
            ..paris_apartment()
        };
        let res = estimate_value(&req, &tables).unwrap();
        assert_eq!(res.estimated_price, 50_000.0);
        assert_eq!(res.confidence_level, 60);
        assert_eq!(res.comparable_properties_count, 3);
    }
}
