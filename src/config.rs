//! Runtime settings from the environment (`.env` supported).
//!
//! | variable | default | meaning |
//! |---|---|---|
//! | `IMMO_CURRENCY` | `EUR` | label printed next to amounts |
//! | `IMMO_CONFIDENCE_LEVEL` | `85` | reported valuation confidence (percent, 0-100) |
//! | `IMMO_COMPARABLES` | `12` | reported comparable-properties count |
//! | `IMMO_LOG` | `warn` | `tracing` filter directive |

use crate::error::AppError;
use crate::valuation::ValuationTables;

pub const DEFAULT_CURRENCY: &str = "EUR";
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub currency: String,
    pub log_filter: String,
    pub tables: ValuationTables,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            tables: ValuationTables::default(),
        }
    }
}

impl Settings {
    /// Load `.env` (if any) and read settings from the process environment.
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(currency) = non_empty(lookup("IMMO_CURRENCY")) {
            settings.currency = currency;
        }
        if let Some(filter) = non_empty(lookup("IMMO_LOG")) {
            settings.log_filter = filter;
        }
        if let Some(raw) = non_empty(lookup("IMMO_CONFIDENCE_LEVEL")) {
            let level: u8 = raw
                .parse()
                .map_err(|e| AppError::new(2, format!("Invalid IMMO_CONFIDENCE_LEVEL '{raw}': {e}")))?;
            if level > 100 {
                return Err(AppError::new(
                    2,
                    format!("IMMO_CONFIDENCE_LEVEL must be within 0-100 (got {level})."),
                ));
            }
            settings.tables.confidence_level = level;
        }
        if let Some(raw) = non_empty(lookup("IMMO_COMPARABLES")) {
            settings.tables.comparable_properties_count = raw
                .parse()
                .map_err(|e| AppError::new(2, format!("Invalid IMMO_COMPARABLES '{raw}': {e}")))?;
        }

        Ok(settings)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
