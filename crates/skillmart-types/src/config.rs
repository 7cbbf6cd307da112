//! Marketplace configuration types.
//!
//! `MarketplaceConfig` represents the top-level `config.toml` that controls
//! the platform fee rate and the readiness gate thresholds.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level configuration for a SkillMart deployment.
///
/// Loaded from `~/.skillmart/config.toml`. All fields have defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketplaceConfig {
    /// Currency used when a booking request does not name one.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    #[serde(default)]
    pub fees: FeePolicy,

    #[serde(default)]
    pub readiness: ReadinessThresholds,
}

fn default_currency() -> String {
    "USD".to_string()
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            default_currency: default_currency(),
            fees: FeePolicy::default(),
            readiness: ReadinessThresholds::default(),
        }
    }
}

impl MarketplaceConfig {
    /// Reject values that parse but make no sense: a fee rate outside
    /// `[0, 1)`, a score threshold above 100, or a currency that is not
    /// three letters.
    pub fn validate(&self) -> Result<(), String> {
        let rate = self.fees.platform_fee_rate;
        if rate < Decimal::ZERO || rate >= Decimal::ONE {
            return Err(format!("platform_fee_rate {rate} must be in [0, 1)"));
        }
        if self.readiness.min_ai_score > 100 || self.readiness.min_content_quality > 100 {
            return Err("readiness thresholds must be at most 100".to_string());
        }
        let currency = self.default_currency.trim();
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(format!(
                "default_currency '{}' must be a three-letter code",
                self.default_currency
            ));
        }
        Ok(())
    }
}

/// Platform fee taken from every booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeePolicy {
    /// Fraction of the agreed price, e.g. `0.05` for 5%.
    #[serde(default = "default_platform_fee_rate")]
    pub platform_fee_rate: Decimal,
}

fn default_platform_fee_rate() -> Decimal {
    Decimal::new(5, 2)
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self {
            platform_fee_rate: default_platform_fee_rate(),
        }
    }
}

/// Thresholds of the marketplace-readiness gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessThresholds {
    #[serde(default = "default_min_ai_score")]
    pub min_ai_score: u8,
    #[serde(default = "default_min_content_quality")]
    pub min_content_quality: u8,
    #[serde(default = "default_min_portfolio_items")]
    pub min_portfolio_items: usize,
}

fn default_min_ai_score() -> u8 {
    75
}

fn default_min_content_quality() -> u8 {
    70
}

fn default_min_portfolio_items() -> usize {
    1
}

impl Default for ReadinessThresholds {
    fn default() -> Self {
        Self {
            min_ai_score: default_min_ai_score(),
            min_content_quality: default_min_content_quality(),
            min_portfolio_items: default_min_portfolio_items(),
        }
    }
}
