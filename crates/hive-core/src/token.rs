//! ============================================================================
//! Token Configuration - Which token gates the clubhouse
//! ============================================================================
//! The gating token is parametrized through environment variables so the same
//! build can front different communities. Defaults target the $HIVE mint.
//! ============================================================================

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use tracing::warn;

/// Default mint address for $HIVE
pub const DEFAULT_MINT: &str = "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R";

/// Default token decimals
pub const DEFAULT_DECIMALS: u8 = 6;

/// Default gate threshold in display units (hold at least this much)
pub const DEFAULT_GATE_AMOUNT: f64 = 1.0;

/// Configuration of the token that gates access
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenConfig {
    pub mint: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub logo_url: Option<String>,
    /// Minimum balance (display units) to count as a holder
    pub gate_amount: f64,
    /// Minimum days the token account must have existed (0 = no requirement)
    pub min_hold_days: i64,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self {
            mint: DEFAULT_MINT.to_string(),
            symbol: "HIVE".to_string(),
            name: "Hive Clubhouse Token".to_string(),
            decimals: DEFAULT_DECIMALS,
            logo_url: None,
            gate_amount: DEFAULT_GATE_AMOUNT,
            min_hold_days: 0,
        }
    }
}

impl TokenConfig {
    /// Load from environment, falling back to defaults per-field.
    /// Malformed numeric values are ignored with a warning rather than
    /// failing startup.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let decimals = match std::env::var("HIVE_TOKEN_DECIMALS") {
            Ok(v) => v.parse::<u8>().unwrap_or_else(|_| {
                warn!("HIVE_TOKEN_DECIMALS '{}' is not a number, using default", v);
                defaults.decimals
            }),
            Err(_) => defaults.decimals,
        };

        let gate_amount = match std::env::var("HIVE_GATE_AMOUNT") {
            Ok(v) => v.parse::<f64>().unwrap_or_else(|_| {
                warn!("HIVE_GATE_AMOUNT '{}' is not a number, using default", v);
                defaults.gate_amount
            }),
            Err(_) => defaults.gate_amount,
        };

        let min_hold_days = match std::env::var("HIVE_MIN_HOLD_DAYS") {
            Ok(v) => v.parse::<i64>().unwrap_or_else(|_| {
                warn!("HIVE_MIN_HOLD_DAYS '{}' is not a number, using default", v);
                defaults.min_hold_days
            }),
            Err(_) => defaults.min_hold_days,
        };

        Self {
            mint: std::env::var("HIVE_TOKEN_MINT").unwrap_or(defaults.mint),
            symbol: std::env::var("HIVE_TOKEN_SYMBOL").unwrap_or(defaults.symbol),
            name: std::env::var("HIVE_TOKEN_NAME").unwrap_or(defaults.name),
            decimals,
            logo_url: std::env::var("HIVE_TOKEN_LOGO_URL").ok(),
            gate_amount,
            min_hold_days,
        }
    }

    /// Parse the configured mint into a pubkey
    pub fn mint_pubkey(&self) -> Result<Pubkey> {
        Pubkey::from_str(&self.mint).map_err(|e| anyhow!("Invalid token mint address: {}", e))
    }

    /// Convert a raw amount to display units
    pub fn to_display(&self, raw: u64) -> f64 {
        raw as f64 / 10f64.powi(self.decimals as i32)
    }

    /// The gate threshold in raw units
    pub fn gate_amount_raw(&self) -> u64 {
        (self.gate_amount * 10f64.powi(self.decimals as i32)) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mint_is_valid() {
        let config = TokenConfig::default();
        assert!(config.mint_pubkey().is_ok());
    }

    #[test]
    fn test_display_conversion() {
        let config = TokenConfig::default();
        assert_eq!(config.to_display(1_000_000), 1.0);
        assert_eq!(config.to_display(2_500_000), 2.5);
        assert_eq!(config.to_display(0), 0.0);
    }

    #[test]
    fn test_gate_amount_raw() {
        let config = TokenConfig {
            gate_amount: 100.0,
            decimals: 6,
            ..TokenConfig::default()
        };
        assert_eq!(config.gate_amount_raw(), 100_000_000);
    }
}
