//! ============================================================================
//! Core Types for the Hive Clubhouse
//! ============================================================================
//! Shared data structures crossing the IPC boundary. Everything here is
//! serialized to JSON for the TypeScript frontend.
//! ============================================================================

use serde::{Deserialize, Serialize};

/// Wallet info for display in the header widget
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletInfo {
    pub address: String,
    pub is_connected: bool,
    /// Short form for display, e.g. "72j2..F7RL"
    pub short_address: String,
}

impl WalletInfo {
    pub fn connected(address: &str) -> Self {
        Self {
            address: address.to_string(),
            is_connected: true,
            short_address: shorten_address(address),
        }
    }

    pub fn disconnected() -> Self {
        Self {
            address: String::new(),
            is_connected: false,
            short_address: String::new(),
        }
    }
}

/// Shorten a base58 address for display: first 4 + last 4 characters
pub fn shorten_address(address: &str) -> String {
    if address.len() <= 10 {
        return address.to_string();
    }
    format!("{}..{}", &address[..4], &address[address.len() - 4..])
}

/// Result of a holder verification round trip, as shown to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    /// Raw token balance (smallest denomination)
    pub balance: u64,
    /// Balance in display units
    pub balance_display: f64,
    /// Days the token account has existed, if determinable
    pub held_days: Option<i64>,
    pub is_holder: bool,
}

/// Error types for the clubhouse
#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum HiveError {
    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("Invalid wallet address: {0}")]
    InvalidAddress(String),

    #[error("Not authorized: {0}")]
    NotAuthorized(String),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten_address() {
        assert_eq!(
            shorten_address("72j257cEWGEaD3379m8w59bceMJDsqe3dCuaivXPF7RL"),
            "72j2..F7RL"
        );
        // Short inputs pass through unchanged
        assert_eq!(shorten_address("abc"), "abc");
    }

    #[test]
    fn test_wallet_info_connected() {
        let info = WalletInfo::connected("72j257cEWGEaD3379m8w59bceMJDsqe3dCuaivXPF7RL");
        assert!(info.is_connected);
        assert_eq!(info.short_address, "72j2..F7RL");
    }

    #[test]
    fn test_wallet_info_disconnected() {
        let info = WalletInfo::disconnected();
        assert!(!info.is_connected);
        assert!(info.address.is_empty());
    }
}
