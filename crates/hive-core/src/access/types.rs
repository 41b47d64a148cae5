//! ============================================================================
//! Access Types - Holder status and gate views
//! ============================================================================

use serde::{Deserialize, Serialize};

use crate::token::TokenConfig;
use crate::types::VerificationReport;

/// Holder status of the connected wallet.
///
/// `Unknown` means the verification round trip has not completed; consumers
/// must treat it as "still verifying", never as "denied".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HolderStatus {
    /// Verification in flight (or never started)
    #[default]
    Unknown,
    /// Balance meets the gate threshold
    Holder,
    /// Balance below the threshold
    NonHolder,
}

/// The four views the gate can select. One switch in the view layer, no
/// other render branching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateView {
    /// No wallet connected
    Landing,
    /// Connected, holder status unknown
    Verifying,
    /// Connected, holds the gating token
    Holder,
    /// Connected, does not hold the gating token
    NonHolder,
}

/// Result of one completed verification round trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolderSnapshot {
    /// Raw token balance (smallest denomination)
    pub balance: u64,
    /// Days since the token account's first transaction, if determinable
    pub held_days: Option<i64>,
    pub is_holder: bool,
    /// When the verdict was produced
    pub checked_at: i64,
}

impl HolderSnapshot {
    pub fn status(&self) -> HolderStatus {
        if self.is_holder {
            HolderStatus::Holder
        } else {
            HolderStatus::NonHolder
        }
    }

    /// Frontend-facing report with display-unit balance
    pub fn report(&self, config: &TokenConfig) -> VerificationReport {
        VerificationReport {
            balance: self.balance,
            balance_display: config.to_display(self.balance),
            held_days: self.held_days,
            is_holder: self.is_holder,
        }
    }
}
