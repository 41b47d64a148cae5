//! ============================================================================
//! Holder Checker - Token balance verification over RPC
//! ============================================================================
//! Queries the wallet's associated token account for the gating token. A
//! missing account is a zero balance (the wallet never held the token); a
//! transport failure is an error and surfaces to the retry layer instead of
//! being folded into "not a holder".
//! ============================================================================

use anyhow::{anyhow, Result};
use solana_client::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::program_pack::Pack;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;
use tracing::{debug, info};

use super::types::HolderSnapshot;
use crate::token::TokenConfig;

const SECONDS_PER_DAY: i64 = 86_400;

/// Checks gating-token balance and hold duration for a wallet
pub struct HolderChecker {
    rpc_client: RpcClient,
    mint: Pubkey,
    config: TokenConfig,
}

impl HolderChecker {
    /// Create a new checker against the given RPC URL
    pub fn new(rpc_url: &str, config: TokenConfig) -> Result<Self> {
        let mint = config.mint_pubkey()?;
        Ok(Self {
            rpc_client: RpcClient::new(rpc_url.to_string()),
            mint,
            config,
        })
    }

    /// Get the wallet's raw gating-token balance.
    /// Missing token account = 0 (wallet never held the token).
    pub fn get_token_balance(&self, wallet: &Pubkey) -> Result<u64> {
        let ata = get_associated_token_address(wallet, &self.mint);

        debug!("Checking {} balance for wallet {} at ATA {}", self.config.symbol, wallet, ata);

        let response = self
            .rpc_client
            .get_account_with_commitment(&ata, CommitmentConfig::confirmed())
            .map_err(|e| anyhow!("Balance query failed: {}", e))?;

        match response.value {
            Some(account) => {
                let token_account = spl_token::state::Account::unpack(&account.data)
                    .map_err(|e| anyhow!("Token account unpack failed: {}", e))?;
                debug!("{} balance: {} (raw)", self.config.symbol, token_account.amount);
                Ok(token_account.amount)
            }
            None => {
                debug!("No token account for {} - balance 0", wallet);
                Ok(0)
            }
        }
    }

    /// Days since the token account's oldest known transaction.
    /// Returns None when the account has no visible history.
    pub fn get_held_days(&self, wallet: &Pubkey) -> Result<Option<i64>> {
        let ata = get_associated_token_address(wallet, &self.mint);

        let signatures = self
            .rpc_client
            .get_signatures_for_address(&ata)
            .map_err(|e| anyhow!("Signature history query failed: {}", e))?;

        // Newest first; the last entry is the oldest visible transaction
        let oldest = match signatures.last().and_then(|s| s.block_time) {
            Some(ts) => ts,
            None => return Ok(None),
        };

        let days = (chrono::Utc::now().timestamp() - oldest) / SECONDS_PER_DAY;
        Ok(Some(days.max(0)))
    }

    /// Run the full holder verification: balance gate first, then the hold
    /// duration requirement when one is configured.
    pub fn verify(&self, wallet: &Pubkey) -> Result<HolderSnapshot> {
        let balance = self.get_token_balance(wallet)?;
        let threshold = self.config.gate_amount_raw();

        if balance < threshold {
            info!(
                "Wallet {} below gate: {} < {} raw {}",
                wallet, balance, threshold, self.config.symbol
            );
            return Ok(HolderSnapshot {
                balance,
                held_days: None,
                is_holder: false,
                checked_at: chrono::Utc::now().timestamp(),
            });
        }

        let held_days = if self.config.min_hold_days > 0 {
            self.get_held_days(wallet)?
        } else {
            None
        };

        let meets_hold = self.config.min_hold_days == 0
            || held_days.map_or(false, |d| d >= self.config.min_hold_days);

        info!(
            "Wallet {} verified: balance {} raw, held {:?} days, holder={}",
            wallet, balance, held_days, meets_hold
        );

        Ok(HolderSnapshot {
            balance,
            held_days,
            is_holder: meets_hold,
            checked_at: chrono::Utc::now().timestamp(),
        })
    }

    /// The gating token mint
    pub fn mint(&self) -> &Pubkey {
        &self.mint
    }

    pub fn token_config(&self) -> &TokenConfig {
        &self.config
    }
}
