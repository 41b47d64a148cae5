//! ============================================================================
//! Wallet Session - Connection lifecycle and fetch tagging
//! ============================================================================
//! One session per wallet connection. Every holder fetch started for a
//! session carries its id; verdicts from an older session are discarded so a
//! quick disconnect/reconnect cannot apply a stale result to the new session.
//! ============================================================================

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;
use tracing::info;
use uuid::Uuid;

use crate::types::{HiveError, WalletInfo};

/// Opaque identifier for one wallet connection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A connected wallet session. Owned by the session manager, read-only to
/// everything else.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletSession {
    pub id: SessionId,
    pub address: String,
    pub connected_at: i64,
}

impl WalletSession {
    /// The wallet address as a pubkey
    pub fn pubkey(&self) -> Result<Pubkey, HiveError> {
        Pubkey::from_str(&self.address)
            .map_err(|_| HiveError::InvalidAddress(self.address.clone()))
    }
}

/// Owns the current wallet session (at most one at a time)
#[derive(Debug, Default)]
pub struct SessionManager {
    current: Option<WalletSession>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Start a session for the given wallet address.
    /// Replaces any existing session; the old session id becomes stale.
    pub fn connect(&mut self, address: &str) -> Result<WalletSession, HiveError> {
        Pubkey::from_str(address).map_err(|_| HiveError::InvalidAddress(address.to_string()))?;

        let session = WalletSession {
            id: SessionId::new(),
            address: address.to_string(),
            connected_at: chrono::Utc::now().timestamp(),
        };

        info!("Wallet connected: {} (session {})", address, session.id);
        self.current = Some(session.clone());
        Ok(session)
    }

    /// End the current session, if any
    pub fn disconnect(&mut self) -> Option<WalletSession> {
        let old = self.current.take();
        if let Some(ref session) = old {
            info!("Wallet disconnected: {} (session {})", session.address, session.id);
        }
        old
    }

    pub fn current(&self) -> Option<&WalletSession> {
        self.current.as_ref()
    }

    pub fn is_connected(&self) -> bool {
        self.current.is_some()
    }

    /// True if the given id belongs to the live session
    pub fn is_current(&self, id: SessionId) -> bool {
        self.current.as_ref().map(|s| s.id) == Some(id)
    }

    /// Wallet info snapshot for the frontend header
    pub fn wallet_info(&self) -> WalletInfo {
        match &self.current {
            Some(session) => WalletInfo::connected(&session.address),
            None => WalletInfo::disconnected(),
        }
    }
}
