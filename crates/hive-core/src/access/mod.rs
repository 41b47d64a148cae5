//! ============================================================================
//! Access Module - Token-gated access control for the clubhouse
//! ============================================================================
//! Decides which view the app renders from two inputs: whether a wallet is
//! connected, and whether that wallet holds enough of the gating token.
//!
//! ## Views
//! - **Landing**: no wallet connected
//! - **Verifying**: connected, balance query in flight
//! - **Holder**: connected, balance meets the gate threshold
//! - **NonHolder**: connected, balance below the threshold
//!
//! ## Usage
//! ```rust,ignore
//! use hive_core::access::{AccessGate, HolderChecker};
//!
//! let mut gate = AccessGate::new();
//! gate.on_connect(session.id);
//! let snapshot = checker.verify(&session.pubkey()?)?;
//! gate.apply_verdict(FetchVerdict::ok(session.id, snapshot));
//! ```
//! ============================================================================

mod checker;
mod gate;
mod retry;
mod types;

// Re-export public types
pub use checker::HolderChecker;
pub use gate::{AccessGate, FetchVerdict};
pub use retry::{calculate_delay, classify_error, verify_with_retry, ErrorKind, RetryConfig};
pub use types::{GateView, HolderSnapshot, HolderStatus};
