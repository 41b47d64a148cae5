//! ============================================================================
//! HIVE-CORE: Clubhouse Logic
//! ============================================================================
//! This crate handles all backend logic for the Hive clubhouse app:
//! - Wallet session lifecycle and session-tagged holder verification
//! - Access gate state machine (landing / verifying / holder / non-holder)
//! - Declarative route table with connection + admin guards
//! - Mini-game state machines (token pet, prize spinner)
//! - Honeycomb project registry for the admin panel
//! ============================================================================

pub mod access;
pub mod admin;
pub mod games;
pub mod honeycomb;
pub mod router;
pub mod session;
pub mod token;
pub mod types;

// Re-export main types for convenience
pub use access::{
    AccessGate, FetchVerdict, GateView, HolderChecker, HolderSnapshot, HolderStatus, RetryConfig,
};
pub use admin::is_admin_address;
pub use games::{SpinOutcome, SpinnerWheel, TokenPet};
pub use honeycomb::{HoneycombClient, Project, ProjectApi, ProjectRegistry};
pub use router::{Page, Resolution, Route};
pub use session::{SessionId, SessionManager, WalletSession};
pub use token::TokenConfig;
pub use types::*;
