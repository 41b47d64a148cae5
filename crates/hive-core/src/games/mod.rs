//! ============================================================================
//! Games Module - Clubhouse mini-games
//! ============================================================================
//! Pure in-memory UI state machines, one per game:
//! - TokenPet: a virtual pet with time-decayed stats
//! - SpinnerWheel: a weighted prize wheel with a spin cooldown
//! ============================================================================

mod spinner;
mod tokenpet;

pub use spinner::{SpinOutcome, SpinSegment, SpinnerWheel, SPIN_COOLDOWN_SECS};
pub use tokenpet::{PetMood, PetStage, TokenPet};
