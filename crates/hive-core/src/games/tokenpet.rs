//! ============================================================================
//! Token Pet - Virtual pet state machine
//! ============================================================================
//! Stats sit in 0..=100 and decay with elapsed time. Actions restore them.
//! State lives only for the session; there is nothing to persist.
//! ============================================================================

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Stat ceiling
const STAT_MAX: u8 = 100;

/// Decay per elapsed hour, per stat
const HUNGER_DECAY_PER_HOUR: u8 = 8;
const HAPPINESS_DECAY_PER_HOUR: u8 = 5;
const ENERGY_DECAY_PER_HOUR: u8 = 4;

/// Action effects
const FEED_AMOUNT: u8 = 30;
const PLAY_HAPPINESS: u8 = 25;
const PLAY_ENERGY_COST: u8 = 15;
const REST_AMOUNT: u8 = 40;

/// Age thresholds for growth stages
const HATCH_AGE_SECS: i64 = 3_600; // 1 hour
const GROWN_AGE_SECS: i64 = 86_400; // 1 day

/// Growth stage, derived from age
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetStage {
    Egg,
    Hatchling,
    Grown,
}

/// Mood, derived from the stat average
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PetMood {
    Ecstatic,
    Content,
    Grumpy,
    Miserable,
}

/// The virtual pet
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPet {
    pub name: String,
    /// 100 = full, 0 = starving
    pub hunger: u8,
    pub happiness: u8,
    pub energy: u8,
    pub created_at: i64,
    last_tick: i64,
}

impl TokenPet {
    /// Hatch a new pet at the given timestamp
    pub fn new(name: &str, now: i64) -> Self {
        Self {
            name: name.to_string(),
            hunger: 70,
            happiness: 70,
            energy: STAT_MAX,
            created_at: now,
            last_tick: now,
        }
    }

    /// Apply time-based stat decay for the interval since the last tick
    pub fn tick(&mut self, now: i64) {
        let elapsed_hours = ((now - self.last_tick).max(0) / 3_600).min(u8::MAX as i64) as u8;
        if elapsed_hours == 0 {
            return;
        }

        self.hunger = self
            .hunger
            .saturating_sub(HUNGER_DECAY_PER_HOUR.saturating_mul(elapsed_hours));
        self.happiness = self
            .happiness
            .saturating_sub(HAPPINESS_DECAY_PER_HOUR.saturating_mul(elapsed_hours));
        self.energy = self
            .energy
            .saturating_sub(ENERGY_DECAY_PER_HOUR.saturating_mul(elapsed_hours));
        self.last_tick = now;

        debug!(
            "Pet '{}' ticked {}h: hunger {}, happiness {}, energy {}",
            self.name, elapsed_hours, self.hunger, self.happiness, self.energy
        );
    }

    pub fn feed(&mut self, now: i64) {
        self.tick(now);
        self.hunger = (self.hunger + FEED_AMOUNT).min(STAT_MAX);
    }

    /// Play costs energy; a too-tired pet refuses
    pub fn play(&mut self, now: i64) -> bool {
        self.tick(now);
        if self.energy < PLAY_ENERGY_COST {
            debug!("Pet '{}' too tired to play", self.name);
            return false;
        }
        self.energy -= PLAY_ENERGY_COST;
        self.happiness = (self.happiness + PLAY_HAPPINESS).min(STAT_MAX);
        true
    }

    pub fn rest(&mut self, now: i64) {
        self.tick(now);
        self.energy = (self.energy + REST_AMOUNT).min(STAT_MAX);
    }

    pub fn stage(&self, now: i64) -> PetStage {
        let age = (now - self.created_at).max(0);
        if age < HATCH_AGE_SECS {
            PetStage::Egg
        } else if age < GROWN_AGE_SECS {
            PetStage::Hatchling
        } else {
            PetStage::Grown
        }
    }

    pub fn mood(&self) -> PetMood {
        let avg = (self.hunger as u16 + self.happiness as u16 + self.energy as u16) / 3;
        match avg {
            80..=100 => PetMood::Ecstatic,
            50..=79 => PetMood::Content,
            25..=49 => PetMood::Grumpy,
            _ => PetMood::Miserable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pet_starts_content() {
        let pet = TokenPet::new("Buzz", 0);
        assert_eq!(pet.mood(), PetMood::Content);
        assert_eq!(pet.stage(0), PetStage::Egg);
    }

    #[test]
    fn test_stats_decay_over_time() {
        let mut pet = TokenPet::new("Buzz", 0);
        pet.tick(3 * 3_600);
        assert_eq!(pet.hunger, 70 - 3 * 8);
        assert_eq!(pet.happiness, 70 - 3 * 5);
        assert_eq!(pet.energy, 100 - 3 * 4);
    }

    #[test]
    fn test_decay_saturates_at_zero() {
        let mut pet = TokenPet::new("Buzz", 0);
        pet.tick(1_000 * 3_600);
        assert_eq!(pet.hunger, 0);
        assert_eq!(pet.happiness, 0);
        assert_eq!(pet.energy, 0);
        assert_eq!(pet.mood(), PetMood::Miserable);
    }

    #[test]
    fn test_sub_hour_tick_is_noop() {
        let mut pet = TokenPet::new("Buzz", 0);
        pet.tick(1_800);
        assert_eq!(pet.hunger, 70);
    }

    #[test]
    fn test_feed_caps_at_max() {
        let mut pet = TokenPet::new("Buzz", 0);
        pet.feed(0);
        assert_eq!(pet.hunger, 100);
        pet.feed(0);
        assert_eq!(pet.hunger, 100);
    }

    #[test]
    fn test_play_costs_energy() {
        let mut pet = TokenPet::new("Buzz", 0);
        assert!(pet.play(0));
        assert_eq!(pet.energy, 85);
        assert_eq!(pet.happiness, 95);
    }

    #[test]
    fn test_exhausted_pet_refuses_to_play() {
        let mut pet = TokenPet::new("Buzz", 0);
        pet.energy = 10;
        assert!(!pet.play(0));
        assert_eq!(pet.energy, 10);
    }

    #[test]
    fn test_rest_restores_energy() {
        let mut pet = TokenPet::new("Buzz", 0);
        pet.energy = 20;
        pet.rest(0);
        assert_eq!(pet.energy, 60);
    }

    #[test]
    fn test_growth_stages() {
        let pet = TokenPet::new("Buzz", 0);
        assert_eq!(pet.stage(0), PetStage::Egg);
        assert_eq!(pet.stage(HATCH_AGE_SECS), PetStage::Hatchling);
        assert_eq!(pet.stage(GROWN_AGE_SECS), PetStage::Grown);
    }
}
