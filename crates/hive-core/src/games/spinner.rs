//! ============================================================================
//! Prize Spinner - Weighted wheel with a per-session cooldown
//! ============================================================================

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Minimum seconds between spins
pub const SPIN_COOLDOWN_SECS: i64 = 60;

/// One wedge of the wheel
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinSegment {
    pub label: String,
    /// Relative selection weight
    pub weight: u32,
    /// Prize in display-unit tokens (0 for a miss)
    pub reward_tokens: f64,
}

/// Result of one spin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpinOutcome {
    pub label: String,
    pub reward_tokens: f64,
    pub spun_at: i64,
}

/// The wheel and its per-session history
#[derive(Debug, Clone)]
pub struct SpinnerWheel {
    segments: Vec<SpinSegment>,
    history: Vec<SpinOutcome>,
    last_spin_at: Option<i64>,
}

impl Default for SpinnerWheel {
    fn default() -> Self {
        Self::new(default_segments())
    }
}

/// The stock wheel layout
fn default_segments() -> Vec<SpinSegment> {
    let table: &[(&str, u32, f64)] = &[
        ("Try Again", 40, 0.0),
        ("Honey Drop", 25, 1.0),
        ("Small Pot", 20, 5.0),
        ("Big Pot", 10, 25.0),
        ("Queen's Stash", 4, 100.0),
        ("Golden Hive", 1, 1000.0),
    ];
    table
        .iter()
        .map(|(label, weight, reward)| SpinSegment {
            label: label.to_string(),
            weight: *weight,
            reward_tokens: *reward,
        })
        .collect()
}

impl SpinnerWheel {
    pub fn new(segments: Vec<SpinSegment>) -> Self {
        Self {
            segments,
            history: Vec::new(),
            last_spin_at: None,
        }
    }

    pub fn segments(&self) -> &[SpinSegment] {
        &self.segments
    }

    pub fn history(&self) -> &[SpinOutcome] {
        &self.history
    }

    /// Seconds until the next spin is allowed (0 = ready)
    pub fn cooldown_remaining(&self, now: i64) -> i64 {
        match self.last_spin_at {
            Some(last) => (last + SPIN_COOLDOWN_SECS - now).max(0),
            None => 0,
        }
    }

    /// Spin the wheel. Returns None while the cooldown is running.
    pub fn spin<R: Rng>(&mut self, rng: &mut R, now: i64) -> Option<SpinOutcome> {
        if self.cooldown_remaining(now) > 0 {
            debug!("Spin rejected: {}s of cooldown left", self.cooldown_remaining(now));
            return None;
        }

        let total_weight: u32 = self.segments.iter().map(|s| s.weight).sum();
        if total_weight == 0 {
            return None;
        }

        let mut roll = rng.gen_range(0..total_weight);
        let segment = self
            .segments
            .iter()
            .find(|s| {
                if roll < s.weight {
                    true
                } else {
                    roll -= s.weight;
                    false
                }
            })
            .cloned()?;

        let outcome = SpinOutcome {
            label: segment.label,
            reward_tokens: segment.reward_tokens,
            spun_at: now,
        };

        info!("Spin: '{}' ({} tokens)", outcome.label, outcome.reward_tokens);
        self.last_spin_at = Some(now);
        self.history.push(outcome.clone());
        Some(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_spin_returns_an_outcome() {
        let mut wheel = SpinnerWheel::default();
        let mut rng = StdRng::seed_from_u64(7);
        let outcome = wheel.spin(&mut rng, 0);
        assert!(outcome.is_some());
        assert_eq!(wheel.history().len(), 1);
    }

    #[test]
    fn test_cooldown_blocks_immediate_respin() {
        let mut wheel = SpinnerWheel::default();
        let mut rng = StdRng::seed_from_u64(7);

        assert!(wheel.spin(&mut rng, 0).is_some());
        assert!(wheel.spin(&mut rng, 10).is_none());
        assert_eq!(wheel.cooldown_remaining(10), 50);
        assert!(wheel.spin(&mut rng, SPIN_COOLDOWN_SECS).is_some());
    }

    #[test]
    fn test_outcomes_come_from_the_table() {
        let mut wheel = SpinnerWheel::default();
        let mut rng = StdRng::seed_from_u64(42);
        let labels: Vec<String> = wheel.segments().iter().map(|s| s.label.clone()).collect();

        for i in 0..20 {
            let outcome = wheel.spin(&mut rng, i * SPIN_COOLDOWN_SECS).unwrap();
            assert!(labels.contains(&outcome.label));
        }
        assert_eq!(wheel.history().len(), 20);
    }

    #[test]
    fn test_single_segment_always_wins() {
        let mut wheel = SpinnerWheel::new(vec![SpinSegment {
            label: "Only".to_string(),
            weight: 1,
            reward_tokens: 2.0,
        }]);
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = wheel.spin(&mut rng, 0).unwrap();
        assert_eq!(outcome.label, "Only");
        assert_eq!(outcome.reward_tokens, 2.0);
    }

    #[test]
    fn test_zero_weight_wheel_never_spins() {
        let mut wheel = SpinnerWheel::new(vec![SpinSegment {
            label: "Broken".to_string(),
            weight: 0,
            reward_tokens: 0.0,
        }]);
        let mut rng = StdRng::seed_from_u64(1);
        assert!(wheel.spin(&mut rng, 0).is_none());
    }

    #[test]
    fn test_weighted_distribution_favors_heavy_segments() {
        let mut wheel = SpinnerWheel::new(vec![
            SpinSegment {
                label: "Common".to_string(),
                weight: 99,
                reward_tokens: 0.0,
            },
            SpinSegment {
                label: "Rare".to_string(),
                weight: 1,
                reward_tokens: 100.0,
            },
        ]);
        let mut rng = StdRng::seed_from_u64(123);

        let mut common = 0;
        for i in 0..200 {
            let outcome = wheel.spin(&mut rng, i * SPIN_COOLDOWN_SECS).unwrap();
            if outcome.label == "Common" {
                common += 1;
            }
        }
        // 99:1 weighting should dominate heavily
        assert!(common > 180, "common won only {}/200", common);
    }
}
