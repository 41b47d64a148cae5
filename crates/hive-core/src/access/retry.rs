//! ============================================================================
//! Fetch Retry - Bounded retries for holder verification
//! ============================================================================
//! The verification round trip must never leave the gate stuck in
//! "verifying": transient RPC failures are retried with exponential backoff
//! and jitter, rate limits back off harder, and permanent errors (or retry
//! exhaustion) produce a failed verdict the gate can act on.
//! ============================================================================

use anyhow::Result;
use solana_sdk::pubkey::Pubkey;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use super::checker::HolderChecker;
use super::types::HolderSnapshot;

/// Configuration for verification retry behavior
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of verification attempts
    pub max_retries: u32,
    /// Base delay between retries (multiplied by 2^attempt)
    pub base_delay_ms: u64,
    /// Maximum delay between retries
    pub max_delay_ms: u64,
    /// Whether to add jitter to delays
    pub jitter: bool,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 4,
            base_delay_ms: 500,
            max_delay_ms: 8000,
            jitter: true,
        }
    }
}

/// Error classification for retry decisions
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ErrorKind {
    /// Error is likely transient, should retry
    Retryable,
    /// Error is permanent, don't retry
    Permanent,
    /// Rate limited, back off more aggressively
    RateLimited,
}

/// Classify an RPC error to decide whether another attempt makes sense
pub fn classify_error(error: &str) -> ErrorKind {
    let lower = error.to_lowercase();

    // Rate limiting errors
    if lower.contains("rate limit") || lower.contains("too many requests") || lower.contains("429")
    {
        return ErrorKind::RateLimited;
    }

    // Permanent errors - don't retry these
    if lower.contains("invalid param")
        || lower.contains("invalid address")
        || lower.contains("invalid pubkey")
        || lower.contains("unpack failed")
        || lower.contains("wrongsize")
        || lower.contains("unsupported")
    {
        return ErrorKind::Permanent;
    }

    // Network/connection errors are usually retryable
    if lower.contains("connection")
        || lower.contains("timeout")
        || lower.contains("network")
        || lower.contains("temporary")
        || lower.contains("try again")
    {
        return ErrorKind::Retryable;
    }

    // Default to retryable for unknown errors
    ErrorKind::Retryable
}

/// Calculate delay with exponential backoff and optional jitter
pub fn calculate_delay(attempt: u32, config: &RetryConfig) -> Duration {
    let multiplier = 2u64.saturating_pow(attempt.min(63));
    let base_delay = config.base_delay_ms.saturating_mul(multiplier);
    let capped_delay = base_delay.min(config.max_delay_ms);

    let final_delay = if config.jitter {
        // Add jitter (0-50% of delay)
        let jitter_factor = 1.0 + (rand_simple() * 0.5);
        (capped_delay as f64 * jitter_factor) as u64
    } else {
        capped_delay
    };

    Duration::from_millis(final_delay)
}

/// Simple time-seeded pseudo-random value in 0.0..1.0
fn rand_simple() -> f64 {
    use std::time::SystemTime;
    let nanos = SystemTime::now()
        .duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or_default()
        .subsec_nanos();
    (nanos % 1000) as f64 / 1000.0
}

/// Run the holder verification with bounded retries.
/// Returns the snapshot on success, or the last error once attempts are
/// exhausted or a permanent error is hit.
pub async fn verify_with_retry(
    checker: &HolderChecker,
    wallet: &Pubkey,
    config: &RetryConfig,
) -> Result<HolderSnapshot> {
    let mut last_error = None;

    for attempt in 0..config.max_retries {
        if attempt > 0 {
            let delay = calculate_delay(attempt - 1, config);
            debug!("Verification retry attempt {} after {:?}", attempt, delay);
            sleep(delay).await;
        }

        match checker.verify(wallet) {
            Ok(snapshot) => return Ok(snapshot),
            Err(e) => {
                let error_str = e.to_string();
                let kind = classify_error(&error_str);

                warn!(
                    "Verification attempt {} failed ({:?}): {}",
                    attempt + 1,
                    kind,
                    error_str
                );

                match kind {
                    ErrorKind::Permanent => return Err(e),
                    ErrorKind::RateLimited => {
                        let rate_limit_delay = Duration::from_millis(config.max_delay_ms);
                        warn!("Rate limited, waiting {:?}", rate_limit_delay);
                        sleep(rate_limit_delay).await;
                    }
                    ErrorKind::Retryable => {}
                }

                last_error = Some(e);
            }
        }
    }

    Err(last_error.unwrap_or_else(|| {
        anyhow::anyhow!("Verification failed with no attempts (max_retries = 0)")
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert_eq!(classify_error("rate limit exceeded"), ErrorKind::RateLimited);
        assert_eq!(classify_error("HTTP 429 Too Many Requests"), ErrorKind::RateLimited);
        assert_eq!(classify_error("Invalid param: WrongSize"), ErrorKind::Permanent);
        assert_eq!(classify_error("Token account unpack failed: x"), ErrorKind::Permanent);
        assert_eq!(classify_error("connection refused"), ErrorKind::Retryable);
        assert_eq!(classify_error("timeout waiting for response"), ErrorKind::Retryable);
        assert_eq!(classify_error("unknown error xyz"), ErrorKind::Retryable);
    }

    #[test]
    fn test_calculate_delay() {
        let config = RetryConfig {
            jitter: false,
            ..Default::default()
        };

        assert_eq!(calculate_delay(0, &config), Duration::from_millis(500));
        assert_eq!(calculate_delay(1, &config), Duration::from_millis(1000));
        assert_eq!(calculate_delay(2, &config), Duration::from_millis(2000));
        assert_eq!(calculate_delay(3, &config), Duration::from_millis(4000));
        // Capped at max_delay_ms
        assert_eq!(calculate_delay(10, &config), Duration::from_millis(8000));
    }

    #[test]
    fn test_calculate_delay_with_jitter() {
        let config = RetryConfig {
            jitter: true,
            base_delay_ms: 1000,
            max_delay_ms: 8000,
            ..Default::default()
        };

        // With jitter, delay is in [base, base * 1.5]
        for _ in 0..10 {
            let delay = calculate_delay(0, &config);
            assert!(delay >= Duration::from_millis(1000));
            assert!(delay <= Duration::from_millis(1500));
        }
    }

    #[test]
    fn test_retry_config_default() {
        let config = RetryConfig::default();
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.base_delay_ms, 500);
        assert_eq!(config.max_delay_ms, 8000);
        assert!(config.jitter);
    }
}
