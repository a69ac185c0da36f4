//! Face verification capability.
//!
//! The flow only depends on the `FaceVerifier` trait; the shipped
//! implementation simulates a slow, fallible external matcher. A real
//! matcher slots in behind the same call without touching the handlers.

use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

/// Outcome of a face verification attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// The face photo matches the registration
    Match,
    /// The matcher rejected the photo
    NoMatch,
}

/// A (possibly slow, possibly failing) face matcher
#[async_trait]
pub trait FaceVerifier: Send + Sync {
    /// Decide whether the submitted face photo matches the registration
    async fn verify(&self, image: &str) -> VerifyOutcome;
}

/// Simulated matcher: sleeps for a fixed delay, then rejects a fixed
/// fraction of attempts at random. No pixel ever gets looked at.
pub struct SimulatedVerifier {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedVerifier {
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        Self {
            delay,
            failure_rate: failure_rate.clamp(0.0, 1.0),
        }
    }
}

#[async_trait]
impl FaceVerifier for SimulatedVerifier {
    async fn verify(&self, _image: &str) -> VerifyOutcome {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if rand::rng().random_bool(self.failure_rate) {
            VerifyOutcome::NoMatch
        } else {
            VerifyOutcome::Match
        }
    }
}
