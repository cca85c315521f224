//! Resilience harness.
//!
//! Supports:
//! - Center crop ([`simulate_crop`])
//! - Additive RGB noise ([`simulate_noise`], [`simulate_noise_with_rng`])
//! - Chained scenarios and survival reports ([`evaluate`])

pub mod attack;
pub mod harness;

pub use attack::{
    simulate_crop, simulate_noise, simulate_noise_with_rng, Attack, AttackError, NOISE_AMPLITUDE,
};
pub use harness::{evaluate, HarnessError, Outcome, ResilienceReport};
