// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Bounded fixed-delay polling primitive.
//!
//! Both certificate waits (validation options appearing, issuance
//! completing) share one control-flow shape: query authority state up to N
//! times with a fixed delay between attempts, succeed on the first true
//! predicate, and fail with a loop-specific timeout error once the budget
//! is exhausted. A hard error from the predicate aborts the loop
//! immediately and is propagated as-is, never retried.

use crate::constants::{ISSUANCE_ATTEMPTS, POLL_DELAY, VALIDATION_OPTIONS_ATTEMPTS};
use crate::provision_errors::ProvisionError;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Attempt budget and delay for one poll loop.
///
/// The defaults are policy constants, not values computed from
/// authority-reported ETAs. Tests swap in millisecond policies through
/// [`crate::handler::Provisioner::with_poll_policies`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PollPolicy {
    /// Maximum number of predicate attempts
    pub attempts: u32,
    /// Delay slept after every failed attempt
    pub delay: Duration,
}

impl PollPolicy {
    /// A policy with explicit bounds.
    #[must_use]
    pub const fn new(attempts: u32, delay: Duration) -> Self {
        Self { attempts, delay }
    }

    /// Default policy for the validation-options wait (10 x 6s, ~1 minute).
    #[must_use]
    pub const fn validation_options() -> Self {
        Self::new(VALIDATION_OPTIONS_ATTEMPTS, POLL_DELAY)
    }

    /// Default policy for the issuance wait (150 x 6s, ~15 minutes).
    #[must_use]
    pub const fn issuance() -> Self {
        Self::new(ISSUANCE_ATTEMPTS, POLL_DELAY)
    }
}

/// Repeatedly evaluate `predicate` until it returns true or the policy's
/// attempt budget runs out.
///
/// The delay is slept after every failed attempt, including the last one,
/// so 10 attempts at 6 seconds come out at roughly one minute of waiting.
///
/// # Errors
///
/// - Any error from `predicate` aborts the loop immediately and is
///   returned unchanged.
/// - [`ProvisionError::Timeout`] with `timeout_message` once all attempts
///   returned false.
pub async fn poll_until<F, Fut>(
    policy: PollPolicy,
    timeout_message: &'static str,
    mut predicate: F,
) -> Result<(), ProvisionError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool, ProvisionError>>,
{
    for attempt in 1..=policy.attempts {
        if predicate().await? {
            debug!(attempt, "poll condition satisfied");
            return Ok(());
        }

        debug!(
            attempt,
            attempts = policy.attempts,
            delay = ?policy.delay,
            "poll condition not met, retrying after delay"
        );
        tokio::time::sleep(policy.delay).await;
    }

    Err(ProvisionError::Timeout {
        message: timeout_message,
    })
}

#[cfg(test)]
#[path = "poll_tests.rs"]
mod poll_tests;
