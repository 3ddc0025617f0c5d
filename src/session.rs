// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! AWS session acquisition.
//!
//! One explicit configuration-acquisition step per invocation, producing a
//! session object that is threaded into both service adapters. The session
//! respects:
//!
//! - environment variables (`AWS_ACCESS_KEY_ID`, `AWS_REGION`, ...)
//! - the shared `~/.aws/config` and `~/.aws/credentials` files
//!
//! Credential problems are not detected here; the Rust SDK resolves
//! credentials lazily, so a bad chain surfaces as a dependency error on the
//! first service call.

use aws_config::SdkConfig;
use tracing::debug;

/// Load the ambient AWS configuration.
///
/// Called once at the start of an invocation, before any domain logic.
pub async fn load_session() -> SdkConfig {
    debug!("loading AWS configuration from the ambient credential chain");
    let config = aws_config::load_from_env().await;
    debug!(region = ?config.region(), "AWS configuration loaded");
    config
}
