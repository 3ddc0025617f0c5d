// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the certifier custom resource.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

use std::time::Duration;

// ============================================================================
// Event Property Constants
// ============================================================================

/// Resource property carrying the certificate's domain name
pub const PROP_DOMAIN: &str = "Domain";

/// Resource property carrying the Route 53 hosted zone name
pub const PROP_HOSTED_ZONE: &str = "HostedZone";

/// Output data key carrying the issued certificate's ARN
pub const DATA_CERTIFICATE_ARN: &str = "CertificateArn";

// ============================================================================
// DNS Validation Record Constants
// ============================================================================

/// TTL applied when the validation CNAME record is created
pub const CREATE_RECORD_TTL_SECS: i64 = 5;

/// TTL sent when the validation CNAME record is deleted.
///
/// Asymmetric with [`CREATE_RECORD_TTL_SECS`]. The TTL is not part of the
/// delete-by-value match, so the mismatch is carried as-is rather than
/// silently corrected.
pub const DELETE_RECORD_TTL_SECS: i64 = 60;

// ============================================================================
// Polling Constants
// ============================================================================

/// Delay between consecutive poll attempts
pub const POLL_DELAY: Duration = Duration::from_secs(6);

/// Attempts waiting for ACM to attach a validation option (~1 minute total)
pub const VALIDATION_OPTIONS_ATTEMPTS: u32 = 10;

/// Attempts waiting for the certificate to be issued (~15 minutes total)
pub const ISSUANCE_ATTEMPTS: u32 = 150;

/// Timeout message for the validation-options wait
pub const VALIDATION_OPTIONS_TIMEOUT_MESSAGE: &str =
    "no validation option for certificate - timed out after a minute";

/// Timeout message for the issuance wait
pub const ISSUANCE_TIMEOUT_MESSAGE: &str = "certificate validation timed out after 15 minutes";

// ============================================================================
// Runtime Constants
// ============================================================================

/// Number of worker threads for Tokio runtime
pub const TOKIO_WORKER_THREADS: usize = 2;
