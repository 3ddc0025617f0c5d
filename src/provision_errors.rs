// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for the certificate provisioning lifecycle.
//!
//! This module provides the typed error surface for:
//! - Input validation of the provisioning event
//! - ACM and Route 53 service call failures
//! - Poll-loop timeouts while waiting on certificate state
//!
//! Everything here is fatal to the invocation except where the teardown
//! orchestrator explicitly suppresses a certificate-deletion failure. The
//! orchestrating engine only sees the rendered message, so each variant
//! carries enough context to stand alone as a single error string.

use thiserror::Error;

/// Errors that can occur while provisioning or tearing down a certificate.
#[derive(Error, Debug, Clone)]
pub enum ProvisionError {
    /// A required resource property is absent from the provisioning event.
    ///
    /// Raised before any external service call, with a distinct message per
    /// missing field. A property present with a non-string value counts as
    /// missing.
    #[error("'{property}' property is required")]
    MissingProperty {
        /// The property name that was not found
        property: &'static str,
    },

    /// A certificate authority (ACM) call failed.
    ///
    /// Carries the failing operation name and the service error rendered
    /// with its full context. Never retried outside the two poll loops.
    #[error("certificate authority call {operation} failed: {message}")]
    CertificateAuthority {
        /// The ACM operation that failed (e.g. "RequestCertificate")
        operation: &'static str,
        /// The rendered service error
        message: String,
    },

    /// A DNS service (Route 53) call failed.
    ///
    /// Covers both the hosted zone lookup and record set changes. A CREATE
    /// change against an already-existing record surfaces here as well;
    /// repeated Create invocations are documented to collide this way.
    #[error("DNS service call {operation} failed: {message}")]
    Dns {
        /// The Route 53 operation that failed (e.g. "ChangeResourceRecordSets")
        operation: &'static str,
        /// The rendered service error
        message: String,
    },

    /// The hosted zone lookup returned no zones.
    #[error("no hosted zone found matching '{zone}'")]
    HostedZoneNotFound {
        /// The hosted zone name that was looked up
        zone: String,
    },

    /// A described certificate exposes no validation resource record.
    ///
    /// Only reachable after the validation-options wait succeeded, or during
    /// teardown when describing a matched certificate.
    #[error("certificate '{arn}' has no validation resource record")]
    MissingValidationRecord {
        /// The certificate ARN that was described
        arn: String,
    },

    /// A poll loop exhausted its attempt budget.
    ///
    /// The message distinguishes the two waits (validation options vs
    /// issuance); see the constants module for the exact texts.
    #[error("{message}")]
    Timeout {
        /// The timeout message configured for the exhausted loop
        message: &'static str,
    },
}

impl ProvisionError {
    /// Build a [`ProvisionError::CertificateAuthority`] from a service error.
    pub fn authority(operation: &'static str, error: impl std::fmt::Display) -> Self {
        Self::CertificateAuthority {
            operation,
            message: error.to_string(),
        }
    }

    /// Build a [`ProvisionError::Dns`] from a service error.
    pub fn dns(operation: &'static str, error: impl std::fmt::Display) -> Self {
        Self::Dns {
            operation,
            message: error.to_string(),
        }
    }

    /// Returns true if this error came from a poll loop exhausting its budget.
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Returns true if this error was raised by input validation, before any
    /// external service call.
    #[must_use]
    pub fn is_input_validation(&self) -> bool {
        matches!(self, Self::MissingProperty { .. })
    }
}
