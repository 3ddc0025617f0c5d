// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Resource lifecycle dispatch for the certificate custom resource.
//!
//! The [`Provisioner`] receives one provisioning event per invocation,
//! validates the required `Domain` and `HostedZone` properties up front,
//! and routes by request type:
//!
//! - **Create** - request a certificate, publish its DNS validation
//!   record, wait for issuance ([`create`] module)
//! - **Delete** - tear down every certificate matching the domain and its
//!   validation record ([`delete`] module)
//! - **Update** - a logged no-op; changing `Domain` or `HostedZone` on an
//!   existing resource reconciles nothing
//!
//! The provisioner is generic over its two collaborators so tests can
//! substitute recording doubles for the ACM and Route 53 adapters.
//!
//! # Example
//!
//! ```rust,no_run
//! use certifier::acm::AcmCertificateAuthority;
//! use certifier::event::ProvisioningEvent;
//! use certifier::handler::Provisioner;
//! use certifier::route53::Route53DnsService;
//! use certifier::session::load_session;
//!
//! # async fn example(event: ProvisioningEvent) {
//! let session = load_session().await;
//! let provisioner = Provisioner::new(
//!     AcmCertificateAuthority::new(&session),
//!     Route53DnsService::new(&session),
//! );
//! let result = provisioner.handle(&event).await;
//! # let _ = result;
//! # }
//! ```

mod create;
mod delete;
pub mod poll;


pub use poll::{poll_until, PollPolicy};

use crate::acm::CertificateAuthority;
use crate::constants::{PROP_DOMAIN, PROP_HOSTED_ZONE};
use crate::event::{ProvisioningEvent, ProvisioningResult, RequestType};
use crate::provision_errors::ProvisionError;
use crate::route53::DnsService;
use tracing::info;

/// Orchestrates the create/update/delete lifecycle of one certificate
/// resource against a certificate authority and a DNS service.
///
/// One invocation is strictly sequential; the provisioner holds no state
/// beyond its collaborators and poll policies.
pub struct Provisioner<A, D> {
    authority: A,
    dns: D,
    validation_options_policy: PollPolicy,
    issuance_policy: PollPolicy,
}

impl<A, D> Provisioner<A, D>
where
    A: CertificateAuthority,
    D: DnsService,
{
    /// Build a provisioner with the default poll policies.
    pub fn new(authority: A, dns: D) -> Self {
        Self {
            authority,
            dns,
            validation_options_policy: PollPolicy::validation_options(),
            issuance_policy: PollPolicy::issuance(),
        }
    }

    /// Override both poll policies.
    ///
    /// The bounds are policy constants rather than anything reported by the
    /// authority; this is the seam for tuning them (and for fast tests).
    #[must_use]
    pub fn with_poll_policies(
        mut self,
        validation_options: PollPolicy,
        issuance: PollPolicy,
    ) -> Self {
        self.validation_options_policy = validation_options;
        self.issuance_policy = issuance;
        self
    }

    /// Handle one provisioning event.
    ///
    /// Every outcome is rendered as a [`ProvisioningResult`]; failures ride
    /// in the result's `error` field so a provisional certificate ARN can
    /// still be reported alongside the error that aborted the invocation.
    pub async fn handle(&self, event: &ProvisioningEvent) -> ProvisioningResult {
        // Both properties are validated before any branch, even for request
        // types that do not use them.
        let (domain, hosted_zone) = match self.required_properties(event) {
            Ok(properties) => properties,
            Err(error) => return ProvisioningResult::failed(error),
        };

        match event.request_type {
            RequestType::Create => {
                info!(domain, hosted_zone, "received Create event");
                self.create_certificate(domain, hosted_zone).await
            }
            RequestType::Delete => {
                info!(domain, hosted_zone, "received Delete event");
                match self.delete_certificates(domain, hosted_zone).await {
                    Ok(()) => ProvisioningResult::default(),
                    Err(error) => ProvisioningResult::failed(error),
                }
            }
            RequestType::Update => {
                info!(
                    domain,
                    hosted_zone,
                    "received Update event, ignoring: property changes are not reconciled"
                );
                ProvisioningResult::default()
            }
        }
    }

    fn required_properties<'e>(
        &self,
        event: &'e ProvisioningEvent,
    ) -> Result<(&'e str, &'e str), ProvisionError> {
        let domain = event.required_property(PROP_DOMAIN)?;
        let hosted_zone = event.required_property(PROP_HOSTED_ZONE)?;
        Ok((domain, hosted_zone))
    }
}
