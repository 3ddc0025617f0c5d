// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # Certifier - ACM Certificate Custom Resource for CloudFormation
//!
//! Certifier is a CloudFormation custom resource, written in Rust, that
//! provisions an AWS Certificate Manager certificate for a domain and
//! satisfies the DNS validation challenge automatically by publishing the
//! validation CNAME into a Route 53 hosted zone.
//!
//! ## Overview
//!
//! One invocation handles one provisioning event:
//!
//! - **Create** requests a DNS-validated certificate, waits for ACM to
//!   attach the validation option, publishes the validation CNAME record,
//!   and waits (up to ~15 minutes) until the certificate is issued.
//! - **Delete** finds every certificate matching the domain, removes its
//!   validation record, and deletes the certificate best-effort.
//! - **Update** is a logged no-op.
//!
//! ## Modules
//!
//! - [`event`] - Provisioning event and result wire types
//! - [`handler`] - Lifecycle dispatch and the two orchestrators
//! - [`acm`] - Certificate authority capability trait and ACM adapter
//! - [`route53`] - DNS service capability trait and Route 53 adapter
//! - [`session`] - Ambient AWS configuration acquisition
//! - [`provision_errors`] - Typed error surface
//!
//! ## Example
//!
//! ```rust,no_run
//! use certifier::acm::AcmCertificateAuthority;
//! use certifier::event::ProvisioningEvent;
//! use certifier::handler::Provisioner;
//! use certifier::route53::Route53DnsService;
//! use certifier::session::load_session;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let event: ProvisioningEvent = serde_json::from_str(
//!     r#"{
//!         "RequestType": "Create",
//!         "ResourceProperties": {
//!             "Domain": "www.example.com",
//!             "HostedZone": "example.com"
//!         }
//!     }"#,
//! )?;
//!
//! let session = load_session().await;
//! let provisioner = Provisioner::new(
//!     AcmCertificateAuthority::new(&session),
//!     Route53DnsService::new(&session),
//! );
//!
//! let result = provisioner.handle(&event).await;
//! println!("{}", serde_json::to_string(&result)?);
//! # Ok(())
//! # }
//! ```
//!
//! ## Limitations
//!
//! Single domain, single hosted zone, DNS validation only. Create is not
//! idempotent: re-running it issues a second certificate and the second
//! validation record CREATE collides on the record name.

pub mod acm;
pub mod constants;
pub mod event;
pub mod handler;
pub mod provision_errors;
pub mod route53;
pub mod session;
