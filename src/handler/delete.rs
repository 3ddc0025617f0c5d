// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Certificate teardown orchestration (the Delete path).
//!
//! Every certificate whose domain name exactly equals the event's `Domain`
//! is processed in sequence; there may be zero or several. For each match
//! the validation CNAME is removed first (fatal on failure), then the
//! certificate itself is deleted best-effort: the authority refuses to
//! delete a certificate that is still in use (e.g. attached to a load
//! balancer), and that must not block the orchestrated deletion from
//! completing, so the failure is logged and suppressed.
//!
//! The hosted zone is resolved inside the per-match loop, once per
//! matching certificate, not hoisted out of it.

use super::create::first_validation_record;
use super::Provisioner;
use crate::acm::CertificateAuthority;
use crate::provision_errors::ProvisionError;
use crate::route53::{DnsService, RecordChange};
use tracing::{info, warn};

impl<A, D> Provisioner<A, D>
where
    A: CertificateAuthority,
    D: DnsService,
{
    /// Run the teardown orchestration for `domain`.
    pub(super) async fn delete_certificates(
        &self,
        domain: &str,
        hosted_zone: &str,
    ) -> Result<(), ProvisionError> {
        let certificates = self.authority.list_certificates().await?;

        for certificate in certificates
            .into_iter()
            .filter(|c| c.domain_name == domain)
        {
            info!(certificate_arn = %certificate.arn, "tearing down certificate");

            let detail = self.authority.describe_certificate(&certificate.arn).await?;
            let record = first_validation_record(&certificate.arn, &detail.validation_records)?;

            let zone_id = self.dns.lookup_zone_id(hosted_zone).await?;
            info!(
                zone_id = %zone_id,
                record_name = %record.name,
                "removing validation CNAME record"
            );
            self.dns
                .apply_change(&zone_id, &RecordChange::delete(&record))
                .await?;

            // Best effort: a certificate still in use cannot be deleted and
            // must not fail the teardown.
            if let Err(error) = self.authority.delete_certificate(&certificate.arn).await {
                warn!(
                    certificate_arn = %certificate.arn,
                    error = %error,
                    "failed to delete certificate, leaving it in place"
                );
            }
        }

        Ok(())
    }
}
