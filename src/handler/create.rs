// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Certificate issuance orchestration (the Create path).
//!
//! Steps, each a hard dependency on the previous one succeeding:
//!
//! 1. Request a DNS-validated certificate and capture the ARN immediately
//!    as the physical resource id and output data
//! 2. Poll until the authority attaches a validation option (assigned
//!    asynchronously after the request is created)
//! 3. Read the first validation option's record name and value
//! 4. Resolve the hosted zone name to its zone id
//! 5. Publish the validation CNAME with a CREATE change (a name collision
//!    is surfaced, not retried)
//! 6. Poll until the certificate status is Issued
//!
//! There is no rollback: a failure after step 1 leaves the certificate
//! request (and possibly the DNS record) in place, and the provisional ARN
//! is reported with the error so the engine can still clean it up.
//! Re-running Create for the same domain is not idempotent; the second
//! invocation's CREATE change collides on the record name.

use super::Provisioner;
use crate::acm::{CertificateAuthority, ValidationRecord};
use crate::constants::{ISSUANCE_TIMEOUT_MESSAGE, VALIDATION_OPTIONS_TIMEOUT_MESSAGE};
use crate::event::ProvisioningResult;
use crate::handler::poll::poll_until;
use crate::provision_errors::ProvisionError;
use crate::route53::{DnsService, RecordChange};
use tracing::{error, info};

impl<A, D> Provisioner<A, D>
where
    A: CertificateAuthority,
    D: DnsService,
{
    /// Run the issuance orchestration for `domain`.
    pub(super) async fn create_certificate(
        &self,
        domain: &str,
        hosted_zone: &str,
    ) -> ProvisioningResult {
        let arn = match self.authority.request_certificate(domain).await {
            Ok(arn) => arn,
            Err(error) => return ProvisioningResult::failed(error),
        };
        info!(certificate_arn = %arn, "created certificate request");

        // The ARN is captured before the remaining steps so a later failure
        // still reports the partially-provisioned certificate.
        let mut result = ProvisioningResult::for_certificate(&arn);

        if let Err(e) = self.validate_and_await_issuance(&arn, hosted_zone).await {
            error!(certificate_arn = %arn, error = %e, "certificate provisioning failed");
            result.error = Some(e);
        }
        result
    }

    /// Steps 2-6: publish the validation record and wait for issuance.
    async fn validate_and_await_issuance(
        &self,
        arn: &str,
        hosted_zone: &str,
    ) -> Result<(), ProvisionError> {
        self.await_validation_options(arn).await?;

        let detail = self.authority.describe_certificate(arn).await?;
        let record = first_validation_record(arn, &detail.validation_records)?;

        let zone_id = self.dns.lookup_zone_id(hosted_zone).await?;
        info!(
            zone_id = %zone_id,
            record_name = %record.name,
            "publishing validation CNAME record"
        );
        self.dns
            .apply_change(&zone_id, &RecordChange::create(&record))
            .await?;

        self.await_issuance(arn).await
    }

    /// Wait for the authority to attach at least one validation option.
    async fn await_validation_options(&self, arn: &str) -> Result<(), ProvisionError> {
        info!(certificate_arn = %arn, "waiting for certificate to expose a validation option");
        poll_until(
            self.validation_options_policy,
            VALIDATION_OPTIONS_TIMEOUT_MESSAGE,
            move || async move {
                let detail = self.authority.describe_certificate(arn).await?;
                Ok(!detail.validation_records.is_empty())
            },
        )
        .await
    }

    /// Wait for the certificate status to become Issued.
    async fn await_issuance(&self, arn: &str) -> Result<(), ProvisionError> {
        info!(certificate_arn = %arn, "waiting for certificate to be issued");
        poll_until(self.issuance_policy, ISSUANCE_TIMEOUT_MESSAGE, move || {
            async move {
                let detail = self.authority.describe_certificate(arn).await?;
                Ok(detail.status.is_issued())
            }
        })
        .await
    }
}

/// The first validation option's record is the only challenge acted on.
pub(super) fn first_validation_record(
    arn: &str,
    records: &[ValidationRecord],
) -> Result<ValidationRecord, ProvisionError> {
    records
        .first()
        .cloned()
        .ok_or_else(|| ProvisionError::MissingValidationRecord {
            arn: arn.to_string(),
        })
}
