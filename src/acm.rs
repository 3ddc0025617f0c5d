// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Certificate authority capability trait and the ACM adapter.
//!
//! The orchestrators never talk to ACM directly; they depend on the
//! [`CertificateAuthority`] trait so the authority can be swapped for a
//! recording double in tests. [`AcmCertificateAuthority`] is the production
//! implementation, a thin projection of the four ACM operations this
//! resource consumes:
//!
//! - `RequestCertificate` (DNS validation only)
//! - `DescribeCertificate`
//! - `ListCertificates`
//! - `DeleteCertificate`
//!
//! The read model deliberately keeps only what the lifecycle needs: the
//! ARN, the status, and the DNS validation resource records.

use crate::provision_errors::ProvisionError;
use async_trait::async_trait;
use aws_sdk_acm::error::DisplayErrorContext;
use aws_sdk_acm::types::{CertificateStatus as AcmCertificateStatus, ValidationMethod};

/// Lifecycle status of a certificate request, as reported by the authority.
///
/// Only [`CertificateStatus::Issued`] is ever branched on; the remaining
/// variants exist so a described status round-trips losslessly into logs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CertificateStatus {
    /// The authority is waiting for the domain validation challenge
    PendingValidation,
    /// The certificate has been issued
    Issued,
    /// Validation failed permanently
    Failed,
    /// Any other status (expired, revoked, inactive, ...)
    Other(String),
}

impl CertificateStatus {
    /// Project the SDK status enum into the domain status.
    #[must_use]
    pub fn from_acm(status: &AcmCertificateStatus) -> Self {
        match status {
            AcmCertificateStatus::PendingValidation => Self::PendingValidation,
            AcmCertificateStatus::Issued => Self::Issued,
            AcmCertificateStatus::Failed => Self::Failed,
            other => Self::Other(other.as_str().to_string()),
        }
    }

    /// Returns true when the certificate has been issued.
    #[must_use]
    pub fn is_issued(&self) -> bool {
        *self == Self::Issued
    }
}

/// The DNS record an authority-issued validation challenge asks for.
///
/// The record type is always CNAME, so only name and value are carried.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationRecord {
    /// Fully-qualified record name to publish
    pub name: String,
    /// Record value proving domain ownership
    pub value: String,
}

/// Detail view of a certificate request.
#[derive(Clone, Debug)]
pub struct CertificateDetail {
    /// The authority-assigned certificate ARN
    pub arn: String,
    /// Current lifecycle status
    pub status: CertificateStatus,
    /// DNS validation records, in the authority's order.
    ///
    /// Empty until the authority assigns validation options, which happens
    /// asynchronously after the request is created. Only the first record
    /// is ever acted on.
    pub validation_records: Vec<ValidationRecord>,
}

/// Summary view of a certificate, as returned by the list operation.
#[derive(Clone, Debug)]
pub struct CertificateSummary {
    /// The authority-assigned certificate ARN
    pub arn: String,
    /// The certificate's primary domain name
    pub domain_name: String,
}

/// Capability trait over the certificate authority.
///
/// Implemented by [`AcmCertificateAuthority`] in production and by
/// recording doubles in tests.
#[async_trait]
pub trait CertificateAuthority {
    /// Request a new DNS-validated certificate for `domain`.
    ///
    /// # Errors
    ///
    /// Returns an error if the authority rejects the request or the
    /// response carries no ARN.
    async fn request_certificate(&self, domain: &str) -> Result<String, ProvisionError>;

    /// Describe a certificate request by ARN.
    ///
    /// # Errors
    ///
    /// Returns an error if the authority call fails or returns no detail.
    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail, ProvisionError>;

    /// List all certificates known to the authority.
    ///
    /// # Errors
    ///
    /// Returns an error if the authority call fails.
    async fn list_certificates(&self) -> Result<Vec<CertificateSummary>, ProvisionError>;

    /// Delete a certificate by ARN.
    ///
    /// # Errors
    ///
    /// Returns an error if the authority refuses the deletion, e.g. while
    /// the certificate is still attached to a load balancer.
    async fn delete_certificate(&self, arn: &str) -> Result<(), ProvisionError>;
}

/// Production [`CertificateAuthority`] backed by AWS Certificate Manager.
#[derive(Clone, Debug)]
pub struct AcmCertificateAuthority {
    client: aws_sdk_acm::Client,
}

impl AcmCertificateAuthority {
    /// Build the ACM client from an already-acquired session.
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_acm::Client::new(config),
        }
    }
}

#[async_trait]
impl CertificateAuthority for AcmCertificateAuthority {
    async fn request_certificate(&self, domain: &str) -> Result<String, ProvisionError> {
        let output = self
            .client
            .request_certificate()
            .domain_name(domain)
            .validation_method(ValidationMethod::Dns)
            .send()
            .await
            .map_err(|e| ProvisionError::authority("RequestCertificate", DisplayErrorContext(&e)))?;

        output
            .certificate_arn()
            .map(str::to_owned)
            .ok_or_else(|| {
                ProvisionError::authority("RequestCertificate", "response carried no certificate ARN")
            })
    }

    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail, ProvisionError> {
        let output = self
            .client
            .describe_certificate()
            .certificate_arn(arn)
            .send()
            .await
            .map_err(|e| {
                ProvisionError::authority("DescribeCertificate", DisplayErrorContext(&e))
            })?;

        let certificate = output.certificate().ok_or_else(|| {
            ProvisionError::authority(
                "DescribeCertificate",
                format!("response carried no certificate detail for '{arn}'"),
            )
        })?;

        let status = certificate
            .status()
            .map_or(CertificateStatus::Other("UNKNOWN".to_string()), |s| {
                CertificateStatus::from_acm(s)
            });

        let validation_records = certificate
            .domain_validation_options()
            .iter()
            .filter_map(|option| option.resource_record())
            .map(|record| ValidationRecord {
                name: record.name().to_string(),
                value: record.value().to_string(),
            })
            .collect();

        Ok(CertificateDetail {
            arn: certificate
                .certificate_arn()
                .unwrap_or(arn)
                .to_string(),
            status,
            validation_records,
        })
    }

    async fn list_certificates(&self) -> Result<Vec<CertificateSummary>, ProvisionError> {
        let output = self
            .client
            .list_certificates()
            .send()
            .await
            .map_err(|e| ProvisionError::authority("ListCertificates", DisplayErrorContext(&e)))?;

        // Summaries without an ARN or domain name are unusable for exact
        // matching and are skipped.
        Ok(output
            .certificate_summary_list()
            .iter()
            .filter_map(|summary| {
                Some(CertificateSummary {
                    arn: summary.certificate_arn()?.to_string(),
                    domain_name: summary.domain_name()?.to_string(),
                })
            })
            .collect())
    }

    async fn delete_certificate(&self, arn: &str) -> Result<(), ProvisionError> {
        self.client
            .delete_certificate()
            .certificate_arn(arn)
            .send()
            .await
            .map_err(|e| ProvisionError::authority("DeleteCertificate", DisplayErrorContext(&e)))?;
        Ok(())
    }
}
