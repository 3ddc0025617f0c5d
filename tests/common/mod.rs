// Common test doubles for integration tests

use async_trait::async_trait;
use certifier::acm::{
    CertificateAuthority, CertificateDetail, CertificateStatus, CertificateSummary,
    ValidationRecord,
};
use certifier::provision_errors::ProvisionError;
use certifier::route53::{DnsService, RecordAction, RecordChange};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

/// In-memory certificate authority.
///
/// Certificates are issued immediately with their validation option
/// attached, so the poll loops pass on the first attempt.
#[derive(Clone, Default)]
pub struct InMemoryAuthority {
    counter: Arc<Mutex<u32>>,
    certificates: Arc<Mutex<BTreeMap<String, (String, CertificateDetail)>>>,
}

impl InMemoryAuthority {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn certificate_count(&self) -> usize {
        self.certificates.lock().unwrap().len()
    }
}

#[async_trait]
impl CertificateAuthority for InMemoryAuthority {
    async fn request_certificate(&self, domain: &str) -> Result<String, ProvisionError> {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        let arn = format!(
            "arn:aws:acm:us-east-1:123456789012:certificate/{:08}",
            *counter
        );

        let detail = CertificateDetail {
            arn: arn.clone(),
            status: CertificateStatus::Issued,
            validation_records: vec![ValidationRecord {
                name: format!("_validate.{domain}."),
                value: "_target.acm-validations.aws.".to_string(),
            }],
        };
        self.certificates
            .lock()
            .unwrap()
            .insert(arn.clone(), (domain.to_string(), detail));
        Ok(arn)
    }

    async fn describe_certificate(&self, arn: &str) -> Result<CertificateDetail, ProvisionError> {
        self.certificates
            .lock()
            .unwrap()
            .get(arn)
            .map(|(_, detail)| detail.clone())
            .ok_or_else(|| {
                ProvisionError::authority("DescribeCertificate", format!("not found: {arn}"))
            })
    }

    async fn list_certificates(&self) -> Result<Vec<CertificateSummary>, ProvisionError> {
        Ok(self
            .certificates
            .lock()
            .unwrap()
            .iter()
            .map(|(arn, (domain, _))| CertificateSummary {
                arn: arn.clone(),
                domain_name: domain.clone(),
            })
            .collect())
    }

    async fn delete_certificate(&self, arn: &str) -> Result<(), ProvisionError> {
        self.certificates
            .lock()
            .unwrap()
            .remove(arn)
            .map(|_| ())
            .ok_or_else(|| {
                ProvisionError::authority("DeleteCertificate", format!("not found: {arn}"))
            })
    }
}

/// In-memory hosted zone enforcing Route 53's CREATE/DELETE semantics:
/// creating an existing record name fails, as does deleting a missing one.
#[derive(Clone, Default)]
pub struct InMemoryDns {
    records: Arc<Mutex<BTreeMap<String, String>>>,
}

impl InMemoryDns {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_value(&self, name: &str) -> Option<String> {
        self.records.lock().unwrap().get(name).cloned()
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }
}

#[async_trait]
impl DnsService for InMemoryDns {
    async fn lookup_zone_id(&self, zone_name: &str) -> Result<String, ProvisionError> {
        Ok(format!("/hostedzone/Z{}", zone_name.len()))
    }

    async fn apply_change(
        &self,
        _zone_id: &str,
        change: &RecordChange,
    ) -> Result<(), ProvisionError> {
        let mut records = self.records.lock().unwrap();
        match change.action {
            RecordAction::Create => {
                if records.contains_key(&change.name) {
                    return Err(ProvisionError::dns(
                        "ChangeResourceRecordSets",
                        format!(
                            "Tried to create resource record set [name='{}'] but it already exists",
                            change.name
                        ),
                    ));
                }
                records.insert(change.name.clone(), change.value.clone());
                Ok(())
            }
            RecordAction::Delete => records
                .remove(&change.name)
                .map(|_| ())
                .ok_or_else(|| {
                    ProvisionError::dns(
                        "ChangeResourceRecordSets",
                        format!(
                            "Tried to delete resource record set [name='{}'] but it was not found",
                            change.name
                        ),
                    )
                }),
        }
    }
}
