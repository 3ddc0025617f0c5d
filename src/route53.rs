// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! DNS service capability trait and the Route 53 adapter.
//!
//! The validation challenge is satisfied by publishing a single CNAME
//! record into the hosted zone, and reversed by deleting it. The
//! [`DnsService`] trait is the test seam; [`Route53DnsService`] is the
//! production implementation over the two Route 53 operations consumed:
//!
//! - `ListHostedZonesByName` - resolves the zone name to a zone id; the
//!   name is queried with a trailing dot appended per DNS convention and
//!   the first zone returned is used unconditionally
//! - `ChangeResourceRecordSets` - applies a CREATE or DELETE change

use crate::acm::ValidationRecord;
use crate::constants::{CREATE_RECORD_TTL_SECS, DELETE_RECORD_TTL_SECS};
use crate::provision_errors::ProvisionError;
use async_trait::async_trait;
use aws_sdk_route53::error::DisplayErrorContext;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};

/// Direction of a record set change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordAction {
    /// Create the record; fails if a record of the same name already exists
    Create,
    /// Delete the record by exact name/value match
    Delete,
}

/// A single CNAME record set change to apply to a hosted zone.
///
/// The constructors carry the lifecycle's TTL policy: 5 seconds on create,
/// 60 seconds on delete. The TTL does not participate in delete matching,
/// so the asymmetry is preserved rather than unified.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordChange {
    /// CREATE or DELETE
    pub action: RecordAction,
    /// Fully-qualified record name
    pub name: String,
    /// Record value
    pub value: String,
    /// Record TTL in seconds
    pub ttl: i64,
}

impl RecordChange {
    /// The CREATE change publishing a validation record.
    #[must_use]
    pub fn create(record: &ValidationRecord) -> Self {
        Self {
            action: RecordAction::Create,
            name: record.name.clone(),
            value: record.value.clone(),
            ttl: CREATE_RECORD_TTL_SECS,
        }
    }

    /// The DELETE change removing a validation record.
    #[must_use]
    pub fn delete(record: &ValidationRecord) -> Self {
        Self {
            action: RecordAction::Delete,
            name: record.name.clone(),
            value: record.value.clone(),
            ttl: DELETE_RECORD_TTL_SECS,
        }
    }
}

/// Capability trait over the DNS service.
///
/// Implemented by [`Route53DnsService`] in production and by recording
/// doubles in tests.
#[async_trait]
pub trait DnsService {
    /// Resolve a hosted zone name to its opaque zone identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::HostedZoneNotFound`] when the lookup
    /// returns no zones, or a dependency error when the call itself fails.
    async fn lookup_zone_id(&self, zone_name: &str) -> Result<String, ProvisionError>;

    /// Apply a single record set change to a hosted zone.
    ///
    /// # Errors
    ///
    /// Returns a dependency error when the service rejects the change,
    /// including the name-collision case for CREATE.
    async fn apply_change(&self, zone_id: &str, change: &RecordChange)
        -> Result<(), ProvisionError>;
}

/// Production [`DnsService`] backed by Amazon Route 53.
#[derive(Clone, Debug)]
pub struct Route53DnsService {
    client: aws_sdk_route53::Client,
}

impl Route53DnsService {
    /// Build the Route 53 client from an already-acquired session.
    #[must_use]
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: aws_sdk_route53::Client::new(config),
        }
    }
}

#[async_trait]
impl DnsService for Route53DnsService {
    async fn lookup_zone_id(&self, zone_name: &str) -> Result<String, ProvisionError> {
        let output = self
            .client
            .list_hosted_zones_by_name()
            .dns_name(format!("{zone_name}."))
            .send()
            .await
            .map_err(|e| ProvisionError::dns("ListHostedZonesByName", DisplayErrorContext(&e)))?;

        // First zone wins; no disambiguation when several zones share the
        // name suffix.
        let zone = output
            .hosted_zones()
            .first()
            .ok_or_else(|| ProvisionError::HostedZoneNotFound {
                zone: zone_name.to_string(),
            })?;

        Ok(zone.id().to_string())
    }

    async fn apply_change(
        &self,
        zone_id: &str,
        change: &RecordChange,
    ) -> Result<(), ProvisionError> {
        let action = match change.action {
            RecordAction::Create => ChangeAction::Create,
            RecordAction::Delete => ChangeAction::Delete,
        };

        let record = ResourceRecord::builder()
            .value(&change.value)
            .build()
            .map_err(|e| ProvisionError::dns("ChangeResourceRecordSets", e))?;

        let record_set = ResourceRecordSet::builder()
            .name(&change.name)
            .r#type(RrType::Cname)
            .ttl(change.ttl)
            .resource_records(record)
            .build()
            .map_err(|e| ProvisionError::dns("ChangeResourceRecordSets", e))?;

        let batch = ChangeBatch::builder()
            .changes(
                Change::builder()
                    .action(action)
                    .resource_record_set(record_set)
                    .build()
                    .map_err(|e| ProvisionError::dns("ChangeResourceRecordSets", e))?,
            )
            .build()
            .map_err(|e| ProvisionError::dns("ChangeResourceRecordSets", e))?;

        self.client
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| ProvisionError::dns("ChangeResourceRecordSets", DisplayErrorContext(&e)))?;

        Ok(())
    }
}
