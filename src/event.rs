// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provisioning event and result wire types.
//!
//! These types mirror the CloudFormation custom resource contract: the
//! engine delivers an event with a `RequestType` and a `ResourceProperties`
//! mapping, and expects back a physical resource identifier, an output data
//! mapping, and optionally an error string. Nothing here is persisted; the
//! engine owns the lifecycle of both shapes.
//!
//! # Example
//!
//! ```rust
//! use certifier::event::{ProvisioningEvent, RequestType};
//!
//! let event: ProvisioningEvent = serde_json::from_str(
//!     r#"{
//!         "RequestType": "Create",
//!         "ResourceProperties": {
//!             "Domain": "www.example.com",
//!             "HostedZone": "example.com"
//!         }
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(event.request_type, RequestType::Create);
//! assert_eq!(event.required_property("Domain").unwrap(), "www.example.com");
//! ```

use crate::constants::DATA_CERTIFICATE_ARN;
use crate::provision_errors::ProvisionError;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle phase of a custom resource, as classified by the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum RequestType {
    /// The resource is being created for the first time
    Create,
    /// The resource's properties changed on an existing stack
    Update,
    /// The resource is being removed
    Delete,
}

/// A single provisioning invocation's input.
///
/// Both `Domain` and `HostedZone` are mandatory string properties and are
/// validated before any branch on the request type, even for request types
/// that do not use them.
#[derive(Clone, Debug, Deserialize)]
pub struct ProvisioningEvent {
    /// Create, Update, or Delete
    #[serde(rename = "RequestType")]
    pub request_type: RequestType,

    /// The raw resource properties mapping from the engine.
    ///
    /// Kept as JSON values so that a property present with a non-string
    /// value is distinguishable and rejected by [`Self::required_property`].
    #[serde(rename = "ResourceProperties", default)]
    pub resource_properties: BTreeMap<String, serde_json::Value>,
}

impl ProvisioningEvent {
    /// Fetch a mandatory string property.
    ///
    /// # Errors
    ///
    /// Returns [`ProvisionError::MissingProperty`] when the property is
    /// absent or is not a string.
    pub fn required_property(&self, property: &'static str) -> Result<&str, ProvisionError> {
        self.resource_properties
            .get(property)
            .and_then(serde_json::Value::as_str)
            .ok_or(ProvisionError::MissingProperty { property })
    }
}

/// A single provisioning invocation's output.
///
/// Returned synchronously to the engine. On a successful Create the
/// physical resource id is the certificate ARN and `data` carries the same
/// ARN under `CertificateArn`; Update and Delete report success with both
/// left empty. When an orchestrator fails after the certificate request was
/// already accepted, the provisional identifier is still reported alongside
/// the error so the engine can reference the partially-provisioned
/// certificate.
#[derive(Debug, Default, Serialize)]
pub struct ProvisioningResult {
    /// Stable identifier for the provisioned resource (the certificate ARN)
    #[serde(rename = "PhysicalResourceId")]
    pub physical_resource_id: String,

    /// Output attributes exposed to the rest of the stack
    #[serde(rename = "Data")]
    pub data: BTreeMap<String, String>,

    /// The failure that aborted this invocation, if any
    #[serde(
        rename = "Error",
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_error"
    )]
    pub error: Option<ProvisionError>,
}

impl ProvisioningResult {
    /// Result for a certificate whose request was accepted by the authority.
    ///
    /// Captures the ARN as both the physical resource id and the
    /// `CertificateArn` output datum.
    #[must_use]
    pub fn for_certificate(arn: &str) -> Self {
        let mut data = BTreeMap::new();
        data.insert(DATA_CERTIFICATE_ARN.to_string(), arn.to_string());
        Self {
            physical_resource_id: arn.to_string(),
            data,
            error: None,
        }
    }

    /// Result for an invocation that failed before any identifier existed.
    #[must_use]
    pub fn failed(error: ProvisionError) -> Self {
        Self {
            error: Some(error),
            ..Self::default()
        }
    }

    /// Returns true when the invocation completed without error.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Render the error as its display string for the engine.
fn serialize_error<S>(error: &Option<ProvisionError>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match error {
        Some(e) => serializer.serialize_str(&e.to_string()),
        None => serializer.serialize_none(),
    }
}
