use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Credential schemas understood by the verification service.
///
/// The value only routes the request server-side and labels the result; the
/// client attaches no validation to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CredentialType {
    /// Orchard harvest event (bin, row, picker).
    #[serde(rename = "OrgPartHarvertCredential")]
    Harvest,
    /// Delivery of harvested produce.
    #[serde(rename = "DeliveryCredential")]
    Delivery,
}

impl CredentialType {
    /// Name the verification service uses for this type.
    ///
    /// The harvest spelling is the service's own and must be sent verbatim.
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::Harvest => "OrgPartHarvertCredential",
            Self::Delivery => "DeliveryCredential",
        }
    }

    /// Short human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Harvest => "Harvest",
            Self::Delivery => "Delivery",
        }
    }

    pub fn is_delivery(&self) -> bool {
        matches!(self, Self::Delivery)
    }
}

/// Label for an optional credential type, `"Credential"` when absent.
pub fn credential_label(credential_type: Option<CredentialType>) -> &'static str {
    credential_type.map_or("Credential", |t| t.label())
}

impl fmt::Display for CredentialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}

impl FromStr for CredentialType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "OrgPartHarvertCredential" => return Ok(Self::Harvest),
            "DeliveryCredential" => return Ok(Self::Delivery),
            _ => {}
        }
        match s.to_ascii_lowercase().as_str() {
            "harvest" => Ok(Self::Harvest),
            "delivery" => Ok(Self::Delivery),
            _ => Err(CoreError::UnknownCredentialType(s.to_string())),
        }
    }
}

/// Body of `POST /api/v1/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerificationRequest {
    /// Undecoded scan result, forwarded as-is.
    pub payload: String,
    pub user_id: String,
    #[serde(rename = "mobile_application_id")]
    pub application_id: String,
    /// Omitted from the body when absent so the service applies its default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<CredentialType>,
}

/// Body of `POST /api/v1/revoke`. Same envelope as [`VerificationRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevocationRequest {
    pub payload: String,
    pub user_id: String,
    #[serde(rename = "mobile_application_id")]
    pub application_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<CredentialType>,
}

/// Fields the service decoded from a credential.
///
/// Every field is optional: harvest and delivery credentials share the
/// identity fields and differ in the rest. A known field only lands in its
/// slot when it is a string; anything else, and every field not listed here,
/// is kept in `extra` under its original key, so the view never loses data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "Map<String, Value>")]
pub struct DecodedCredential {
    /// Issuer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    /// Token identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
    /// New Zealand Business Number of the registered business.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nzbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub collection_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bin_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orchard_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picker_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picker_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest_start_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harvest_end_datetime: Option<String>,
    /// Any other field, e.g. delivery-specific ones.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Remove `key` from `map` if it holds a string.
fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    if !map.get(key).is_some_and(Value::is_string) {
        return None;
    }
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

impl From<Map<String, Value>> for DecodedCredential {
    fn from(mut fields: Map<String, Value>) -> Self {
        let iss = take_string(&mut fields, "iss");
        let sub = take_string(&mut fields, "sub");
        let jti = take_string(&mut fields, "jti");
        let nzbn = take_string(&mut fields, "nzbn");
        let collection_id = take_string(&mut fields, "collectionId");
        let bin_identifier = take_string(&mut fields, "binIdentifier");
        let row_identifier = take_string(&mut fields, "rowIdentifier");
        let orchard_id = take_string(&mut fields, "orchardId");
        let picker_id = take_string(&mut fields, "pickerId");
        let picker_name = take_string(&mut fields, "pickerName");
        let harvest_start_datetime = take_string(&mut fields, "harvestStartDatetime");
        let harvest_end_datetime = take_string(&mut fields, "harvestEndDatetime");
        Self {
            iss,
            sub,
            jti,
            nzbn,
            collection_id,
            bin_identifier,
            row_identifier,
            orchard_id,
            picker_id,
            picker_name,
            harvest_start_datetime,
            harvest_end_datetime,
            extra: fields,
        }
    }
}

/// The `data` object of a verification response, stored as the service sent
/// it. Typed views are read on demand and never fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CredentialData(Map<String, Value>);

impl CredentialData {
    /// The `verified` flag, `None` when absent or not a boolean.
    pub fn verified(&self) -> Option<bool> {
        self.0.get("verified").and_then(Value::as_bool)
    }

    /// Whether the service explicitly refused the credential.
    pub fn is_rejected(&self) -> bool {
        self.0.get("verified") == Some(&Value::Bool(false))
    }

    /// Typed view of the `decoded` object, if there is one.
    pub fn decoded(&self) -> Option<DecodedCredential> {
        self.0
            .get("decoded")?
            .as_object()
            .cloned()
            .map(DecodedCredential::from)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }

    /// Original delivery date the service reports for a rejected credential.
    pub fn delivery_date(&self) -> Option<&str> {
        self.0
            .get("deliveryDate")
            .or_else(|| self.0.get("decoded")?.get("deliveryDate"))
            .and_then(Value::as_str)
    }
}

impl From<Map<String, Value>> for CredentialData {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
