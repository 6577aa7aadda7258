//! Location data written on orchard NFC tags.
//!
//! A tag carries one or more NDEF text records; the first record whose text
//! is a JSON object with every required key is the tag's data.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TagError;

const REQUIRED_FIELDS: [&str; 5] = ["nzbn", "location_id", "location_name", "bin_id", "row_id"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfcTagData {
    pub nzbn: String,
    pub location_id: String,
    pub location_name: String,
    pub bin_id: String,
    pub row_id: String,
}

impl NfcTagData {
    /// Parse one record's text.
    ///
    /// Each field must be a non-empty string or a non-zero number; numbers
    /// are kept in their JSON text form.
    pub fn parse(text: &str) -> Result<Self, TagError> {
        let value: Value =
            serde_json::from_str(text).map_err(|e| TagError::InvalidJson(e.to_string()))?;
        if !value.is_object() {
            return Err(TagError::InvalidJson("tag record is not a JSON object".into()));
        }

        let [nzbn, location_id, location_name, bin_id, row_id] =
            REQUIRED_FIELDS.map(|field| field_text(&value, field));
        Ok(Self {
            nzbn: nzbn?,
            location_id: location_id?,
            location_name: location_name?,
            bin_id: bin_id?,
            row_id: row_id?,
        })
    }

    /// First record that parses as tag data.
    pub fn from_records<I, S>(records: I) -> Result<Self, TagError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = false;
        for record in records {
            seen = true;
            match Self::parse(record.as_ref()) {
                Ok(data) => return Ok(data),
                Err(e) => tracing::debug!(error = %e, "skipping tag record"),
            }
        }
        if seen {
            Err(TagError::InvalidData)
        } else {
            Err(TagError::Empty)
        }
    }
}

fn field_text(value: &Value, field: &'static str) -> Result<String, TagError> {
    match value.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Ok(s.clone()),
        Some(Value::Number(n)) if n.as_f64() != Some(0.0) => Ok(n.to_string()),
        _ => Err(TagError::MissingField(field)),
    }
}
