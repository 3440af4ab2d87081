//! src/domain/invitation_request.rs

use crate::domain::{RequiredField, ValidationError};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Raw JSON payload posted by the landing page form.
///
/// Falsy values (`null`, `false`, `0`) count as absent. Other non-string
/// values are kept in their JSON text form.
#[derive(serde::Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct InvitationFormData {
    #[serde(default, deserialize_with = "truthy_text")]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "truthy_text")]
    pub country: Option<String>,
}

fn truthy_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }))
}

impl InvitationFormData {
    /// Read the form out of a parsed JSON body. A body that is not an object
    /// carries none of the fields, a `null` body cannot be read at all.
    pub fn from_payload(payload: Value) -> Result<Self, serde_json::Error> {
        match payload {
            Value::Object(_) => serde_json::from_value(payload),
            Value::Null => Err(serde::de::Error::custom("the request body is `null`")),
            _ => Ok(Self::default()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct InvitationRequest {
    pub full_name: RequiredField,
    pub email: RequiredField,
    pub gender: RequiredField,
    pub country: RequiredField,
}

impl TryFrom<InvitationFormData> for InvitationRequest {
    type Error = ValidationError;

    /// Reports every missing field at once, in payload order.
    fn try_from(value: InvitationFormData) -> Result<Self, Self::Error> {
        let mut missing = Vec::new();
        let mut required = |field: &'static str, value: Option<String>| {
            RequiredField::parse(field, value)
                .map_err(|_| missing.push(field))
                .ok()
        };
        let full_name = required("fullName", value.full_name);
        let email = required("email", value.email);
        let gender = required("gender", value.gender);
        let country = required("country", value.country);

        match (full_name, email, gender, country) {
            (Some(full_name), Some(email), Some(gender), Some(country)) => Ok(Self {
                full_name,
                email,
                gender,
                country,
            }),
            _ => Err(ValidationError::MissingFields(missing)),
        }
    }
}
