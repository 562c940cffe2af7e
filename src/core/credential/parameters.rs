use serde::{Deserialize, Serialize};

use crate::core::schema::CredentialSchemaType;

/// An `{ id, type }` pair, the shape shared by `credentialStatus`, `credentialSchema`
/// and `refreshService`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct TypedId {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
}

impl TypedId {
    pub fn new(id: impl Into<String>, type_: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            type_: type_.into(),
        }
    }

    /// Interprets the type tag as a credential schema type.
    pub fn schema_type(&self) -> CredentialSchemaType {
        CredentialSchemaType::from(self.type_.as_str())
    }
}

/// Status information of the credential, such as a revocation list entry.
pub type CredentialStatus = TypedId;

/// Reference to a data schema enforcing a specific credential structure.
pub type CredentialSchema = TypedId;

/// Service through which an expired credential can be refreshed.
pub type RefreshService = TypedId;

/// Embedded proof of the credential.
///
/// Only the proof type is retained, proof verification happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Proof {
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub type_: String,
}

/// Serde helper for optional RFC 3339 timestamps.
///
/// Any offset is accepted on input and normalized to UTC. Output always carries a `Z`
/// suffix and only as many fractional digits as the instant needs.
pub(crate) mod timestamp {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(t) => serializer.serialize_str(&t.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|s| {
                DateTime::parse_from_rfc3339(&s)
                    .map(|t| t.with_timezone(&Utc))
                    .map_err(|e| D::Error::custom(format!("invalid timestamp '{s}': {e}")))
            })
            .transpose()
    }
}
