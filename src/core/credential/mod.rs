//! The [Credential] entity and its JSON wire form.
//!
//! Decoding runs four steps over the document as received:
//!
//! 1. the bytes are parsed as a JSON object, without semantic checks;
//! 2. the schema is resolved (see [resolve_schema]) and the untouched document is validated
//!    against it, so type mismatches surface as schema violations;
//! 3. the issuer is normalized from the `issuer` member (see [Issuer::decode]);
//! 4. the document is mapped onto the raw wire shape and the [Credential] is assembled.
//!
//! Encoding is the inverse assembly and never re-validates.

pub mod error;
pub mod options;
pub mod parameters;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

pub use error::CredentialError;
pub use options::CredentialOptions;
pub use parameters::{CredentialSchema, CredentialStatus, Proof, RefreshService, TypedId};

use tracing::debug;

use crate::{core::issuer::Issuer, json_schema_validation::CredentialSchemaValidator};

use super::schema::resolve_schema;
use parameters::timestamp;

/// A W3C Verifiable Credential.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Credential {
    pub context: Vec<String>,
    pub id: Option<String>,
    pub type_: Vec<String>,
    /// `credentialSubject`, passed through without interpretation.
    pub subject: Option<Json>,
    pub issuer: Issuer,
    pub issued: Option<DateTime<Utc>>,
    pub expired: Option<DateTime<Utc>>,
    pub proof: Option<Proof>,
    pub status: Option<CredentialStatus>,
    pub schema: Option<CredentialSchema>,
    pub refresh_service: Option<RefreshService>,
}

/// Direct field mapping of the credential JSON.
///
/// `issuer` is kept as raw JSON here, it is normalized separately.
#[derive(Debug, Default, Deserialize, Serialize)]
struct RawCredential {
    #[serde(rename = "@context", default, skip_serializing_if = "Vec::is_empty")]
    context: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Vec::is_empty")]
    type_: Vec<String>,
    #[serde(
        rename = "credentialSubject",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    subject: Option<Json>,
    #[serde(
        rename = "issuanceDate",
        with = "timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    issued: Option<DateTime<Utc>>,
    #[serde(
        rename = "expirationDate",
        with = "timestamp",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    expired: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    proof: Option<Proof>,
    #[serde(
        rename = "credentialStatus",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    status: Option<CredentialStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    issuer: Option<Json>,
    #[serde(
        rename = "credentialSchema",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    schema: Option<CredentialSchema>,
    #[serde(
        rename = "refreshService",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    refresh_service: Option<RefreshService>,
}

impl Credential {
    /// Decode and validate a credential from its JSON bytes.
    ///
    /// Downloads the declared `credentialSchema` when it is a `JsonSchemaValidator2018` and
    /// custom schemas are not disabled in `options`.
    pub async fn decode(
        data: &[u8],
        options: &CredentialOptions,
    ) -> Result<Self, CredentialError> {
        let document: Json = serde_json::from_slice(data).map_err(CredentialError::Malformed)?;
        if !document.is_object() {
            return Err(CredentialError::Malformed(serde::de::Error::custom(
                "verifiable credential is not a JSON object",
            )));
        }

        // A malformed reference is reported by the default schema, not here.
        let declared_schema = document
            .get("credentialSchema")
            .and_then(|schema| CredentialSchema::deserialize(schema).ok());

        let schema = resolve_schema(declared_schema.as_ref(), options).await?;
        CredentialSchemaValidator::new(schema.as_bytes())?
            .validate(&document)
            .inspect_err(|_| debug!("credential rejected by {schema}"))?;

        let issuer = Issuer::from_document(&document)?;

        let raw: RawCredential =
            serde_json::from_value(document).map_err(CredentialError::Malformed)?;

        Ok(raw.into_credential(issuer))
    }

    /// Serialize the credential to JSON bytes, omitting absent optional members.
    pub fn encode(&self) -> Result<Vec<u8>, CredentialError> {
        let issuer = serde_json::to_value(self.issuer.encode()).map_err(CredentialError::Encode)?;

        let raw = RawCredential {
            context: self.context.clone(),
            id: self.id.clone(),
            type_: self.type_.clone(),
            subject: self.subject.clone(),
            issued: self.issued,
            expired: self.expired,
            proof: self.proof.clone(),
            status: self.status.clone(),
            issuer: Some(issuer),
            schema: self.schema.clone(),
            refresh_service: self.refresh_service.clone(),
        };

        serde_json::to_vec(&raw).map_err(CredentialError::Encode)
    }

    /// Same as [Credential::encode].
    pub fn to_json_bytes(&self) -> Result<Vec<u8>, CredentialError> {
        self.encode()
    }

    /// Whether the credential has an expiration date strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expired.is_some_and(|expired| expired < now)
    }
}

impl RawCredential {
    fn into_credential(self, issuer: Issuer) -> Credential {
        Credential {
            context: self.context,
            id: self.id,
            type_: self.type_,
            subject: self.subject,
            issuer,
            issued: self.issued,
            expired: self.expired,
            proof: self.proof,
            status: self.status,
            schema: self.schema,
            refresh_service: self.refresh_service,
        }
    }
}
