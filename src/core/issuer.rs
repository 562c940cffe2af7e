use serde::{Deserialize, Serialize};
use serde_json::Value as Json;

use super::credential::CredentialError;

/// Issuer of a credential, normalized from either wire shape.
///
/// `name` is empty when the credential carried a bare identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Issuer {
    pub id: String,
    pub name: String,
}

/// The two shapes an `issuer` value takes on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IssuerKind {
    /// `"issuer": "did:example:123"`
    Plain(String),

    /// `"issuer": { "id": "did:example:123", "name": "Example Corp" }`
    Composite(CompositeIssuer),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CompositeIssuer {
    pub id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
}

impl Issuer {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
        }
    }

    pub fn with_name(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Extract the issuer from the top-level `issuer` member of a credential document.
    ///
    /// Only the `issuer` member is looked at, independently of how the rest of the document
    /// parses. The member must be present and its identifier non-empty.
    pub fn decode(document: &[u8]) -> Result<Self, CredentialError> {
        let document: Json =
            serde_json::from_slice(document).map_err(CredentialError::issuer_format)?;
        Self::from_document(&document)
    }

    pub(crate) fn from_document(document: &Json) -> Result<Self, CredentialError> {
        let issuer: Issuer = match document.get("issuer") {
            None | Some(Json::Null) => {
                return Err(CredentialError::issuer_format("issuer is missing"))
            }
            Some(Json::String(id)) => IssuerKind::Plain(id.clone()).into(),
            Some(object @ Json::Object(_)) => IssuerKind::Composite(
                CompositeIssuer::deserialize(object).map_err(CredentialError::issuer_format)?,
            )
            .into(),
            Some(other) => {
                return Err(CredentialError::issuer_format(format!(
                    "expected a string or an object with an id, found {other}"
                )))
            }
        };

        if issuer.id.is_empty() {
            return Err(CredentialError::issuer_format("issuer id is empty"));
        }

        Ok(issuer)
    }

    /// Wire form of the issuer: composite when a name is set, a bare identifier otherwise.
    pub fn encode(&self) -> IssuerKind {
        IssuerKind::from(self)
    }
}

impl From<IssuerKind> for Issuer {
    fn from(value: IssuerKind) -> Self {
        match value {
            IssuerKind::Plain(id) => Issuer::new(id),
            IssuerKind::Composite(CompositeIssuer { id, name }) => Issuer { id, name },
        }
    }
}

impl From<&Issuer> for IssuerKind {
    fn from(value: &Issuer) -> Self {
        if value.name.is_empty() {
            IssuerKind::Plain(value.id.clone())
        } else {
            IssuerKind::Composite(CompositeIssuer {
                id: value.id.clone(),
                name: value.name.clone(),
            })
        }
    }
}
