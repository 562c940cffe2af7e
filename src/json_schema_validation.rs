//! Structural validation of credential documents against a JSON Schema.
//!
//! Schemas are compiled with draft 4 semantics (`required`, `anyOf`, positional `items`
//! with `additionalItems`, `pattern`, local `$ref`s into `definitions`, `format: uri`),
//! which is what the W3C Verifiable Credentials v1 schemas are written against.
//!
//! Validation always runs on the document exactly as received, so unknown members and
//! values the typed model would drop are still checked.

use jsonschema::{Draft, JSONSchema, ValidationError};
use serde_json::Value as Json;
use tracing::debug;

use crate::{core::credential::CredentialError, utils::NonEmptyVec};

/// A compiled credential schema.
pub struct CredentialSchemaValidator(JSONSchema);

impl CredentialSchemaValidator {
    /// Compile a schema document.
    pub fn new(schema: &[u8]) -> Result<Self, CredentialError> {
        let schema: Json = serde_json::from_slice(schema)
            .map_err(|e| CredentialError::InvalidSchema(e.to_string()))?;

        JSONSchema::options()
            .with_draft(Draft::Draft4)
            .compile(&schema)
            .map(Self)
            .map_err(|e| CredentialError::InvalidSchema(e.to_string()))
    }

    /// Validate a parsed document, reporting every violation rather than the first one.
    pub fn validate(&self, document: &Json) -> Result<(), CredentialError> {
        let Err(errors) = self.0.validate(document) else {
            return Ok(());
        };

        let violations: Vec<String> = errors.map(|error| describe(&error)).collect();

        for violation in &violations {
            debug!("credential did not pass schema validation: {violation}");
        }

        match NonEmptyVec::maybe_new(violations) {
            Some(violations) => Err(CredentialError::SchemaValidation { violations }),
            None => Ok(()),
        }
    }
}

/// Validate the raw bytes of a credential document against a schema document.
pub fn validate(document: &[u8], schema: &[u8]) -> Result<(), CredentialError> {
    let document: Json = serde_json::from_slice(document).map_err(CredentialError::Malformed)?;
    CredentialSchemaValidator::new(schema)?.validate(&document)
}

fn describe(error: &ValidationError) -> String {
    let path = error.instance_path.to_string();
    if path.is_empty() {
        format!("(root): {error}")
    } else {
        format!("{path}: {error}")
    }
}
