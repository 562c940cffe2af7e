use crate::utils::NonEmptyVec;

/// Credential decoding and encoding error.
#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    /// Input is not JSON, or does not fit the credential wire shape.
    #[error("JSON unmarshalling of verifiable credential failed: {0}")]
    Malformed(#[source] serde_json::Error),

    /// The custom credential schema declared by the document could not be downloaded.
    #[error("loading custom credential schema from {uri} failed: {source:#}")]
    SchemaFetch {
        uri: String,
        #[source]
        source: anyhow::Error,
    },

    /// The resolved schema is not a usable JSON Schema document.
    #[error("credential schema is not a valid JSON Schema: {0}")]
    InvalidSchema(String),

    /// The document does not conform to the resolved schema.
    #[error("verifiable credential is not valid:\n{}", describe_violations(.violations))]
    SchemaValidation { violations: NonEmptyVec<String> },

    /// The `issuer` field matches neither the bare string nor the composite shape.
    #[error("issuer is not valid: {0}")]
    IssuerFormat(String),

    /// Serialization of the credential failed.
    #[error("JSON marshalling of verifiable credential failed: {0}")]
    Encode(#[source] serde_json::Error),
}

impl CredentialError {
    pub fn issuer_format(e: impl ToString) -> Self {
        Self::IssuerFormat(e.to_string())
    }

    /// Violations reported by schema validation, if this is a validation error.
    pub fn violations(&self) -> Option<&[String]> {
        match self {
            Self::SchemaValidation { violations } => Some(&**violations),
            _ => None,
        }
    }
}

fn describe_violations(violations: &[String]) -> String {
    violations
        .iter()
        .map(|v| format!("- {v}\n"))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validation_error_lists_every_violation() {
        let violations = NonEmptyVec::maybe_new(vec![
            "(root): \"type\" is a required property".to_owned(),
            "/issuanceDate: \"2020-01-01\" does not match pattern".to_owned(),
        ])
        .unwrap();
        let e = CredentialError::SchemaValidation { violations };

        assert_eq!(
            e.to_string(),
            "verifiable credential is not valid:\n\
             - (root): \"type\" is a required property\n\
             - /issuanceDate: \"2020-01-01\" does not match pattern\n"
        );
        assert_eq!(e.violations().map(<[String]>::len), Some(2));
    }

    #[test]
    fn fetch_error_keeps_cause() {
        let e = CredentialError::SchemaFetch {
            uri: "https://example.com/schema.json".to_owned(),
            source: anyhow::anyhow!("connection refused"),
        };

        assert!(e.to_string().contains("https://example.com/schema.json"));
        assert!(e.to_string().contains("connection refused"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
