//! Selection of the JSON Schema a credential is validated against.
//!
//! Credentials are checked against the bundled [DEFAULT_SCHEMA] unless they declare a
//! `credentialSchema` of type [JSON_SCHEMA_VALIDATOR_2018], in which case the schema is
//! downloaded from the URL in its `id`.

use std::fmt;

use anyhow::{bail, Context, Result};
use http::StatusCode;
use tracing::{debug, warn};
use url::Url;

use crate::core::{
    credential::{options::CredentialOptions, parameters::CredentialSchema, CredentialError},
    util::{base_request, AsyncHttpClient, ReqwestClient},
};

/// JSON Schema (draft 4) of the W3C Verifiable Credentials data model v1.
pub const DEFAULT_SCHEMA: &str = include_str!("credential.schema.json");

/// `credentialSchema` type for which the schema is downloaded and used for validation.
pub const JSON_SCHEMA_VALIDATOR_2018: &str = "JsonSchemaValidator2018";

/// Type tag of a `credentialSchema` reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSchemaType {
    JsonSchemaValidator2018,
    Unsupported(String),
}

impl From<&str> for CredentialSchemaType {
    fn from(s: &str) -> Self {
        match s {
            JSON_SCHEMA_VALIDATOR_2018 => Self::JsonSchemaValidator2018,
            other => Self::Unsupported(other.to_owned()),
        }
    }
}

impl fmt::Display for CredentialSchemaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::JsonSchemaValidator2018 => f.write_str(JSON_SCHEMA_VALIDATOR_2018),
            Self::Unsupported(s) => f.write_str(s),
        }
    }
}

/// The schema document chosen for a credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedSchema {
    Default,
    Custom { uri: Url, document: Vec<u8> },
}

impl ResolvedSchema {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Default => DEFAULT_SCHEMA.as_bytes(),
            Self::Custom { document, .. } => document,
        }
    }

    pub fn is_default(&self) -> bool {
        matches!(self, Self::Default)
    }
}

impl fmt::Display for ResolvedSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default credential schema"),
            Self::Custom { uri, .. } => write!(f, "credential schema {uri}"),
        }
    }
}

/// Resolve the schema to validate a credential against.
///
/// A declared schema of an unsupported type is not an error: a warning is logged and the
/// default schema is used. A [JSON_SCHEMA_VALIDATOR_2018] schema that cannot be downloaded
/// fails with [CredentialError::SchemaFetch].
pub async fn resolve_schema(
    schema: Option<&CredentialSchema>,
    options: &CredentialOptions,
) -> Result<ResolvedSchema, CredentialError> {
    let Some(schema) = schema else {
        return Ok(ResolvedSchema::Default);
    };

    if options.custom_schema_disabled() {
        debug!(
            "custom credential schema {} ignored, using default schema",
            schema.id
        );
        return Ok(ResolvedSchema::Default);
    }

    match schema.schema_type() {
        CredentialSchemaType::JsonSchemaValidator2018 => {
            let fetch_error = |source| CredentialError::SchemaFetch {
                uri: schema.id.clone(),
                source,
            };

            let default_client;
            let client: &(dyn AsyncHttpClient + Send + Sync) =
                match options.schema_download_client() {
                    Some(client) => client,
                    None => {
                        default_client = ReqwestClient::new().map_err(fetch_error)?;
                        &default_client
                    }
                };

            // TODO: cache downloaded schemas by URL, every decode currently refetches.
            let (uri, document) = download_schema(client, &schema.id)
                .await
                .map_err(fetch_error)?;

            Ok(ResolvedSchema::Custom { uri, document })
        }
        CredentialSchemaType::Unsupported(type_) => {
            warn!("unsupported credential schema: {type_}. Using default schema for validation");
            Ok(ResolvedSchema::Default)
        }
    }
}

async fn download_schema(
    client: &(dyn AsyncHttpClient + Send + Sync),
    uri: &str,
) -> Result<(Url, Vec<u8>)> {
    let url = Url::parse(uri).context("credential schema id is not a valid URL")?;

    debug!("downloading credential schema from {url}");

    let request = base_request()
        .method("GET")
        .uri(url.as_str())
        .body(vec![])
        .context("failed to build credential schema request")?;

    let response = client
        .execute(request)
        .await
        .context(format!("failed to make credential schema request at {url}"))?;

    let status = response.status();
    if status != StatusCode::OK {
        bail!("credential schema endpoint HTTP failure (status: {status})")
    }

    Ok((url, response.into_body()))
}

#[cfg(test)]
mod test {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use async_trait::async_trait;
    use http::{Request, Response};

    use super::*;

    #[derive(Default)]
    struct CountingClient {
        status: u16,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AsyncHttpClient for CountingClient {
        async fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            assert_eq!(request.method(), &http::Method::GET);
            Response::builder()
                .status(self.status)
                .body(br#"{"required": ["name"]}"#.to_vec())
                .context("failed to build response")
        }
    }

    fn client(status: u16) -> Arc<CountingClient> {
        Arc::new(CountingClient {
            status,
            ..Default::default()
        })
    }

    #[test]
    fn default_schema_is_json() {
        let schema: serde_json::Value = serde_json::from_str(DEFAULT_SCHEMA).unwrap();
        assert!(schema["required"].is_array());
        assert_eq!(ResolvedSchema::Default.as_bytes(), DEFAULT_SCHEMA.as_bytes());
        assert_eq!(ResolvedSchema::Default.to_string(), "default credential schema");
    }

    #[test]
    fn schema_type_from_tag() {
        assert_eq!(
            CredentialSchemaType::from("JsonSchemaValidator2018"),
            CredentialSchemaType::JsonSchemaValidator2018
        );
        assert_eq!(
            CredentialSchemaType::from("SomeOtherType").to_string(),
            "SomeOtherType"
        );
    }

    #[tokio::test]
    async fn no_reference_uses_default() {
        let resolved = resolve_schema(None, &CredentialOptions::default())
            .await
            .unwrap();
        assert!(resolved.is_default());
    }

    #[tokio::test]
    async fn downloads_json_schema_validator_2018() {
        let server = client(200);
        let options = CredentialOptions::default().with_schema_download_client(server.clone());
        let reference =
            CredentialSchema::new("https://example.org/schema.json", JSON_SCHEMA_VALIDATOR_2018);

        let resolved = resolve_schema(Some(&reference), &options).await.unwrap();

        assert_eq!(server.calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolved.as_bytes(), br#"{"required": ["name"]}"#);
        assert_eq!(
            resolved.to_string(),
            "credential schema https://example.org/schema.json"
        );
    }

    #[tokio::test]
    async fn non_200_is_fetch_error() {
        let options = CredentialOptions::default().with_schema_download_client(client(404));
        let reference =
            CredentialSchema::new("https://example.org/schema.json", JSON_SCHEMA_VALIDATOR_2018);

        let err = resolve_schema(Some(&reference), &options)
            .await
            .unwrap_err();

        assert!(matches!(err, CredentialError::SchemaFetch { .. }));
        assert!(err.to_string().contains("404"));
    }

    #[tokio::test]
    async fn invalid_url_is_fetch_error() {
        let server = client(200);
        let options = CredentialOptions::default().with_schema_download_client(server.clone());
        let reference = CredentialSchema::new("not a url", JSON_SCHEMA_VALIDATOR_2018);

        let err = resolve_schema(Some(&reference), &options)
            .await
            .unwrap_err();

        assert!(matches!(err, CredentialError::SchemaFetch { .. }));
        assert_eq!(server.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn unsupported_type_falls_back() {
        let server = client(200);
        let options = CredentialOptions::default().with_schema_download_client(server.clone());
        let reference = CredentialSchema::new("https://example.org/schema.json", "SomeOtherType");

        let resolved = resolve_schema(Some(&reference), &options).await.unwrap();

        assert!(resolved.is_default());
        assert_eq!(server.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn disabled_custom_schema_never_downloads() {
        let server = client(200);
        let options = CredentialOptions::default()
            .with_schema_download_client(server.clone())
            .with_disabled_custom_schema_check();
        let reference =
            CredentialSchema::new("https://example.org/schema.json", JSON_SCHEMA_VALIDATOR_2018);

        let resolved = resolve_schema(Some(&reference), &options).await.unwrap();

        assert!(resolved.is_default());
        assert_eq!(server.calls.load(Ordering::SeqCst), 0);
    }
}
