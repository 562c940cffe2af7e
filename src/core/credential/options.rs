use std::{fmt, sync::Arc};

use crate::core::util::AsyncHttpClient;

/// Options for [Credential::decode](super::Credential::decode).
///
/// ```ignore
/// let options = CredentialOptions::default()
///     .with_schema_download_client(Arc::new(ReqwestClient::new()?))
///     .with_disabled_custom_schema_check();
/// ```
#[derive(Clone, Default)]
pub struct CredentialOptions {
    schema_download_client: Option<Arc<dyn AsyncHttpClient + Send + Sync>>,
    disabled_custom_schema: bool,
}

impl CredentialOptions {
    /// HTTP client used to download a custom `credentialSchema`.
    ///
    /// Without one, a [ReqwestClient](crate::core::util::ReqwestClient) with no timeouts is
    /// built when a download is needed.
    pub fn with_schema_download_client(
        mut self,
        client: Arc<dyn AsyncHttpClient + Send + Sync>,
    ) -> Self {
        self.schema_download_client = Some(client);
        self
    }

    /// Ignore any `credentialSchema` declared by the credential and always validate against
    /// the default schema.
    pub fn with_disabled_custom_schema_check(mut self) -> Self {
        self.disabled_custom_schema = true;
        self
    }

    pub fn schema_download_client(&self) -> Option<&(dyn AsyncHttpClient + Send + Sync)> {
        self.schema_download_client.as_deref()
    }

    pub fn custom_schema_disabled(&self) -> bool {
        self.disabled_custom_schema
    }
}

impl fmt::Debug for CredentialOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialOptions")
            .field(
                "schema_download_client",
                &self.schema_download_client.as_ref().map(|_| ".."),
            )
            .field("disabled_custom_schema", &self.disabled_custom_schema)
            .finish()
    }
}
