use std::{collections::HashMap, sync::Mutex};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use http::{Request, Response};
use verifiable_credential::core::util::AsyncHttpClient;

/// In-memory stand-in for schema hosts.
///
/// Unknown URLs behave like an unreachable host.
#[derive(Default)]
pub struct MockSchemaServer {
    routes: HashMap<String, (u16, Vec<u8>)>,
    requests: Mutex<Vec<String>>,
}

impl MockSchemaServer {
    pub fn with_route(mut self, uri: &str, status: u16, body: impl Into<Vec<u8>>) -> Self {
        self.routes.insert(uri.to_owned(), (status, body.into()));
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl AsyncHttpClient for MockSchemaServer {
    async fn execute(&self, request: Request<Vec<u8>>) -> Result<Response<Vec<u8>>> {
        let uri = request.uri().to_string();
        self.requests.lock().unwrap().push(uri.clone());

        let Some((status, body)) = self.routes.get(&uri) else {
            bail!("error trying to connect: tcp connect error: Connection refused")
        };

        Response::builder()
            .status(*status)
            .body(body.clone())
            .context("failed to build response")
    }
}
