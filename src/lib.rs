//! This library decodes, validates and encodes [W3C Verifiable Credentials] (data model v1)
//! in their JSON form.
//!
//! [W3C Verifiable Credentials]: <https://www.w3.org/TR/vc-data-model/>
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use verifiable_credential::core::{
//!     credential::{Credential, CredentialOptions},
//!     util::ReqwestClient,
//! };
//!
//! let options = CredentialOptions::default()
//!     .with_schema_download_client(Arc::new(ReqwestClient::new()?));
//!
//! let credential = Credential::decode(&bytes, &options).await?;
//! println!("issued by {}", credential.issuer.id);
//!
//! let bytes = credential.encode()?;
//! ```
//!
//! # Decoding
//!
//! [`Credential::decode`] maps the JSON document onto the [`Credential`] type and checks it:
//!
//! 1. *Schema resolution*: the document is validated against the bundled schema of the
//!    data model, or against the schema named by its `credentialSchema` when that has the
//!    type `JsonSchemaValidator2018`. Custom schemas are downloaded through an
//!    [`AsyncHttpClient`], which can be swapped out or disabled with [`CredentialOptions`].
//!    Other `credentialSchema` types are logged and ignored.
//! 2. *Schema validation*: the bytes as received are checked against the schema, and all
//!    violations are reported together (see [`json_schema_validation`]).
//! 3. *Issuer normalization*: `issuer` may be a bare identifier or an object with `id` and
//!    `name`; both become an [`Issuer`].
//!
//! Proofs are not verified, and only the proof type is retained.
//!
//! [`Credential::decode`]: crate::core::credential::Credential::decode
//! [`Credential`]: crate::core::credential::Credential
//! [`AsyncHttpClient`]: crate::core::util::AsyncHttpClient
//! [`CredentialOptions`]: crate::core::credential::CredentialOptions
//! [`Issuer`]: crate::core::issuer::Issuer
//!
//! # Encoding
//!
//! [`Credential::encode`] writes the credential back to JSON, omitting absent members and
//! writing the issuer as a bare identifier unless it has a name. Encoding does not validate.
//!
//! [`Credential::encode`]: crate::core::credential::Credential::encode

pub mod core;
pub mod json_schema_validation;
pub mod utils;
