//! CLI command implementations.

pub mod admin;
pub mod seed;

use secrecy::SecretString;
use thiserror::Error;

use monngon_store::{StoreClient, StoreConfig};

/// Required environment variable is missing.
#[derive(Debug, Error)]
#[error("Missing environment variable: {0}")]
pub struct MissingEnvVar(pub &'static str);

/// Build a document store client from `STORE_*` environment variables.
pub(crate) fn store_client_from_env() -> Result<StoreClient, MissingEnvVar> {
    let api_url = std::env::var("STORE_API_URL").map_err(|_| MissingEnvVar("STORE_API_URL"))?;
    let project = std::env::var("STORE_PROJECT").map_err(|_| MissingEnvVar("STORE_PROJECT"))?;
    let api_key = std::env::var("STORE_API_KEY")
        .map(SecretString::from)
        .map_err(|_| MissingEnvVar("STORE_API_KEY"))?;

    Ok(StoreClient::new(&StoreConfig {
        api_url,
        project,
        api_key,
    }))
}
