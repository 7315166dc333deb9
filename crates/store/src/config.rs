//! Connection settings for the document store.

use secrecy::SecretString;

/// Document store connection configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct StoreConfig {
    /// Base URL of the store API (e.g. `https://store.example.com`).
    pub api_url: String,
    /// Project/tenant identifier sent with every request.
    pub project: String,
    /// API key used as a bearer token.
    pub api_key: SecretString,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("api_url", &self.api_url)
            .field("project", &self.project)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_api_key() {
        let config = StoreConfig {
            api_url: "https://store.example.com".to_string(),
            project: "monngon-prod".to_string(),
            api_key: SecretString::from("super_secret_key_value"),
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("monngon-prod"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_key_value"));
    }
}
