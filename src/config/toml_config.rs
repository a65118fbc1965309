use crate::utils::error::{LookupError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub project: ProjectConfig,
    pub api: ApiConfig,
    pub credentials: CredentialsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub url: String,
    pub auth_url: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub client_id: String,
    pub client_secret: String,
    pub scopes: Option<Vec<String>>,
}

impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .field("scopes", &self.scopes)
            .finish()
    }
}

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

impl ClientConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| {
            LookupError::ConfigValidationError {
                field: "config_file".to_string(),
                message: format!("cannot read {}: {}", path.as_ref().display(), e),
            }
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| LookupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unknown variables are left as-is
    /// and caught later by validation.
    fn substitute_env_vars(content: &str) -> String {
        env_placeholder()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn project_key(&self) -> &str {
        &self.project.key
    }

    pub fn api_url(&self) -> &str {
        &self.api.url
    }

    pub fn auth_url(&self) -> &str {
        &self.api.auth_url
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    /// Space separated scope list as expected by the token endpoint.
    pub fn scope(&self) -> Option<String> {
        self.credentials
            .scopes
            .as_ref()
            .filter(|scopes| !scopes.is_empty())
            .map(|scopes| scopes.join(" "))
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("project.key", &self.project.key)?;
        validation::validate_url("api.url", &self.api.url)?;
        validation::validate_url("api.auth_url", &self.api.auth_url)?;

        if let Some(timeout) = self.api.timeout_seconds {
            validation::validate_range("api.timeout_seconds", timeout, 1, 300)?;
        }

        validation::validate_non_empty_string("credentials.client_id", &self.credentials.client_id)?;
        validation::validate_resolved("credentials.client_id", &self.credentials.client_id)?;
        validation::validate_non_empty_string(
            "credentials.client_secret",
            &self.credentials.client_secret,
        )?;
        validation::validate_resolved(
            "credentials.client_secret",
            &self.credentials.client_secret,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const BASIC_CONFIG: &str = r#"
[project]
key = "my-project"

[api]
url = "https://api.europe-west1.gcp.commercetools.com"
auth_url = "https://auth.europe-west1.gcp.commercetools.com"

[credentials]
client_id = "client"
client_secret = "secret"
scopes = ["view_shipping_methods:my-project", "view_carts:my-project"]
"#;

    #[test]
    fn test_parse_basic_config() {
        let config = ClientConfig::from_toml_str(BASIC_CONFIG).unwrap();

        assert_eq!(config.project_key(), "my-project");
        assert_eq!(config.api_url(), "https://api.europe-west1.gcp.commercetools.com");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(
            config.scope().as_deref(),
            Some("view_shipping_methods:my-project view_carts:my-project")
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SHIPPING_LOOKUP_TEST_CLIENT_SECRET", "s3cr3t");

        let toml_content = r#"
[project]
key = "my-project"

[api]
url = "https://api.example.com"
auth_url = "https://auth.example.com"
timeout_seconds = 10

[credentials]
client_id = "client"
client_secret = "${SHIPPING_LOOKUP_TEST_CLIENT_SECRET}"
"#;

        let config = ClientConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.credentials.client_secret, "s3cr3t");
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.scope(), None);

        std::env::remove_var("SHIPPING_LOOKUP_TEST_CLIENT_SECRET");
    }

    #[test]
    fn test_unresolved_placeholder_fails_validation() {
        let toml_content = BASIC_CONFIG.replace(
            "client_id = \"client\"",
            "client_id = \"${SHIPPING_LOOKUP_UNSET_VARIABLE}\"",
        );

        let config = ClientConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.credentials.client_id, "${SHIPPING_LOOKUP_UNSET_VARIABLE}");
        assert!(matches!(
            config.validate(),
            Err(LookupError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let bad_url = BASIC_CONFIG.replace(
            "https://api.europe-west1.gcp.commercetools.com",
            "invalid-url",
        );
        let config = ClientConfig::from_toml_str(&bad_url).unwrap();
        assert!(config.validate().is_err());

        let empty_key = BASIC_CONFIG.replace("key = \"my-project\"", "key = \"\"");
        let config = ClientConfig::from_toml_str(&empty_key).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_section_is_parse_error() {
        let result = ClientConfig::from_toml_str("[project]\nkey = \"p\"\n");
        assert!(matches!(
            result,
            Err(LookupError::ConfigValidationError { ref field, .. }) if field == "toml_parsing"
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(BASIC_CONFIG.as_bytes()).unwrap();

        let config = ClientConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.project_key(), "my-project");
    }

    #[test]
    fn test_missing_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        let err = ClientConfig::from_file(&missing).unwrap_err();

        assert!(err.is_config_error());
        assert!(matches!(
            err,
            LookupError::ConfigValidationError { ref field, .. } if field == "config_file"
        ));
        assert_eq!(err.recovery_suggestion(), "Fix the configuration file and try again");
    }

    #[test]
    fn test_debug_hides_client_secret() {
        let config = ClientConfig::from_toml_str(BASIC_CONFIG).unwrap();
        let printed = format!("{:?}", config.credentials);
        assert!(!printed.contains("secret\""));
        assert!(printed.contains("***"));
    }
}
