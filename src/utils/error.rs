use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("{message}")]
    ObjectNotFound { key: String, message: String },

    /// Reserved for callers that validate request parameters before they reach the platform.
    #[error("Request parameter malformed: {message}")]
    RequestParamMalformed { message: String },

    #[error("Platform returned HTTP {status_code}: {message}")]
    Sdk {
        status_code: u16,
        message: String,
        body: Option<serde_json::Value>,
    },

    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl LookupError {
    pub fn not_found(key: &str) -> Self {
        LookupError::ObjectNotFound {
            key: key.to_string(),
            message: format!("Shipping method with key '{}' does not exist", key),
        }
    }

    /// True for errors produced from a non-2xx platform response.
    pub fn is_sdk_error(&self) -> bool {
        matches!(self, LookupError::Sdk { .. })
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            LookupError::Sdk { status_code, .. } => Some(*status_code),
            LookupError::ApiError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            LookupError::ConfigValidationError { .. }
                | LookupError::InvalidConfigValueError { .. }
        )
    }

    /// CLI exit status: 4 not found, 1 configuration, 2 everything else.
    pub fn exit_code(&self) -> i32 {
        match self {
            LookupError::ObjectNotFound { .. } => 4,
            e if e.is_config_error() => 1,
            _ => 2,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            LookupError::ObjectNotFound { message, .. } => message.clone(),
            LookupError::Sdk {
                status_code,
                message,
                ..
            } => format!("The commerce platform rejected the request ({}): {}", status_code, message),
            LookupError::Authentication { .. } => {
                "Could not obtain an access token for the project".to_string()
            }
            LookupError::ApiError(_) => "Could not reach the commerce platform".to_string(),
            e if e.is_config_error() => format!("Configuration problem: {}", e),
            e => e.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            LookupError::ObjectNotFound { .. } => "Check the shipping method key and project",
            LookupError::Sdk { status_code: 401, .. } | LookupError::Authentication { .. } => {
                "Check the client credentials and scopes"
            }
            LookupError::Sdk { status_code: 403, .. } => {
                "Grant the API client the view_shipping_methods scope"
            }
            LookupError::Sdk { .. } => "Inspect the platform error message and request arguments",
            LookupError::ApiError(_) => "Check network connectivity and the api.url setting",
            e if e.is_config_error() => "Fix the configuration file and try again",
            _ => "Re-run with --verbose for more detail",
        }
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
