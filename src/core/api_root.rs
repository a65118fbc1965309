use crate::config::ClientConfig;
use crate::core::request::{InStoreRequestBuilder, ShippingMethodsRequestBuilder};
use crate::utils::error::{LookupError, Result};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use std::time::Duration;
use url::Url;

const TOKEN_ENDPOINT: &str = "oauth/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
    #[serde(default)]
    scope: Option<String>,
}

/// Authenticated handle scoped to one platform project.
///
/// Built once by the composition root and shared behind an `Arc`; nothing in here
/// changes after construction.
pub struct ApiRoot {
    client: Client,
    base_url: Url,
    project_key: String,
    access_token: String,
}

impl std::fmt::Debug for ApiRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiRoot")
            .field("base_url", &self.base_url.as_str())
            .field("project_key", &self.project_key)
            .finish_non_exhaustive()
    }
}

impl ApiRoot {
    /// Builds a root from an access token obtained elsewhere.
    pub fn new(
        api_url: &str,
        project_key: &str,
        access_token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Self::with_client(client, api_url, project_key, access_token.into())
    }

    fn with_client(
        client: Client,
        api_url: &str,
        project_key: &str,
        access_token: String,
    ) -> Result<Self> {
        let base_url = Url::parse(api_url)?;
        if base_url.cannot_be_a_base() {
            return Err(LookupError::InvalidConfigValueError {
                field: "api.url".to_string(),
                value: api_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            });
        }

        Ok(Self {
            client,
            base_url,
            project_key: project_key.to_string(),
            access_token,
        })
    }

    /// Exchanges the configured client credentials for a token and builds the root.
    pub async fn connect(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        let token = fetch_token(&client, config).await?;

        Self::with_client(
            client,
            config.api_url(),
            config.project_key(),
            token.access_token,
        )
    }

    pub fn project_key(&self) -> &str {
        &self.project_key
    }

    pub fn shipping_methods(&self) -> ShippingMethodsRequestBuilder<'_> {
        ShippingMethodsRequestBuilder::new(self, vec![self.project_key.clone()])
    }

    pub fn in_store_key_with_store_key_value(&self, store_key: &str) -> InStoreRequestBuilder<'_> {
        InStoreRequestBuilder::new(
            self,
            vec![
                self.project_key.clone(),
                "in-store".to_string(),
                format!("key={}", store_key),
            ],
        )
    }

    pub(crate) fn url_for(&self, segments: &[String], query: &[(String, String)]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LookupError::ConfigValidationError {
                field: "api.url".to_string(),
                message: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sends one request. Any non-2xx status is returned as `LookupError::Sdk`.
    pub(crate) async fn send(
        &self,
        method: Method,
        segments: &[String],
        query: &[(String, String)],
    ) -> Result<Response> {
        let url = self.url_for(segments, query)?;
        tracing::debug!("{} {}", method, url);

        let response = self
            .client
            .request(method.clone(), url.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.access_token))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("{} {} -> {}", method, url.path(), status);

        if status.is_success() {
            return Ok(response);
        }

        tracing::warn!("Platform rejected {} {}: HTTP {}", method, url.path(), status);
        Err(sdk_error(response).await)
    }
}

async fn fetch_token(client: &Client, config: &ClientConfig) -> Result<TokenResponse> {
    let mut url = Url::parse(config.auth_url())?;
    url.path_segments_mut()
        .map_err(|_| LookupError::ConfigValidationError {
            field: "api.auth_url".to_string(),
            message: "URL cannot be used as a base".to_string(),
        })?
        .pop_if_empty()
        .extend(TOKEN_ENDPOINT.split('/'));

    let mut form = vec![("grant_type", "client_credentials".to_string())];
    if let Some(scope) = config.scope() {
        form.push(("scope", scope));
    }

    tracing::debug!("Requesting access token from {}", url);
    let response = client
        .post(url)
        .basic_auth(
            &config.credentials.client_id,
            Some(&config.credentials.client_secret),
        )
        .form(&form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = read_error_body(response).await;
        return Err(LookupError::Authentication {
            message: format!("HTTP {} - {}", status.as_u16(), body),
        });
    }

    let token: TokenResponse = response.json().await?;
    tracing::info!(
        "Obtained access token for project '{}' (expires in {:?}s, scope: {})",
        config.project_key(),
        token.expires_in,
        token.scope.as_deref().unwrap_or("-")
    );
    Ok(token)
}

/// Body of a failed response; a body that cannot be read is logged and treated as empty.
async fn read_error_body(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Could not read body of HTTP {} response: {}", status, e);
            String::new()
        }
    }
}

async fn sdk_error(response: Response) -> LookupError {
    let status = response.status();
    let text = read_error_body(response).await;
    let body = serde_json::from_str::<serde_json::Value>(&text).ok();

    let message = body
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(|value| value.as_str())
        .map(str::to_string)
        .or_else(|| (!text.trim().is_empty()).then(|| text.clone()))
        .unwrap_or_else(|| status.canonical_reason().unwrap_or("Unknown").to_string());

    LookupError::Sdk {
        status_code: status.as_u16(),
        message,
        body,
    }
}
