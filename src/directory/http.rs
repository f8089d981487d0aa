//! HTTP directory client implementation
//!
//! Talks to a Graph-style application-credential API: credentials are listed
//! as `passwordCredentials` on the application object, issued via
//! `addPassword` and retired via `removePassword`. All requests carry a
//! bearer token.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::config::DirectoryConfig;
use crate::errors::{Error, Result};

use super::client::CredentialStore;
use super::types::{CredentialRecord, NewCredentialMaterial, SecretValue};

/// HTTP client for the identity-provider directory API
pub struct HttpDirectoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl std::fmt::Debug for HttpDirectoryClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpDirectoryClient")
            .field("base_url", &self.base_url)
            .field("http", &"[Client]")
            .finish()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationEnvelope {
    #[serde(default)]
    password_credentials: Vec<CredentialRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordCredentialSpec<'a> {
    display_name: &'a str,
    end_date_time: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AddPasswordRequest<'a> {
    password_credential: PasswordCredentialSpec<'a>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddPasswordResponse {
    #[serde(default)]
    key_id: Option<String>,
    #[serde(default)]
    secret_text: Option<String>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    end_date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RemovePasswordRequest<'a> {
    key_id: &'a str,
}

impl HttpDirectoryClient {
    /// Create a new directory client with the given configuration
    pub fn new(config: DirectoryConfig) -> Result<Self> {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", config.bearer_token))
            .map_err(|e| Error::config(format!("Invalid directory bearer token: {}", e)))?;
        bearer.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, bearer);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout())
            .build()
            .map_err(|e| Error::config(format!("Failed to create directory client: {}", e)))?;

        let base_url = config.base_url.trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    /// Create a client from environment configuration
    pub fn from_env() -> Result<Self> {
        Self::new(DirectoryConfig::from_env()?)
    }

    fn application_url(&self, app_id: &str, action: Option<&str>) -> String {
        match action {
            Some(action) => format!("{}/applications/{}/{}", self.base_url, app_id, action),
            None => format!("{}/applications/{}", self.base_url, app_id),
        }
    }
}

#[async_trait]
impl CredentialStore for HttpDirectoryClient {
    async fn list(&self, app_id: &str) -> Result<Vec<CredentialRecord>> {
        debug!(app_id = %app_id, "Listing application credentials");

        let response = self
            .http
            .get(self.application_url(app_id, None))
            .send()
            .await
            .map_err(|e| Error::transport(format!("Directory list request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::not_found("application", app_id));
        }
        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "Directory list request returned HTTP {}",
                response.status()
            )));
        }

        let envelope: ApplicationEnvelope = response.json().await.map_err(|e| {
            Error::transport(format!("Invalid directory list response body: {}", e))
        })?;

        Ok(envelope.password_credentials)
    }

    async fn create(
        &self,
        app_id: &str,
        display_name: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<NewCredentialMaterial> {
        debug!(
            app_id = %app_id,
            display_name = %display_name,
            expires_at = %expires_at,
            "Requesting new application credential"
        );

        let body = AddPasswordRequest {
            password_credential: PasswordCredentialSpec {
                display_name,
                end_date_time: expires_at,
            },
        };

        let response = self
            .http
            .post(self.application_url(app_id, Some("addPassword")))
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::transport(format!("Directory create request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::not_found("application", app_id));
        }
        if !response.status().is_success() {
            error!(
                app_id = %app_id,
                status = %response.status(),
                "Directory refused to create a new credential"
            );
            return Err(Error::issuance(format!(
                "Directory create request returned HTTP {}",
                response.status()
            )));
        }

        let created: AddPasswordResponse = response.json().await.map_err(|e| {
            Error::transport(format!("Invalid directory create response body: {}", e))
        })?;

        let secret_text = match created.secret_text {
            Some(text) if !text.is_empty() => text,
            _ => {
                error!(app_id = %app_id, "No secret text returned from the directory API");
                return Err(Error::issuance("No secret text returned from the directory API"));
            }
        };

        debug!(
            app_id = %app_id,
            key_id = ?created.key_id,
            "New application credential created"
        );

        Ok(NewCredentialMaterial {
            display_name: created.display_name.unwrap_or_else(|| display_name.to_string()),
            expires_at: created.end_date_time.unwrap_or(expires_at),
            secret_value: SecretValue::new(secret_text),
        })
    }

    async fn delete(&self, app_id: &str, key_id: &str) -> Result<()> {
        debug!(app_id = %app_id, key_id = %key_id, "Removing application credential");

        let response = self
            .http
            .post(self.application_url(app_id, Some("removePassword")))
            .json(&RemovePasswordRequest { key_id })
            .send()
            .await
            .map_err(|e| Error::transport(format!("Directory delete request failed: {}", e)))?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::not_found("credential", key_id));
        }
        if !response.status().is_success() {
            return Err(Error::transport(format!(
                "Directory delete request returned HTTP {}",
                response.status()
            )));
        }

        Ok(())
    }
}
