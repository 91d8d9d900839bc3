use crate::config::Settings;
use crate::error::{auth_error, config_error, other_error, remote_error, DayResult, Error};
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use url::Url;

/// Access tokens this close to expiry are refreshed instead of reused
const EXPIRY_MARGIN_SECS: i64 = 60;

/// Response of the OAuth token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_in: Option<i64>,
    /// Only present on the authorization-code grant
    pub refresh_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: i64,
    client_id: String,
    refresh_token: String,
}

/// Exchanges the refresh token for short-lived access tokens
#[derive(Clone)]
pub struct TokenManager {
    client: Client,
    token_url: String,
    cached: Arc<Mutex<Option<CachedToken>>>,
}

impl TokenManager {
    pub fn new(client: Client, token_url: impl Into<String>) -> Self {
        Self {
            client,
            token_url: token_url.into(),
            cached: Arc::new(Mutex::new(None)),
        }
    }

    /// Get an access token for the credentials in `settings`
    pub async fn access_token(&self, settings: &Settings) -> DayResult<String> {
        if !settings.has_credentials() {
            return Err(config_error(&t!("notice_credentials_missing")));
        }

        let mut cached = self.cached.lock().await;
        if let Some(token) = cached.as_ref() {
            let same_credentials =
                token.client_id == settings.client_id && token.refresh_token == settings.refresh_token;
            if same_credentials && token.expires_at - EXPIRY_MARGIN_SECS > Utc::now().timestamp() {
                return Ok(token.access_token.clone());
            }
        }

        let response = self
            .request_token(&[
                ("client_id", settings.client_id.as_str()),
                ("client_secret", settings.client_secret.as_str()),
                ("refresh_token", settings.refresh_token.as_str()),
                ("grant_type", "refresh_token"),
            ])
            .await?;

        let expires_at = Utc::now().timestamp() + response.expires_in.unwrap_or(3600);
        info!("Obtained access token, valid until {}", expires_at);

        *cached = Some(CachedToken {
            access_token: response.access_token.clone(),
            expires_at,
            client_id: settings.client_id.clone(),
            refresh_token: settings.refresh_token.clone(),
        });

        Ok(response.access_token)
    }

    /// Drop the cached access token
    pub async fn invalidate(&self) {
        *self.cached.lock().await = None;
    }

    /// Exchange an authorization code for tokens
    pub async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
        redirect_uri: &str,
    ) -> DayResult<TokenResponse> {
        self.request_token(&[
            ("client_id", client_id),
            ("client_secret", client_secret),
            ("code", code),
            ("redirect_uri", redirect_uri),
            ("grant_type", "authorization_code"),
        ])
        .await
    }

    async fn request_token(&self, params: &[(&str, &str)]) -> DayResult<TokenResponse> {
        debug!("Requesting token from {}", self.token_url);

        let response = self
            .client
            .post(&self.token_url)
            .form(params)
            .send()
            .await
            .map_err(|e| remote_error(&format!("Failed to request token: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(token_failure(status, &error_body));
        }

        response
            .json::<TokenResponse>()
            .await
            .map_err(|e| remote_error(&format!("Failed to parse token response: {}", e)))
    }
}

/// Read-only access is all the day view needs
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.readonly";

/// Consent page URL for the authorization-code flow
pub fn authorization_url(
    auth_url: &str,
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> DayResult<Url> {
    let mut url = Url::parse(auth_url)
        .map_err(|e| config_error(&format!("Invalid authorization URL: {}", e)))?;
    url.query_pairs_mut()
        .append_pair("client_id", client_id)
        .append_pair("redirect_uri", redirect_uri)
        .append_pair("response_type", "code")
        .append_pair("access_type", "offline")
        .append_pair("prompt", "consent")
        .append_pair("scope", CALENDAR_SCOPE)
        .append_pair("state", state);
    Ok(url)
}

/// Pull the authorization code out of the redirect request path
pub fn parse_callback(request_path: &str, expected_state: &str) -> DayResult<String> {
    let url = Url::parse(&format!("http://localhost{}", request_path))
        .map_err(|e| other_error(&format!("Invalid callback URL: {}", e)))?;
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    if let Some(error) = params.get("error") {
        return Err(auth_error(&format!("Authorization was denied: {}", error)));
    }
    if params.get("state").map(String::as_str) != Some(expected_state) {
        return Err(auth_error("Authorization state does not match"));
    }
    params
        .get("code")
        .cloned()
        .ok_or_else(|| other_error("No authorization code found in callback"))
}

/// `invalid_grant` means the refresh token is bad or expired; anything else is a remote failure
fn token_failure(status: StatusCode, body: &str) -> Error {
    if let Ok(parsed) = serde_json::from_str::<TokenErrorBody>(body) {
        if parsed.error.as_deref() == Some("invalid_grant") {
            let description = parsed
                .error_description
                .unwrap_or_else(|| "invalid_grant".to_string());
            return auth_error(&description);
        }
    }

    remote_error(&format!("Failed to refresh token: HTTP {} - {}", status, body))
}
