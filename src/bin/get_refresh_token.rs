use dayglance::components::google_calendar::token::{authorization_url, parse_callback, TokenManager};
use dayglance::config::Config;
use dayglance::error::{auth_error, config_error, other_error};
use std::path::PathBuf;

/// Must match a redirect URI registered for the OAuth client
const REDIRECT_URI: &str = "http://localhost:8080";
const LISTEN_ADDRESS: &str = "127.0.0.1:8080";

#[tokio::main]
async fn main() -> miette::Result<()> {
    // Load configuration; an optional argument names the settings file
    let mut config = Config::load(std::env::args().nth(1).map(PathBuf::from))?;

    let client_id = config.settings.client_id.clone();
    let client_secret = config.settings.client_secret.clone();
    if client_id.is_empty() || client_secret.is_empty() {
        return Err(config_error("Set the client ID and client secret before requesting a refresh token").into());
    }

    // Generate random state for security
    let state = uuid::Uuid::new_v4().to_string();
    let auth_url = authorization_url(&config.endpoints.auth_url, &client_id, REDIRECT_URI, &state)?;

    // Open browser for authorization
    println!("Opening browser for Google Calendar authorization...");
    if webbrowser::open(auth_url.as_str()).is_err() {
        println!("Could not open a browser. Visit this URL instead:\n{}", auth_url);
    }

    // Start local server to receive the callback
    let server = tiny_http::Server::http(LISTEN_ADDRESS)
        .map_err(|e| other_error(&format!("Failed to start callback server: {}", e)))?;
    println!("Waiting for authorization callback on {}...", LISTEN_ADDRESS);

    let request = server
        .recv()
        .map_err(|e| other_error(&format!("Failed to receive callback: {}", e)))?;
    let code = parse_callback(request.url(), &state)?;

    // Exchange code for tokens
    let token_manager = TokenManager::new(reqwest::Client::new(), config.endpoints.token_url.clone());
    let tokens = token_manager
        .exchange_code(&client_id, &client_secret, &code, REDIRECT_URI)
        .await?;
    let refresh_token = tokens
        .refresh_token
        .ok_or_else(|| auth_error("Token response did not include a refresh token"))?;

    config.settings.set_refresh_token(&refresh_token);
    config.save_settings()?;

    // Send success response to browser
    let response = tiny_http::Response::from_string("Authorization successful! You can close this window.");
    request
        .respond(response)
        .map_err(|e| other_error(&format!("Failed to answer the browser: {}", e)))?;

    println!("Refresh token saved to {}", config.settings_path.display());

    Ok(())
}
