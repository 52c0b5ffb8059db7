use std::{sync::Arc, time::Duration};

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::{
    config, error,
    management::TokenManager,
    server::start_api_server,
    success,
    types::{AuthAttempt, Token},
    utils, warning,
};

/// Runs the complete OAuth 2.0 authorization-code flow with Spotify.
///
/// This function orchestrates the entire authentication process:
/// 1. Generating a random `state` token for CSRF protection
/// 2. Starting a local callback server on the redirect URI's host:port
/// 3. Opening the authorization URL in the user's browser
/// 4. Waiting for the OAuth callback to exchange the code
/// 5. Persisting the obtained token for future use
///
/// The requested scope is `playlist-modify-private playlist-modify-public`,
/// the minimum needed to create and fill playlists for the current user.
///
/// # Arguments
///
/// * `shared_state` - Thread-safe shared state carrying the `state` token
///   and, once the callback handler completed the exchange, the token
///
/// # Error Handling
///
/// - Browser launch failures result in a warning with manual URL instructions
/// - Token persistence failures terminate the program with an error
/// - Authentication timeouts or failures terminate with an error message
pub async fn auth(shared_state: Arc<Mutex<Option<AuthAttempt>>>) {
    let state_token = utils::generate_state_token();

    // start callback server
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        start_api_server(server_state).await;
    });

    // Construct the authorization URL
    let auth_url = format!(
        "{spotify_auth_url}?client_id={client_id}&response_type=code&redirect_uri={redirect_uri}&state={state}&scope={scope}",
        spotify_auth_url = config::SPOTIFY_AUTH_URL,
        client_id = &config::spotify_client_id(),
        redirect_uri = &config::spotify_redirect_uri(),
        state = state_token,
        scope = config::SPOTIFY_SCOPE.replace(' ', "%20")
    );

    // Store the state token before the redirect happens
    {
        let mut lock = shared_state.lock().await;
        *lock = Some(AuthAttempt {
            state: state_token,
            token: None,
        });
    }

    // Open the authorization URL in the default browser
    if webbrowser::open(&auth_url).is_err() {
        warning!(
            "Failed to open browser. Please navigate to the following URL manually:\n{}",
            auth_url
        )
    }

    // wait for callback to be hit
    let token = wait_for_token(shared_state).await;

    match token {
        Some(t) => {
            let token_manager = TokenManager::new(t.clone());
            if let Err(e) = token_manager.persist().await {
                error!("Failed to save token to cache: {}", e);
            }

            success!("Authentication successful!");
        }
        None => {
            error!("Authentication failed or timed out.");
        }
    }
}

/// Waits for the OAuth callback to complete and return a token.
///
/// Polls the shared state once per second for up to 60 seconds while the
/// callback handler runs concurrently. Returns `None` when the timeout is
/// reached without a completed exchange.
async fn wait_for_token(shared_state: Arc<Mutex<Option<AuthAttempt>>>) -> Option<Token> {
    use std::time::Instant;

    let max_wait = Duration::from_secs(60);
    let start = Instant::now();

    while start.elapsed() < max_wait {
        let lock = shared_state.lock().await;
        if let Some(attempt) = lock.as_ref() {
            if let Some(token) = &attempt.token {
                return Some(token.clone());
            }
        }
        drop(lock);
        tokio::time::sleep(Duration::from_secs(1)).await;
    }

    None
}

/// Exchanges an authorization code for an access token.
///
/// Completes the authorization-code flow by posting the code to the token
/// endpoint. The application authenticates with an HTTP Basic header built
/// from the configured client id and secret; the authorization code itself
/// is single-use and short-lived, so the exchange happens directly from
/// the callback handler.
///
/// # Arguments
///
/// * `code` - Authorization code received from the OAuth callback
///
/// # Returns
///
/// Returns a `Result` containing:
/// - `Ok(Token)` - Complete token with access token, refresh token and metadata
/// - `Err(reqwest::Error)` - HTTP error, network error, or API error
pub async fn exchange_code(code: &str) -> Result<Token, reqwest::Error> {
    let redirect_uri = config::spotify_redirect_uri();
    let auth_header = format!(
        "Basic {}",
        STANDARD.encode(format!(
            "{}:{}",
            config::spotify_client_id(),
            config::spotify_client_secret()
        ))
    );

    let client = Client::new();
    let res = client
        .post(config::SPOTIFY_TOKEN_URL)
        .header("Authorization", auth_header)
        .form(&[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", &redirect_uri),
        ])
        .send()
        .await?;

    let json: Value = res.json().await?;

    Ok(Token {
        access_token: json["access_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        refresh_token: json["refresh_token"]
            .as_str()
            .unwrap_or_default()
            .to_string(),
        scope: json["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: json["expires_in"].as_i64().unwrap_or(3600) as u64,
        obtained_at: chrono::Utc::now().timestamp() as u64,
    })
}
