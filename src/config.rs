//! Configuration management for the discography playlist CLI.
//!
//! This module handles loading and accessing configuration values from
//! environment variables and `.env` files. The application needs exactly
//! three values - the Spotify client id, the client secret and the OAuth
//! redirect URI - everything else (endpoint URLs, requested scope) is a
//! fixed property of the Spotify Web API and lives here as a constant.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the working directory
//! 3. `.env` file in the local data directory

use dotenv;
use std::{env, path::PathBuf};

/// Spotify OAuth authorization endpoint.
pub const SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";

/// Spotify OAuth token exchange endpoint.
pub const SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

/// Spotify Web API base URL.
pub const SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";

/// Scope requested during authorization. Playlist creation defaults to
/// private playlists, but Spotify requires both modify scopes for the
/// create/add-items endpoints to work across account settings.
pub const SPOTIFY_SCOPE: &str = "playlist-modify-private playlist-modify-public";

/// Loads environment variables from `.env` files.
///
/// Reads a `.env` file from the current working directory first, then from
/// the platform-specific local data directory under `discocli/.env`. A
/// value that is already set in the process environment is never
/// overwritten, so the working-directory file and real environment win
/// over the data-directory file. Missing files are not an error.
///
/// # Directory Structure
///
/// The data-directory file is looked up in:
/// - Linux: `~/.local/share/discocli/.env`
/// - macOS: `~/Library/Application Support/discocli/.env`
/// - Windows: `%LOCALAPPDATA%/discocli/.env`
///
/// # Returns
///
/// Returns `Ok(())` on success, or an error string if directory creation
/// or parsing of an existing file fails.
///
/// # Example
///
/// ```
/// use discocli::config;
///
/// #[tokio::main]
/// async fn main() {
///     if let Err(e) = config::load_env().await {
///         eprintln!("Configuration error: {}", e);
///     }
/// }
/// ```
pub async fn load_env() -> Result<(), String> {
    // working-directory .env, if any
    let _ = dotenv::dotenv();

    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("discocli/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    Ok(())
}

/// Returns the Spotify API client ID for authentication.
///
/// Retrieves the `SPOTIFY_CLIENT_ID` environment variable which contains
/// the client ID obtained when registering the application with Spotify's
/// developer platform.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_ID` environment variable is not set.
pub fn spotify_client_id() -> String {
    env::var("SPOTIFY_CLIENT_ID").expect("SPOTIFY_CLIENT_ID must be set")
}

/// Returns the Spotify API client secret for authentication.
///
/// Retrieves the `SPOTIFY_CLIENT_SECRET` environment variable. The secret
/// is sent only to the token endpoint, inside the HTTP Basic authorization
/// header, and must be kept out of logs and version control.
///
/// # Panics
///
/// Panics if the `SPOTIFY_CLIENT_SECRET` environment variable is not set.
pub fn spotify_client_secret() -> String {
    env::var("SPOTIFY_CLIENT_SECRET").expect("SPOTIFY_CLIENT_SECRET must be set")
}

/// Returns the Spotify OAuth redirect URI.
///
/// Retrieves the `SPOTIFY_REDIRECT_URI` environment variable which
/// specifies the callback URL that Spotify redirects to after user
/// authorization. It must match the redirect URI registered in the Spotify
/// application settings; the local callback server binds to the host:port
/// part of this URI (see [`crate::utils::callback_bind_addr`]).
///
/// # Panics
///
/// Panics if the `SPOTIFY_REDIRECT_URI` environment variable is not set.
pub fn spotify_redirect_uri() -> String {
    env::var("SPOTIFY_REDIRECT_URI").expect("SPOTIFY_REDIRECT_URI must be set")
}
