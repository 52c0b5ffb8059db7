use crate::config;

/// Prints the three configuration values the auth flow will use. A plain
/// diagnostic dump for debugging credential or redirect mismatches.
pub fn env() {
    println!("Client ID: {}", config::spotify_client_id());
    println!("Client Secret: {}", config::spotify_client_secret());
    println!("Redirect URI: {}", config::spotify_redirect_uri());
}
