use std::{cmp::Ordering, collections::HashSet};

use rand::{Rng, distr::Alphanumeric};

use crate::types::Album;

pub fn generate_state_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(32)
        .map(char::from)
        .collect()
}

/// Removes albums whose name was already seen, ignoring case. The first
/// occurrence wins and the original order is preserved. Titles that differ
/// beyond case ("(Deluxe Edition)" variants and the like) stay distinct.
pub fn dedup_albums_by_name(albums: &mut Vec<Album>) {
    let mut seen_names = HashSet::new();
    albums.retain(|album| seen_names.insert(album.name.to_lowercase()));
}

/// Extracts the `host:port` portion of the redirect URI so the local
/// callback server can bind to it, e.g.
/// `http://127.0.0.1:8888/callback` -> `127.0.0.1:8888`.
pub fn callback_bind_addr(redirect_uri: &str) -> Result<String, String> {
    let rest = redirect_uri
        .strip_prefix("http://")
        .or_else(|| redirect_uri.strip_prefix("https://"))
        .ok_or_else(|| format!("Redirect URI has no http(s) scheme: {}", redirect_uri))?;

    let authority = rest.split('/').next().unwrap_or(rest);
    if authority.is_empty() {
        return Err(format!("Redirect URI has no host: {}", redirect_uri));
    }

    if authority.contains(':') {
        Ok(authority.to_string())
    } else if redirect_uri.starts_with("https://") {
        Ok(format!("{}:443", authority))
    } else {
        Ok(format!("{}:80", authority))
    }
}

pub fn sort_albums_by_date(albums: &mut Vec<Album>) {
    albums.sort_by(|a, b| {
        match b.release_date.cmp(&a.release_date) {
            Ordering::Equal => a.name.to_lowercase().cmp(&b.name.to_lowercase()), // secondary sort: name ascending
            other => other,
        }
    });
}
