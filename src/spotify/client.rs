use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use tokio::time::sleep;

use crate::{
    Res, config,
    management::TokenManager,
    types::{
        AddTracksRequest, AddTracksResponse, AlbumPage, AlbumTracksResponse, Artist,
        ArtistSearchResponse, CreatePlaylistRequest, CreatePlaylistResponse, CurrentUser, Track,
    },
    warning,
};

/// The capability set the discography workflow consumes. Implementations
/// other than [`SpotifyClient`] exist only in tests, where a scripted fake
/// records the calls it receives.
#[allow(async_fn_in_trait)]
pub trait SpotifyApi {
    /// Searches for artists matching `query`, returning at most `limit`
    /// items in the platform's relevance order.
    async fn search_artists(&mut self, query: &str, limit: u32) -> Res<Vec<Artist>>;

    /// Fetches one page of an artist's albums and singles. With
    /// `next = None` the first page is requested with the given page size;
    /// otherwise `next` is the page URL reported by the previous response
    /// and is fetched verbatim.
    async fn artist_albums(
        &mut self,
        artist_id: &str,
        limit: u32,
        next: Option<String>,
    ) -> Res<AlbumPage>;

    /// Fetches one page of an album's track listing.
    async fn album_tracks(&mut self, album_id: &str) -> Res<Vec<Track>>;

    /// Looks up the authenticated user.
    async fn current_user(&mut self) -> Res<CurrentUser>;

    /// Creates a private, non-collaborative playlist owned by `user_id`.
    async fn create_playlist(
        &mut self,
        user_id: &str,
        name: &str,
    ) -> Res<CreatePlaylistResponse>;

    /// Appends `uris` to a playlist. Callers keep batches at or below the
    /// API limit of 100 entries.
    async fn add_playlist_items(
        &mut self,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<AddTracksResponse>;
}

/// HTTP implementation of [`SpotifyApi`] over the stored token cache.
///
/// Constructed once per command and passed to the workflow functions; all
/// requests authenticate with a bearer token obtained from the
/// [`TokenManager`], which refreshes expired tokens transparently.
pub struct SpotifyClient {
    http: Client,
    token_mgr: TokenManager,
}

impl SpotifyClient {
    pub fn new(token_mgr: TokenManager) -> Self {
        Self {
            http: Client::new(),
            token_mgr,
        }
    }

    async fn get_json<T: DeserializeOwned>(&mut self, url: &str) -> Res<T> {
        loop {
            let token = self.token_mgr.get_valid_token().await;
            let response = self.http.get(url).bearer_auth(token).send().await?;

            // 429 carries the recommended delay in the Retry-After header
            if response.status() == StatusCode::TOO_MANY_REQUESTS {
                if let Some(retry_after) = response.headers().get("retry-after") {
                    let retry_after = retry_after
                        .to_str()
                        .unwrap_or("0")
                        .parse::<u64>()
                        .unwrap_or(0);
                    if retry_after <= 120 {
                        sleep(Duration::from_secs(retry_after)).await;
                        continue; // retry
                    }
                    warning!(
                        "Retry-After of {} seconds is unreasonably high. Try again later.",
                        retry_after
                    );
                }
            }

            match response.error_for_status() {
                Ok(valid_response) => return Ok(valid_response.json::<T>().await?),
                Err(err) => {
                    if let Some(status) = err.status() {
                        if status == StatusCode::BAD_GATEWAY {
                            sleep(Duration::from_secs(10)).await;
                            continue; // retry
                        }
                    }
                    return Err(err.into()); // propagate other errors
                }
            }
        }
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&mut self, url: &str, body: &B) -> Res<T> {
        let token = self.token_mgr.get_valid_token().await;
        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .json(body)
            .send()
            .await?;

        Ok(response.error_for_status()?.json::<T>().await?)
    }
}

impl SpotifyApi for SpotifyClient {
    async fn search_artists(&mut self, query: &str, limit: u32) -> Res<Vec<Artist>> {
        let limit = limit.to_string();
        let api_url = Url::parse_with_params(
            &format!("{uri}/search", uri = config::SPOTIFY_API_URL),
            &[("q", query), ("type", "artist"), ("limit", limit.as_str())],
        )?;

        let res = self.get_json::<ArtistSearchResponse>(api_url.as_str()).await?;
        Ok(res.artists.items)
    }

    async fn artist_albums(
        &mut self,
        artist_id: &str,
        limit: u32,
        next: Option<String>,
    ) -> Res<AlbumPage> {
        let api_url = match next {
            Some(url) => url,
            None => format!(
                "{uri}/artists/{id}/albums?include_groups=album,single&limit={limit}",
                uri = config::SPOTIFY_API_URL,
                id = artist_id,
                limit = limit
            ),
        };

        self.get_json::<AlbumPage>(&api_url).await
    }

    async fn album_tracks(&mut self, album_id: &str) -> Res<Vec<Track>> {
        let api_url = format!(
            "{uri}/albums/{id}/tracks?limit=50",
            uri = config::SPOTIFY_API_URL,
            id = album_id
        );

        let res = self.get_json::<AlbumTracksResponse>(&api_url).await?;
        Ok(res.items)
    }

    async fn current_user(&mut self) -> Res<CurrentUser> {
        let api_url = format!("{uri}/me", uri = config::SPOTIFY_API_URL);
        self.get_json::<CurrentUser>(&api_url).await
    }

    async fn create_playlist(
        &mut self,
        user_id: &str,
        name: &str,
    ) -> Res<CreatePlaylistResponse> {
        let api_url = format!(
            "{uri}/users/{user_id}/playlists",
            uri = config::SPOTIFY_API_URL,
            user_id = user_id
        );

        let request = CreatePlaylistRequest {
            name: name.to_string(),
            description: "Created with discocli.".to_string(),
            public: false,
            collaborative: false,
        };

        self.post_json(&api_url, &request).await
    }

    async fn add_playlist_items(
        &mut self,
        playlist_id: &str,
        uris: &[String],
    ) -> Res<AddTracksResponse> {
        let api_url = format!(
            "{uri}/playlists/{id}/tracks",
            uri = config::SPOTIFY_API_URL,
            id = playlist_id
        );

        let request = AddTracksRequest {
            uris: uris.to_vec(),
        };

        self.post_json(&api_url, &request).await
    }
}
