//! The discography workflow: resolve an artist, walk the album catalog,
//! collect track ids and fill a freshly created playlist.
//!
//! Every function here is generic over [`SpotifyApi`] so the whole
//! pipeline runs unchanged against the HTTP client or a scripted fake in
//! tests. The pipeline is strictly sequential; each call completes before
//! the next starts, and the first failure aborts the run.

use std::fmt;

use crate::{
    Res,
    spotify::client::SpotifyApi,
    types::{Album, Artist},
    utils,
};

/// Page size for the album listing, the maximum the API allows.
pub const ALBUMS_PAGE_LIMIT: u32 = 50;

/// Upper bound on album-listing pages followed per artist. 50 pages of 50
/// items bound a catalog at 2500 releases, far beyond any real
/// discography; a listing that still reports a next page at that point is
/// treated as misbehaving rather than followed forever.
pub const MAX_ALBUM_PAGES: u32 = 50;

/// The add-items endpoint rejects more than 100 entries per call.
pub const ADD_TRACKS_BATCH: usize = 100;

#[derive(Debug)]
pub enum DiscographyError {
    /// The artist search returned no results for the given input.
    ArtistNotFound(String),
    /// The album listing kept reporting further pages past [`MAX_ALBUM_PAGES`].
    PageLimitReached { artist_id: String, pages: u32 },
}

impl fmt::Display for DiscographyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscographyError::ArtistNotFound(name) => {
                write!(f, "Artist '{}' not found.", name)
            }
            DiscographyError::PageLimitReached { artist_id, pages } => {
                write!(
                    f,
                    "Album listing for artist {} still reported more pages after {} pages; giving up.",
                    artist_id, pages
                )
            }
        }
    }
}

impl std::error::Error for DiscographyError {}

/// Resolves a free-text artist name to the canonical (id, display name)
/// pair of the most relevant match.
///
/// Issues a single artist-typed search with limit 1 and takes the first
/// item, trusting the platform's relevance ranking. There is no fuzzy
/// matching and no disambiguation; zero results fail with
/// [`DiscographyError::ArtistNotFound`] carrying the queried name, and no
/// further calls are made.
pub async fn find_artist<C: SpotifyApi>(client: &mut C, name: &str) -> Res<Artist> {
    let query = format!("artist:{}", name);
    let mut items = client.search_artists(&query, 1).await?;

    if items.is_empty() {
        return Err(DiscographyError::ArtistNotFound(name.to_string()).into());
    }

    Ok(items.remove(0))
}

/// Fetches the artist's full album/single catalog and deduplicates it.
///
/// Requests the first page of [`ALBUMS_PAGE_LIMIT`] items and follows the
/// reported next-page URL until the listing is exhausted, concatenating
/// all pages. The walk is bounded by [`MAX_ALBUM_PAGES`]; a listing that
/// never ends fails with [`DiscographyError::PageLimitReached`] instead of
/// looping.
///
/// The platform may list the same release under several ids (regional
/// reissues), so the concatenated result is deduplicated by
/// case-insensitive name, first occurrence wins, order preserved.
pub async fn get_all_albums<C: SpotifyApi>(client: &mut C, artist_id: &str) -> Res<Vec<Album>> {
    let mut albums: Vec<Album> = Vec::new();
    let mut next: Option<String> = None;
    let mut pages: u32 = 0;

    loop {
        let page = client
            .artist_albums(artist_id, ALBUMS_PAGE_LIMIT, next)
            .await?;
        albums.extend(page.items);
        pages += 1;

        match page.next {
            Some(url) => {
                if pages >= MAX_ALBUM_PAGES {
                    return Err(DiscographyError::PageLimitReached {
                        artist_id: artist_id.to_string(),
                        pages,
                    }
                    .into());
                }
                next = Some(url);
            }
            None => break,
        }
    }

    utils::dedup_albums_by_name(&mut albums);
    Ok(albums)
}

/// Collects every track id across the given albums, in album order then
/// in-album listing order.
///
/// Tracks appearing on several albums are kept once per occurrence; the
/// playlist mirrors the catalog, duplicates included. Each album's
/// listing is fetched in one call; an album with more tracks than a
/// single page returns loses the remainder.
pub async fn get_all_track_ids<C: SpotifyApi>(
    client: &mut C,
    albums: &[Album],
) -> Res<Vec<String>> {
    let mut track_ids: Vec<String> = Vec::new();

    for album in albums {
        let tracks = client.album_tracks(&album.id).await?;
        for track in tracks {
            track_ids.push(track.id);
        }
    }

    Ok(track_ids)
}

/// Creates a fresh private, non-collaborative playlist owned by `user_id`
/// and returns its id.
///
/// The playlist is created unconditionally; an existing playlist with the
/// same name is neither reused nor updated.
pub async fn create_playlist<C: SpotifyApi>(
    client: &mut C,
    user_id: &str,
    name: &str,
) -> Res<String> {
    let playlist = client.create_playlist(user_id, name).await?;
    Ok(playlist.id)
}

/// Appends the collected track ids to the playlist in consecutive batches
/// of at most [`ADD_TRACKS_BATCH`], one call per batch, in order.
///
/// There is no verification beyond the call not failing and no rollback:
/// when a later batch fails, earlier batches stay in the playlist and the
/// error propagates.
pub async fn add_tracks_to_playlist<C: SpotifyApi>(
    client: &mut C,
    playlist_id: &str,
    track_ids: &[String],
) -> Res<()> {
    for chunk in track_ids.chunks(ADD_TRACKS_BATCH) {
        let uris: Vec<String> = chunk
            .iter()
            .map(|id| format!("spotify:track:{}", id))
            .collect();
        client.add_playlist_items(playlist_id, &uris).await?;
    }

    Ok(())
}

/// Name of the playlist created for an artist.
pub fn playlist_name(artist_name: &str) -> String {
    format!("{} Discography", artist_name)
}
