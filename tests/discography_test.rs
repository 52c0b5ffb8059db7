use std::collections::HashMap;

use discocli::Res;
use discocli::discography::{self, DiscographyError, MAX_ALBUM_PAGES};
use discocli::spotify::client::SpotifyApi;
use discocli::types::{
    AddTracksResponse, Album, AlbumArtist, AlbumPage, Artist, CreatePlaylistResponse, CurrentUser,
    Track,
};

/// Scripted stand-in for the HTTP client. Pages are addressed by fake
/// next-URLs of the form `page:<index>`; every call is recorded so tests
/// can assert on call counts, order and payloads.
#[derive(Default)]
struct FakeSpotify {
    search_results: Vec<Artist>,
    album_pages: Vec<AlbumPage>,
    tracks_by_album: HashMap<String, Vec<Track>>,
    user_id: String,

    search_calls: usize,
    album_page_requests: Vec<Option<String>>,
    track_requests: Vec<String>,
    created_playlists: Vec<(String, String)>,
    added_batches: Vec<Vec<String>>,
}

impl SpotifyApi for FakeSpotify {
    async fn search_artists(&mut self, _query: &str, limit: u32) -> Res<Vec<Artist>> {
        self.search_calls += 1;
        Ok(self
            .search_results
            .iter()
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn artist_albums(
        &mut self,
        _artist_id: &str,
        _limit: u32,
        next: Option<String>,
    ) -> Res<AlbumPage> {
        let index = match &next {
            None => 0,
            Some(url) => url
                .strip_prefix("page:")
                .and_then(|n| n.parse::<usize>().ok())
                .expect("fake next-URL must look like page:<index>"),
        };
        self.album_page_requests.push(next);
        Ok(self.album_pages[index].clone())
    }

    async fn album_tracks(&mut self, album_id: &str) -> Res<Vec<Track>> {
        self.track_requests.push(album_id.to_string());
        Ok(self
            .tracks_by_album
            .get(album_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn current_user(&mut self) -> Res<CurrentUser> {
        Ok(CurrentUser {
            id: self.user_id.clone(),
            display_name: None,
        })
    }

    async fn create_playlist(
        &mut self,
        user_id: &str,
        name: &str,
    ) -> Res<CreatePlaylistResponse> {
        self.created_playlists
            .push((user_id.to_string(), name.to_string()));
        Ok(CreatePlaylistResponse {
            id: "playlist_1".to_string(),
            name: name.to_string(),
        })
    }

    async fn add_playlist_items(
        &mut self,
        _playlist_id: &str,
        uris: &[String],
    ) -> Res<AddTracksResponse> {
        self.added_batches.push(uris.to_vec());
        Ok(AddTracksResponse {
            snapshot_id: format!("snap_{}", self.added_batches.len()),
        })
    }
}

fn make_album(id: &str, name: &str) -> Album {
    Album {
        id: id.to_string(),
        name: name.to_string(),
        album_type: "album".to_string(),
        release_date: "2020-01-01".to_string(),
        artists: vec![AlbumArtist {
            id: "artist_1".to_string(),
            name: "Test Band".to_string(),
        }],
    }
}

fn make_track(id: &str) -> Track {
    Track {
        id: id.to_string(),
        name: format!("{} name", id),
    }
}

fn make_artist(id: &str, name: &str) -> Artist {
    Artist {
        id: id.to_string(),
        name: name.to_string(),
    }
}

#[tokio::test]
async fn find_artist_returns_first_match() {
    let mut fake = FakeSpotify {
        search_results: vec![
            make_artist("artist_1", "Test Band"),
            make_artist("artist_2", "Test Band Tribute"),
        ],
        ..Default::default()
    };

    let artist = discography::find_artist(&mut fake, "test band").await.unwrap();

    assert_eq!(artist.id, "artist_1");
    assert_eq!(artist.name, "Test Band");
    assert_eq!(fake.search_calls, 1);
}

#[tokio::test]
async fn find_artist_not_found_names_the_query_and_stops() {
    let mut fake = FakeSpotify::default();

    let err = discography::find_artist(&mut fake, "No Such Band")
        .await
        .unwrap_err();

    match err.downcast_ref::<DiscographyError>() {
        Some(DiscographyError::ArtistNotFound(name)) => assert_eq!(name, "No Such Band"),
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.to_string(), "Artist 'No Such Band' not found.");

    // Only the search call happened
    assert_eq!(fake.search_calls, 1);
    assert!(fake.album_page_requests.is_empty());
    assert!(fake.track_requests.is_empty());
    assert!(fake.created_playlists.is_empty());
    assert!(fake.added_batches.is_empty());
}

#[tokio::test]
async fn get_all_albums_concatenates_pages_and_dedups() {
    // Three pages of 50+50+10 items; two later names duplicate earlier
    // ones in different case only.
    let page0: Vec<Album> = (0..50)
        .map(|i| make_album(&format!("p0_{}", i), &format!("Album {}", i)))
        .collect();
    let mut page1: Vec<Album> = (50..100)
        .map(|i| make_album(&format!("p1_{}", i), &format!("Album {}", i)))
        .collect();
    let mut page2: Vec<Album> = (100..110)
        .map(|i| make_album(&format!("p2_{}", i), &format!("Album {}", i)))
        .collect();
    page1[0] = make_album("p1_dup", "ALBUM 0"); // duplicates "Album 0"
    page2[9] = make_album("p2_dup", "album 7"); // duplicates "Album 7"

    let last0 = page0.last().unwrap().id.clone();

    let mut fake = FakeSpotify {
        album_pages: vec![
            AlbumPage {
                items: page0,
                next: Some("page:1".to_string()),
            },
            AlbumPage {
                items: page1,
                next: Some("page:2".to_string()),
            },
            AlbumPage {
                items: page2,
                next: None,
            },
        ],
        ..Default::default()
    };

    let albums = discography::get_all_albums(&mut fake, "artist_1").await.unwrap();

    // 110 fetched, 2 case-duplicates dropped
    assert_eq!(albums.len(), 108);

    // First-seen wins: the kept "Album 0" is the one from page 0
    assert_eq!(albums[0].id, "p0_0");
    assert_eq!(albums[0].name, "Album 0");
    assert!(albums.iter().all(|a| a.id != "p1_dup" && a.id != "p2_dup"));

    // First-seen order is preserved across page boundaries
    assert_eq!(albums[49].id, last0);
    assert_eq!(albums[50].id, "p1_51");

    // All three pages were requested, in order
    assert_eq!(
        fake.album_page_requests,
        vec![None, Some("page:1".to_string()), Some("page:2".to_string())]
    );
}

#[tokio::test]
async fn get_all_albums_single_page() {
    let mut fake = FakeSpotify {
        album_pages: vec![AlbumPage {
            items: vec![make_album("a1", "One"), make_album("a2", "Two")],
            next: None,
        }],
        ..Default::default()
    };

    let albums = discography::get_all_albums(&mut fake, "artist_1").await.unwrap();

    assert_eq!(albums.len(), 2);
    assert_eq!(fake.album_page_requests, vec![None]);
}

#[tokio::test]
async fn get_all_albums_stops_at_page_limit() {
    // A listing that always advertises another page
    let album_pages: Vec<AlbumPage> = (0..(MAX_ALBUM_PAGES as usize + 10))
        .map(|i| AlbumPage {
            items: vec![make_album(&format!("a{}", i), &format!("Album {}", i))],
            next: Some(format!("page:{}", i + 1)),
        })
        .collect();

    let mut fake = FakeSpotify {
        album_pages,
        ..Default::default()
    };

    let err = discography::get_all_albums(&mut fake, "artist_1")
        .await
        .unwrap_err();

    match err.downcast_ref::<DiscographyError>() {
        Some(DiscographyError::PageLimitReached { artist_id, pages }) => {
            assert_eq!(artist_id, "artist_1");
            assert_eq!(*pages, MAX_ALBUM_PAGES);
        }
        other => panic!("unexpected error: {:?}", other),
    }

    // Exactly the capped number of pages was fetched
    assert_eq!(fake.album_page_requests.len(), MAX_ALBUM_PAGES as usize);
}

#[tokio::test]
async fn get_all_track_ids_album_then_track_order() {
    // Five albums with 3, 4, 2, 5 and 1 tracks
    let track_counts = [3usize, 4, 2, 5, 1];
    let albums: Vec<Album> = track_counts
        .iter()
        .enumerate()
        .map(|(i, _)| make_album(&format!("album_{}", i), &format!("Album {}", i)))
        .collect();

    let mut tracks_by_album = HashMap::new();
    let mut expected: Vec<String> = Vec::new();
    for (i, count) in track_counts.iter().enumerate() {
        let tracks: Vec<Track> = (0..*count)
            .map(|t| make_track(&format!("t{}_{}", i, t)))
            .collect();
        expected.extend(tracks.iter().map(|t| t.id.clone()));
        tracks_by_album.insert(format!("album_{}", i), tracks);
    }

    let mut fake = FakeSpotify {
        tracks_by_album,
        ..Default::default()
    };

    let track_ids = discography::get_all_track_ids(&mut fake, &albums).await.unwrap();

    assert_eq!(track_ids.len(), 15);
    assert_eq!(track_ids, expected);

    // One listing call per album, in album order
    let expected_requests: Vec<String> = (0..5).map(|i| format!("album_{}", i)).collect();
    assert_eq!(fake.track_requests, expected_requests);
}

#[tokio::test]
async fn get_all_track_ids_keeps_cross_album_duplicates() {
    // The same track id on two albums is collected once per occurrence
    let albums = vec![make_album("album_0", "Studio"), make_album("album_1", "Hits")];
    let mut tracks_by_album = HashMap::new();
    tracks_by_album.insert(
        "album_0".to_string(),
        vec![make_track("shared"), make_track("only_studio")],
    );
    tracks_by_album.insert("album_1".to_string(), vec![make_track("shared")]);

    let mut fake = FakeSpotify {
        tracks_by_album,
        ..Default::default()
    };

    let track_ids = discography::get_all_track_ids(&mut fake, &albums).await.unwrap();

    assert_eq!(track_ids, vec!["shared", "only_studio", "shared"]);
}

#[tokio::test]
async fn add_tracks_batches_of_at_most_100() {
    let track_ids: Vec<String> = (0..250).map(|i| format!("t{}", i)).collect();

    let mut fake = FakeSpotify::default();
    discography::add_tracks_to_playlist(&mut fake, "playlist_1", &track_ids)
        .await
        .unwrap();

    // ceil(250 / 100) = 3 calls of 100, 100 and 50
    let sizes: Vec<usize> = fake.added_batches.iter().map(|b| b.len()).collect();
    assert_eq!(sizes, vec![100, 100, 50]);

    // Batches cover every id exactly once, in the original order
    let flattened: Vec<String> = fake.added_batches.concat();
    let expected: Vec<String> = track_ids
        .iter()
        .map(|id| format!("spotify:track:{}", id))
        .collect();
    assert_eq!(flattened, expected);
}

#[tokio::test]
async fn add_tracks_small_list_is_one_batch() {
    let track_ids: Vec<String> = (0..15).map(|i| format!("t{}", i)).collect();

    let mut fake = FakeSpotify::default();
    discography::add_tracks_to_playlist(&mut fake, "playlist_1", &track_ids)
        .await
        .unwrap();

    assert_eq!(fake.added_batches.len(), 1);
    assert_eq!(fake.added_batches[0].len(), 15);
}

#[tokio::test]
async fn add_tracks_empty_list_makes_no_calls() {
    let mut fake = FakeSpotify::default();
    discography::add_tracks_to_playlist(&mut fake, "playlist_1", &[])
        .await
        .unwrap();

    assert!(fake.added_batches.is_empty());
}

#[tokio::test]
async fn full_pipeline_creates_and_fills_the_playlist() {
    let mut tracks_by_album = HashMap::new();
    tracks_by_album.insert(
        "album_0".to_string(),
        vec![make_track("t0"), make_track("t1")],
    );
    tracks_by_album.insert("album_1".to_string(), vec![make_track("t2")]);

    let mut fake = FakeSpotify {
        search_results: vec![make_artist("artist_1", "Test Band")],
        album_pages: vec![AlbumPage {
            items: vec![
                make_album("album_0", "First"),
                make_album("album_1", "Second"),
                make_album("dup", "FIRST"),
            ],
            next: None,
        }],
        tracks_by_album,
        user_id: "user_1".to_string(),
        ..Default::default()
    };

    let artist = discography::find_artist(&mut fake, "test band").await.unwrap();
    let albums = discography::get_all_albums(&mut fake, &artist.id).await.unwrap();
    let track_ids = discography::get_all_track_ids(&mut fake, &albums).await.unwrap();

    let user = fake.current_user().await.unwrap();
    let name = discography::playlist_name(&artist.name);
    let playlist_id = discography::create_playlist(&mut fake, &user.id, &name)
        .await
        .unwrap();
    discography::add_tracks_to_playlist(&mut fake, &playlist_id, &track_ids)
        .await
        .unwrap();

    assert_eq!(albums.len(), 2);
    assert_eq!(track_ids, vec!["t0", "t1", "t2"]);
    assert_eq!(
        fake.created_playlists,
        vec![("user_1".to_string(), "Test Band Discography".to_string())]
    );
    assert_eq!(fake.added_batches.len(), 1);
    assert_eq!(
        fake.added_batches[0],
        vec![
            "spotify:track:t0".to_string(),
            "spotify:track:t1".to_string(),
            "spotify:track:t2".to_string()
        ]
    );
}
