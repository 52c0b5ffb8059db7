use std::{
    io::{self, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    discography, error, info,
    management::TokenManager,
    spotify::client::{SpotifyApi, SpotifyClient},
    success,
};

pub async fn discography(artist: Option<String>) {
    let artist_input = match artist {
        Some(name) => name.trim().to_string(),
        None => prompt_artist_name(),
    };

    if artist_input.is_empty() {
        error!("No artist name given.");
    }

    let token_mgr = match TokenManager::load().await {
        Ok(t) => t,
        Err(e) => {
            error!(
                "Failed to load token. Please run discocli auth\n Error: {}",
                e
            );
        }
    };
    let mut client = SpotifyClient::new(token_mgr);

    let artist = match discography::find_artist(&mut client, &artist_input).await {
        Ok(artist) => artist,
        Err(e) => error!("{}", e),
    };
    info!("Found artist: {}", artist.name);

    let pb = spinner("Fetching albums...");
    let albums = match discography::get_all_albums(&mut client, &artist.id).await {
        Ok(albums) => {
            pb.finish_and_clear();
            albums
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch albums: {}", e);
        }
    };
    success!("Found {} unique albums/singles.", albums.len());

    let pb = spinner("Fetching tracks...");
    let track_ids = match discography::get_all_track_ids(&mut client, &albums).await {
        Ok(track_ids) => {
            pb.finish_and_clear();
            track_ids
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch tracks: {}", e);
        }
    };
    success!("Found {} tracks.", track_ids.len());

    let user = match client.current_user().await {
        Ok(user) => user,
        Err(e) => error!("Failed to look up current user: {}", e),
    };

    let playlist_name = discography::playlist_name(&artist.name);
    let playlist_id = match discography::create_playlist(&mut client, &user.id, &playlist_name).await
    {
        Ok(playlist_id) => playlist_id,
        Err(e) => error!("Failed to create playlist: {}", e),
    };
    success!("Created playlist: {}", playlist_name);

    info!("Adding tracks to playlist...");
    if let Err(e) =
        discography::add_tracks_to_playlist(&mut client, &playlist_id, &track_ids).await
    {
        error!("Failed to add tracks to playlist: {}", e);
    }

    success!("Done!");
}

fn prompt_artist_name() -> String {
    print!("Enter artist name: ");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        error!("Failed to read artist name from stdin.");
    }

    input.trim().to_string()
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}
