use std::{
    io::{self, Write},
    time::Duration,
};

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    discography, error, info,
    management::TokenManager,
    spotify::client::SpotifyClient,
    types::AlbumTableRow,
    utils,
};

pub async fn albums(artist: Option<String>) {
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
    let mut albums = match discography::get_all_albums(&mut client, &artist.id).await {
        Ok(albums) => {
            pb.finish_and_clear();
            albums
        }
        Err(e) => {
            pb.finish_and_clear();
            error!("Failed to fetch albums: {}", e);
        }
    };

    utils::sort_albums_by_date(&mut albums);

    let table_rows: Vec<AlbumTableRow> = albums
        .into_iter()
        .map(|a| AlbumTableRow {
            date: a.release_date,
            name: a.name,
            kind: a.album_type,
        })
        .collect();

    let table = Table::new(table_rows);
    println!("{}", table);
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
