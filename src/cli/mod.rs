//! # CLI Module
//!
//! This module provides the command-line interface layer for discocli, a
//! Spotify API client that builds one playlist containing an artist's full
//! discography. It implements all user-facing commands and coordinates
//! between the API client, token management and the workflow logic.
//!
//! ## Command Categories
//!
//! ### Authentication
//!
//! - [`auth`] - Initiates the Spotify OAuth authorization-code flow
//!
//! ### Core Workflow
//!
//! - [`discography`] - Resolves an artist, walks the album/single catalog,
//!   creates a fresh private playlist and fills it batch by batch
//!
//! ### Diagnostics
//!
//! - [`albums`] - Prints the deduplicated catalog for an artist as a table
//! - [`env`] - Prints the three configuration values currently in effect
//!
//! ## Architecture Design
//!
//! ```text
//! CLI Layer (User Interface)
//!     ↓
//! Workflow Layer (discography operations)
//!     ↓
//! API Layer (Spotify client)
//!     ↓
//! Network Layer (HTTP Requests)
//! ```
//!
//! Each command builds its own [`crate::spotify::client::SpotifyClient`]
//! from the cached token and passes it down explicitly; nothing holds
//! client state globally.
//!
//! ## Error Handling Philosophy
//!
//! The pipeline is deliberately all-or-nothing: the first failure aborts
//! the run via the `error!` macro. A failed track-add batch leaves earlier
//! batches in the playlist; no cleanup or resume is attempted, and the
//! messages say which step failed so the user can decide what to do with
//! the partial playlist.
//!
//! ## Progress and User Experience
//!
//! - Spinners for the album and track fetching stages
//! - Found-artist, album-count and track-count messages
//! - Success confirmation with the created playlist name

mod albums;
mod auth;
mod discography;
mod env;

pub use albums::albums;
pub use auth::auth;
pub use discography::discography;
pub use env::env;
