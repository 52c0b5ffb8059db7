//! # Spotify Integration Module
//!
//! This module is the integration layer between the CLI and the Spotify Web
//! API. It implements the authorization-code OAuth flow and a small typed
//! client for the handful of endpoints the discography workflow needs,
//! handling HTTP communication, token lifecycles and the API's rate-limit
//! quirks so the layers above can stay free of wire concerns.
//!
//! ## Architecture
//!
//! ```text
//! Application Layer (CLI, Workflow)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (OAuth 2.0 authorization code)
//!     └── API Client (search, catalog, playlists)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//!          ↓
//! Spotify Web API
//! ```
//!
//! ## Core Modules
//!
//! [`auth`] - Implements the OAuth 2.0 authorization-code flow:
//! - **Complete Auth Flow**: from the browser redirect to token storage
//! - **CSRF Protection**: a random `state` token checked on the callback
//! - **Client Secret**: exchanged requests authenticate with an HTTP Basic
//!   header built from the configured client id and secret
//! - **Browser Integration**: automatic browser launch for user authorization
//! - **Local Callback Server**: temporary HTTP server receiving the redirect
//!
//! [`client`] - The typed API client:
//! - **Explicit Instance**: a [`client::SpotifyClient`] is constructed once
//!   per command and passed down to every call site; there is no global
//!   client state
//! - **Trait Seam**: [`client::SpotifyApi`] captures the exact capability
//!   set the workflow consumes, so tests can substitute a scripted fake
//! - **Rate Limiting**: 429 responses are retried after the announced
//!   `Retry-After` delay; 502 responses are retried after 10 seconds
//! - **Token Lifecycle**: access tokens are refreshed transparently through
//!   the stored [`crate::management::TokenManager`]
//!
//! ## API Coverage
//!
//! - `GET /search` - artist resolution by free-text name
//! - `GET /artists/{id}/albums` - paginated album/single listing
//! - `GET /albums/{id}/tracks` - track listing for one album
//! - `GET /me` - current user lookup for playlist ownership
//! - `POST /users/{user_id}/playlists` - playlist creation
//! - `POST /playlists/{playlist_id}/tracks` - batched item addition
//! - `POST /api/token` - code exchange and refresh (accounts service)
//!
//! ## Error Types
//!
//! All client functions return [`crate::Res`]; HTTP and decoding failures
//! surface as boxed `reqwest` errors and abort the calling command.

pub mod auth;
pub mod client;
