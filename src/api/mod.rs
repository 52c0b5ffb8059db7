//! # API Module
//!
//! HTTP endpoints for the temporary local web server that runs during
//! `discocli auth`. The server exists only to catch the OAuth redirect;
//! it is spawned when the flow starts and dies with the process.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`callback`] - Handles the OAuth redirect from Spotify's authorization
//!   server. Validates the CSRF `state` parameter against the one issued
//!   for this run and exchanges the authorization code for a token.
//!
//! ### Monitoring
//!
//! - [`health`] - Returns application status and version, handy for
//!   checking that the callback server actually came up on the configured
//!   redirect address.
//!
//! ## Architecture
//!
//! Built on the [Axum](https://docs.rs/axum) web framework; each endpoint
//! is an async function wired into the router in [`crate::server`]. The
//! in-flight authorization attempt travels through an
//! `Arc<Mutex<Option<AuthAttempt>>>` extension shared with the CLI side.
//!
//! ## Related Modules
//!
//! - [`crate::spotify::auth`] - drives the flow and performs the exchange
//! - [`crate::types`] - type definitions for authentication tokens

mod callback;
mod health;

pub use callback::callback;
pub use health::health;
