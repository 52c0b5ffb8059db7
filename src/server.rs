use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::{api, config, error, types::AuthAttempt, utils};

pub async fn start_api_server(state: Arc<Mutex<Option<AuthAttempt>>>) {
    let app = Router::new()
        .route("/health", get(api::health))
        .route("/callback", get(api::callback).layer(Extension(state)));

    // bind to the host:port the registered redirect URI points at
    let bind_addr = match utils::callback_bind_addr(&config::spotify_redirect_uri()) {
        Ok(addr) => addr,
        Err(e) => error!("{}", e),
    };

    let listener = match tokio::net::TcpListener::bind(&bind_addr).await {
        Ok(listener) => listener,
        Err(e) => error!("Failed to bind callback server on {}: {}", bind_addr, e),
    };

    if let Err(e) = axum::serve(listener, app).await {
        error!("Callback server failed: {}", e);
    }
}
