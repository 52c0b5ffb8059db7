use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{spotify, types::AuthAttempt, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<AuthAttempt>>>>,
) -> Html<&'static str> {
    let Some(code) = params.get("code") else {
        return Html("<h4>Missing authorization code.</h4>");
    };

    let mut state = shared_state.lock().await;
    let Some(ref mut attempt) = state.as_mut() else {
        return Html("<h4>No authorization attempt in progress.</h4>");
    };

    // the state token must match the one issued for this run
    if params.get("state") != Some(&attempt.state) {
        warning!("Callback state mismatch; rejecting authorization code.");
        return Html("<h4>State mismatch. Login rejected.</h4>");
    }

    match spotify::auth::exchange_code(code).await {
        Ok(token) => {
            attempt.token = Some(token);
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            Html("<h4>Login failed.</h4>")
        }
    }
}
