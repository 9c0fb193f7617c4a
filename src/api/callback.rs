use std::{collections::HashMap, sync::Arc};

use axum::{Extension, extract::Query, response::Html};
use tokio::sync::Mutex;

use crate::{types::PendingAuthorization, warning};

pub async fn callback(
    Query(params): Query<HashMap<String, String>>,
    Extension(shared_state): Extension<Arc<Mutex<Option<PendingAuthorization>>>>,
) -> Html<&'static str> {
    let mut state = shared_state.lock().await;
    let Some(pending) = state.as_mut() else {
        return Html("<h4>No authorization in progress.</h4>");
    };

    // A redirect that does not echo our state did not originate from our request.
    if params.get("state") != Some(&pending.csrf_state) {
        warning!("Ignoring OAuth redirect with unexpected state parameter.");
        return Html("<h4>Unexpected authorization response.</h4>");
    }

    if let Some(error) = params.get("error") {
        pending.error = Some(error.clone());
        return Html("<h4>Login failed.</h4>");
    }

    match params.get("code") {
        Some(code) => {
            pending.code = Some(code.clone());
            Html("<h2>Authentication successful.</h2><p>Close browser window.</p>")
        }
        None => {
            pending.error = Some("redirect carried no authorization code".to_string());
            Html("<h4>Missing authorization code.</h4>")
        }
    }
}
