use axum::{Extension, Router, routing::get};
use std::sync::Arc;
use tokio::{net::TcpListener, sync::Mutex};

use crate::{api, types::PendingAuthorization};

pub fn callback_router(state: Arc<Mutex<Option<PendingAuthorization>>>) -> Router {
    Router::new().route("/", get(api::callback).layer(Extension(state)))
}

/// Serves the OAuth redirect on an already bound listener until aborted.
pub async fn serve_callback(
    listener: TcpListener,
    state: Arc<Mutex<Option<PendingAuthorization>>>,
) -> std::io::Result<()> {
    axum::serve(listener, callback_router(state)).await
}
