use crate::webserver::state::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;

pub mod status;
pub mod ws;

pub fn create_router(state: Arc<AppState>) -> Router {
    let wall_route = state.config.wall_route();

    Router::new()
        .route(&wall_route, get(ws::ws_handler))
        .nest("/api", status::routes())
        .with_state(state)
}
