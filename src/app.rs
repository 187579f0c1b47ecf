use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route(
            "/api/habits/:id",
            patch(handlers::update_habit).delete(handlers::delete_habit),
        )
        .route("/api/habits/:id/heatmap", get(handlers::get_habit_heatmap))
        .route("/api/entries/toggle", post(handlers::toggle_entry))
        .route("/api/dashboard", get(handlers::get_dashboard))
        .with_state(state)
}
