pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod templates;
pub mod tmdb;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{config::Config, store::MovieStore, tmdb::TmdbClient};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MovieStore,
    pub tmdb: Arc<TmdbClient>,
}

pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(routes::home))
        .route("/edit", get(routes::edit_page).post(routes::edit_submit))
        .route("/delete", get(routes::delete))
        .route("/add", get(routes::add))
        .route("/select-movie", post(routes::select))
        .route("/find-movie", get(routes::find))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
