use std::sync::Arc;

use axum::{
    extract::{Form, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};
use tracing::info;

use crate::{
    AppState,
    error::AppResult,
    models::{EditForm, FindQuery, IdQuery, SelectForm},
    templates,
};

pub async fn home(State(state): State<Arc<AppState>>) -> AppResult<Html<String>> {
    let mut movies = state.store.recompute_rankings().await?;
    // Displayed worst-ranked first.
    movies.reverse();
    Ok(Html(templates::index_page(&movies)))
}

pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Html<String>> {
    let movie = state.store.get_or_not_found(q.id).await?;
    let form = EditForm {
        new_rating: movie.rating.map(|r| r.to_string()).unwrap_or_default(),
        new_review: movie.review.clone().unwrap_or_default(),
    };
    Ok(Html(templates::edit_page(&movie, &form, None)))
}

pub async fn edit_submit(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
    Form(form): Form<EditForm>,
) -> AppResult<Response> {
    let movie = state.store.get_or_not_found(q.id).await?;

    match form.validate() {
        Ok(update) => {
            state.store.update_review(movie.id, update).await?;
            Ok(Redirect::to("/").into_response())
        },
        Err(message) => {
            let body = templates::edit_page(&movie, &form, Some(&message));
            Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response())
        },
    }
}

pub async fn delete(
    State(state): State<Arc<AppState>>,
    Query(q): Query<IdQuery>,
) -> AppResult<Redirect> {
    state.store.delete(q.id).await?;
    info!(movie_id = q.id, "movie deleted");
    Ok(Redirect::to("/"))
}

pub async fn add() -> Html<String> {
    Html(templates::add_page(None))
}

pub async fn select(
    State(state): State<Arc<AppState>>,
    Form(form): Form<SelectForm>,
) -> AppResult<Response> {
    let title = form.movie_title.trim();
    if title.is_empty() {
        let body = templates::add_page(Some("Enter a movie title to search for"));
        return Ok((StatusCode::UNPROCESSABLE_ENTITY, Html(body)).into_response());
    }

    let results = state.tmdb.search(title).await?;
    let body = templates::select_page(title, &results, &state.config.tmdb_image_base_url);
    Ok(Html(body).into_response())
}

pub async fn find(
    State(state): State<Arc<AppState>>,
    Query(q): Query<FindQuery>,
) -> AppResult<Redirect> {
    let details = state.tmdb.movie_details(q.id_json).await?;
    let new_movie = details.into_new_movie(&state.config.tmdb_image_base_url);
    let movie = state.store.insert(new_movie).await?;

    info!(movie_id = movie.id, tmdb_id = q.id_json, title = %movie.title, "movie imported");
    Ok(Redirect::to(&format!("/edit?id={}", movie.id)))
}
