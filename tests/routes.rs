//! Router-level tests: a temporary SQLite file for the store and a
//! wiremock server standing in for TMDB.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use movieshelf::{
    AppState,
    config::Config,
    models::{NewMovie, RatingUpdate},
    store::MovieStore,
    tmdb::TmdbClient,
};
use serde_json::json;
use tempfile::TempDir;
use tower::ServiceExt;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

struct TestApp {
    _dir: TempDir,
    store: MovieStore,
    router: Router,
}

async fn setup(tmdb_url: &str) -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let database_url = format!("sqlite://{}?mode=rwc", dir.path().join("movies.db").display());
    let db = movieshelf::db::connect_and_migrate(&database_url).await.unwrap();
    let store = MovieStore::new(db);

    let config = Config {
        addr: "127.0.0.1:0".parse().unwrap(),
        database_url,
        api_key: "token".to_string(),
        tmdb_base_url: tmdb_url.to_string(),
        tmdb_image_base_url: "https://image.tmdb.org/t/p/w500".to_string(),
        tmdb_rps: 100,
    };
    let tmdb = TmdbClient::new(
        reqwest::Client::new(),
        config.api_key.clone(),
        config.tmdb_base_url.clone(),
        config.tmdb_rps,
    );

    let state =
        Arc::new(AppState { config: Arc::new(config), store: store.clone(), tmdb: Arc::new(tmdb) });
    TestApp { _dir: dir, store, router: movieshelf::app(state) }
}

fn new_movie(title: &str) -> NewMovie {
    NewMovie {
        title: title.to_string(),
        year: "2010-07-16".to_string(),
        description: "A heist in dreams.".to_string(),
        img_url: String::new(),
    }
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_to_string(body: Body) -> String {
    let bytes = body.collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn location(resp: &axum::response::Response) -> &str {
    resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
}

#[tokio::test]
async fn home_ranks_by_rating() {
    let app = setup("http://127.0.0.1:9").await;
    let a = app.store.insert(new_movie("Inception")).await.unwrap();
    let b = app.store.insert(new_movie("Memento")).await.unwrap();
    let c = app.store.insert(new_movie("Tenet")).await.unwrap();
    app.store.update_review(a.id, RatingUpdate { rating: 8.0, review: None }).await.unwrap();
    app.store.update_review(b.id, RatingUpdate { rating: 9.5, review: None }).await.unwrap();
    app.store.update_review(c.id, RatingUpdate { rating: 6.0, review: None }).await.unwrap();

    let resp = app.router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_to_string(resp.into_body()).await;

    let tenet = body.find("Tenet").unwrap();
    let inception = body.find("Inception").unwrap();
    let memento = body.find("Memento").unwrap();
    assert!(tenet < inception && inception < memento);

    let ranks: Vec<(i32, Option<i32>)> =
        app.store.list_by_rating().await.unwrap().iter().map(|m| (m.id, m.ranking)).collect();
    assert_eq!(ranks, vec![(b.id, Some(1)), (a.id, Some(2)), (c.id, Some(3))]);
}

#[tokio::test]
async fn delete_missing_is_not_found() {
    let app = setup("http://127.0.0.1:9").await;
    let resp = app.router.clone().oneshot(get("/delete?id=99")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_and_redirects() {
    let app = setup("http://127.0.0.1:9").await;
    let movie = app.store.insert(new_movie("Inception")).await.unwrap();

    let resp =
        app.router.clone().oneshot(get(&format!("/delete?id={}", movie.id))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");
    assert_eq!(app.store.get(movie.id).await.unwrap(), None);
}

#[tokio::test]
async fn edit_out_of_range_is_rejected() {
    let app = setup("http://127.0.0.1:9").await;
    let movie = app.store.insert(new_movie("Inception")).await.unwrap();
    let uri = format!("/edit?id={}", movie.id);

    let resp = app
        .router
        .clone()
        .oneshot(post_form(&uri, "new_rating=11&new_review=Great"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_to_string(resp.into_body()).await;
    assert!(body.contains("between 0 and 10"));

    let stored = app.store.get(movie.id).await.unwrap().unwrap();
    assert_eq!(stored, movie);
}

#[tokio::test]
async fn edit_updates_and_redirects_home() {
    let app = setup("http://127.0.0.1:9").await;
    let movie = app.store.insert(new_movie("Inception")).await.unwrap();
    let uri = format!("/edit?id={}", movie.id);

    let resp = app.router.clone().oneshot(get(&uri)).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = app
        .router
        .clone()
        .oneshot(post_form(&uri, "new_rating=7.5&new_review=Twisty"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let stored = app.store.get(movie.id).await.unwrap().unwrap();
    assert_eq!(stored.rating, Some(7.5));
    assert_eq!(stored.review.as_deref(), Some("Twisty"));
}

#[tokio::test]
async fn edit_missing_movie_is_not_found() {
    let app = setup("http://127.0.0.1:9").await;

    let resp = app.router.clone().oneshot(get("/edit?id=5")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = app.router.clone().oneshot(post_form("/edit?id=5", "new_rating=5")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn select_lists_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("query", "Heat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                {"id": 949, "title": "Heat", "poster_path": "/h.jpg",
                 "release_date": "1995-12-15", "overview": "Cops and robbers."}
            ]
        })))
        .mount(&server)
        .await;
    let app = setup(&server.uri()).await;

    let resp =
        app.router.clone().oneshot(post_form("/select-movie", "movie-title=Heat")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_to_string(resp.into_body()).await;
    assert!(body.contains("/find-movie?id_json=949"));
    assert!(body.contains("1995-12-15"));
}

#[tokio::test]
async fn select_blank_title_is_rejected() {
    let app = setup("http://127.0.0.1:9").await;
    let resp =
        app.router.clone().oneshot(post_form("/select-movie", "movie-title=++")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn find_imports_one_unrated_movie() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/949"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 949, "title": "Heat", "poster_path": "/h.jpg",
            "release_date": "1995-12-15", "overview": "Cops and robbers."
        })))
        .mount(&server)
        .await;
    let app = setup(&server.uri()).await;

    let resp = app.router.clone().oneshot(get("/find-movie?id_json=949")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let movies = app.store.list_by_rating().await.unwrap();
    assert_eq!(movies.len(), 1);
    let movie = &movies[0];
    assert_eq!(location(&resp), format!("/edit?id={}", movie.id));
    assert_eq!(movie.title, "Heat");
    assert_eq!(movie.year, "1995-12-15");
    assert_eq!(movie.img_url, "https://image.tmdb.org/t/p/w500/h.jpg");
    assert_eq!(movie.rating, None);
    assert_eq!(movie.review, None);

    let resp = app.router.clone().oneshot(get("/find-movie?id_json=949")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
    assert_eq!(app.store.list_by_rating().await.unwrap().len(), 1);
}

#[tokio::test]
async fn find_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/movie/1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let app = setup(&server.uri()).await;

    let resp = app.router.clone().oneshot(get("/find-movie?id_json=1")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    assert!(app.store.list_by_rating().await.unwrap().is_empty());
}

#[tokio::test]
async fn add_renders_search_form() {
    let app = setup("http://127.0.0.1:9").await;
    let resp = app.router.clone().oneshot(get("/add")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_to_string(resp.into_body()).await;
    assert!(body.contains(r#"action="/select-movie""#));
    assert!(body.contains(r#"name="movie-title""#));
}

#[tokio::test]
async fn malformed_ids_are_bad_requests() {
    let app = setup("http://127.0.0.1:9").await;

    for uri in ["/edit?id=abc", "/delete", "/delete?id=99999999999", "/find-movie?id_json=x"] {
        let resp = app.router.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
    }

    let resp = app.router.clone().oneshot(post_form("/edit", "new_rating=5")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
