use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::debug;

use crate::{error::AppResult, models::NewMovie};

pub struct TmdbClient {
    client: reqwest::Client,
    access_token: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl TmdbClient {
    pub fn new(client: reqwest::Client, access_token: String, base_url: String, rps: u32) -> Self {
        if access_token.trim().is_empty() {
            tracing::warn!("no API_KEY provided, TMDB requests will be rejected");
        }

        let limiter = Arc::new(RateLimiter::direct(Quota::per_second(
            NonZeroU32::new(rps.max(1)).unwrap_or(NonZeroU32::MIN),
        )));
        Self { client, access_token, base_url, limiter }
    }

    pub async fn search(&self, title: &str) -> AppResult<Vec<SearchResult>> {
        self.limiter.until_ready().await;

        let url = format!("{}/search/movie", self.base_url.trim_end_matches('/'));
        let resp: SearchResponse = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .query(&[("query", title)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(title = %title, count = resp.results.len(), "searched TMDB");
        Ok(resp.results)
    }

    pub async fn movie_details(&self, tmdb_id: i32) -> AppResult<MovieDetails> {
        self.limiter.until_ready().await;

        let url = format!("{}/movie/{}", self.base_url.trim_end_matches('/'), tmdb_id);
        let details: MovieDetails = self
            .client
            .get(url)
            .bearer_auth(&self.access_token)
            .header(ACCEPT, "application/json")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!(tmdb_id = tmdb_id, title = %details.title, "fetched TMDB movie");
        Ok(details)
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    results: Vec<SearchResult>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SearchResult {
    pub id: i32,
    pub title: String,
    pub poster_path: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct MovieDetails {
    pub id: i32,
    pub title: String,
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    pub poster_path: Option<String>,
}

impl SearchResult {
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        poster_url(image_base_url, self.poster_path.as_deref())
    }
}

impl MovieDetails {
    pub fn into_new_movie(self, image_base_url: &str) -> NewMovie {
        let img_url = poster_url(image_base_url, self.poster_path.as_deref()).unwrap_or_default();

        NewMovie {
            title: self.title,
            year: self.release_date.unwrap_or_default(),
            description: self.overview.unwrap_or_default(),
            img_url,
        }
    }
}

fn poster_url(image_base_url: &str, poster_path: Option<&str>) -> Option<String> {
    poster_path
        .filter(|path| !path.is_empty())
        .map(|path| format!("{}{}", image_base_url.trim_end_matches('/'), path))
}
