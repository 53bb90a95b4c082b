//! TMDB (The Movie Database) v3 provider
//!
//! API Flow:
//! 1. Poster: /movie/{id}?language=en-US → `poster_path`, joined onto the image CDN base
//! 2. Details: /movie/{id} → rating, release date, genres, runtime, ...
//! 3. Credits: /movie/{id}/credits → cast, of which the first five are kept
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    cached,
    config::Config,
    db::{Cache, CacheKey},
    error::{AppError, AppResult},
    models::{MovieDetails, TmdbCredits, TmdbMovie},
    services::providers::MetadataEnricher,
};

const POSTER_CACHE_TTL: u64 = 604800; // 1 week
const DETAILS_CACHE_TTL: u64 = 86400; // 1 day

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_base_url: String,
    cache: Option<Cache>,
}

impl TmdbProvider {
    pub fn new(
        http_client: HttpClient,
        api_key: String,
        api_url: String,
        image_base_url: String,
        cache: Option<Cache>,
    ) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            image_base_url,
            cache,
        }
    }

    /// Builds a provider from configuration with a timeout-bounded HTTP client
    pub fn from_config(config: &Config, cache: Option<Cache>) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()?;

        Ok(Self::new(
            http_client,
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            cache,
        ))
    }

    /// Joins a provider poster path onto the image CDN base
    fn poster_url(&self, poster_path: &str) -> String {
        format!(
            "{}/{}",
            self.image_base_url.trim_end_matches('/'),
            poster_path.trim_start_matches('/')
        )
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_query: &[(&str, &str)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(extra_query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!(
                "TMDB returned status {} for {}: {}",
                status, path, body
            )));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(error = %e, path = %path, "Failed to deserialize TMDB response");
            AppError::Upstream(format!("Failed to parse TMDB response for {}: {}", path, e))
        })
    }

    async fn resolve_poster(&self, movie_id: u64) -> AppResult<String> {
        let movie: TmdbMovie = self
            .get_json(&format!("/movie/{}", movie_id), &[("language", "en-US")])
            .await?;

        let poster_path = movie
            .poster_path
            .filter(|path| !path.is_empty())
            .ok_or_else(|| {
                AppError::Upstream(format!("TMDB has no poster for movie {}", movie_id))
            })?;

        Ok(self.poster_url(&poster_path))
    }

    async fn resolve_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        let movie: TmdbMovie = self.get_json(&format!("/movie/{}", movie_id), &[]).await?;

        let credits = match self
            .get_json::<TmdbCredits>(&format!("/movie/{}/credits", movie_id), &[])
            .await
        {
            Ok(credits) => Some(credits),
            Err(e) => {
                tracing::warn!(error = %e, movie_id, "Credits unavailable, showing no cast");
                None
            }
        };

        let details = MovieDetails::from_tmdb(movie, credits);

        tracing::info!(
            movie_id,
            cast = details.cast.len(),
            provider = "tmdb",
            "Movie details fetched"
        );

        Ok(details)
    }
}

#[async_trait::async_trait]
impl MetadataEnricher for TmdbProvider {
    async fn fetch_poster(&self, movie_id: u64) -> AppResult<String> {
        cached!(
            self.cache.as_ref(),
            CacheKey::Poster(movie_id),
            POSTER_CACHE_TTL,
            async move { self.resolve_poster(movie_id).await }
        )
    }

    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        cached!(
            self.cache.as_ref(),
            CacheKey::Details(movie_id),
            DETAILS_CACHE_TTL,
            async move { self.resolve_details(movie_id).await }
        )
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
