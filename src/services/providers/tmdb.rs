/// TMDb metadata provider
///
/// Fetches per-movie details from `GET /movie/{id}` and maps them onto the
/// `MovieDetails` contract: a present `poster_path` becomes a CDN image URL,
/// an absent one becomes the no-poster placeholder, and any failure at the
/// transport or parse level becomes the fetch-error placeholder with an N/A
/// rating. Every fetch is bounded by the configured timeout.
use crate::{
    error::{AppError, AppResult},
    models::{MovieDetails, Rating, TmdbMovie, NO_POSTER_URL},
    services::providers::MetadataProvider,
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const POSTER_SIZE: &str = "w300";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    image_url: String,
}

impl TmdbProvider {
    /// Creates a provider with a bounded per-request timeout
    pub fn new(
        api_key: String,
        api_url: String,
        image_url: String,
        timeout: Duration,
    ) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url,
            image_url,
        })
    }

    /// The fallible inner fetch; `fetch_details` turns its errors into
    /// placeholders.
    async fn try_fetch(&self, movie_id: u32) -> AppResult<TmdbMovie> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", "en-US")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDb API returned status {}: {}",
                status, body
            )));
        }

        Ok(response.json().await?)
    }

    /// Convert the raw TMDb response to our details model
    fn convert_details(&self, movie: TmdbMovie) -> MovieDetails {
        let poster_url = match movie.poster_path.as_deref() {
            Some(path) if !path.is_empty() => {
                format!("{}/{}{}", self.image_url, POSTER_SIZE, path)
            }
            _ => NO_POSTER_URL.to_string(),
        };

        MovieDetails {
            poster_url,
            rating: Rating::from(movie.vote_average),
        }
    }
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn fetch_details(&self, movie_id: u32) -> MovieDetails {
        match self.try_fetch(movie_id).await {
            Ok(raw) => {
                let details = self.convert_details(raw);
                tracing::debug!(
                    movie_id,
                    rating = %details.rating,
                    provider = "tmdb",
                    "Details fetched"
                );
                details
            }
            Err(e) => {
                tracing::warn!(
                    movie_id,
                    error = %e,
                    provider = "tmdb",
                    "Metadata fetch failed, substituting placeholders"
                );
                MovieDetails::fetch_failed()
            }
        }
    }

    fn clone_for_task(&self) -> Box<dyn MetadataProvider> {
        Box::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
