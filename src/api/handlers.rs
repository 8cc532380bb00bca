use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::{Movie, RecommendationCard, SelectedMovie};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    title: String,
}

/// Catalog entry as returned by the movie listing
#[derive(Debug, Serialize)]
pub struct MovieSummary {
    pub id: u32,
    pub title: String,
}

impl From<&Movie> for MovieSummary {
    fn from(movie: &Movie) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
        }
    }
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// All catalog movies in catalog order, for populating a selection control
pub async fn list_movies(State(state): State<AppState>) -> Json<Vec<MovieSummary>> {
    let movies: Vec<MovieSummary> = state
        .store
        .catalog
        .movies()
        .iter()
        .map(MovieSummary::from)
        .collect();

    Json(movies)
}

/// Details for the selected movie: title, rating, poster, detail link
pub async fn movie_details(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<SelectedMovie>> {
    validate_title(&params.title)?;
    let selected = state.recommender.selected(&params.title).await?;
    Ok(Json(selected))
}

/// Up to five neighbor cards for a title, in descending similarity order
pub async fn recommendations(
    State(state): State<AppState>,
    Query(params): Query<TitleQuery>,
) -> AppResult<Json<Vec<RecommendationCard>>> {
    validate_title(&params.title)?;
    let cards = state.recommender.recommend(&params.title).await?;
    Ok(Json(cards))
}

// Lookup is by exact match, so the title is not trimmed or normalized here.
fn validate_title(title: &str) -> AppResult<()> {
    if title.trim().is_empty() {
        return Err(AppError::InvalidInput("title cannot be empty".to_string()));
    }
    Ok(())
}
