//! Assembles recommendation responses: similarity ranking plus metadata
//! decoration.

use std::sync::Arc;

use crate::{
    catalog::CatalogStore,
    error::{AppError, AppResult},
    models::{detail_url, Movie, RecommendationCard, SelectedMovie},
    services::{providers::MetadataProvider, ranker},
};

/// Recommendation service over the loaded catalog artifacts.
///
/// Holds the read-only store and a metadata provider; one instance is
/// constructed at startup and shared for the process lifetime.
pub struct Recommender {
    store: Arc<CatalogStore>,
    provider: Arc<dyn MetadataProvider>,
}

impl Recommender {
    pub fn new(store: Arc<CatalogStore>, provider: Arc<dyn MetadataProvider>) -> Self {
        Self { store, provider }
    }

    /// Top recommendations for a title, decorated with poster and rating.
    ///
    /// Metadata fetches for the neighbors run concurrently; the returned
    /// cards keep similarity-rank order no matter which fetch finishes
    /// first. A failed fetch degrades that one card to placeholders rather
    /// than aborting the request.
    pub async fn recommend(&self, title: &str) -> AppResult<Vec<RecommendationCard>> {
        let neighbors = ranker::rank(title, &self.store.catalog, &self.store.matrix)?;

        let movies: Vec<&Movie> = neighbors
            .iter()
            .map(|neighbor| {
                self.store.catalog.movie(neighbor.index).ok_or_else(|| {
                    AppError::Internal(format!("ranked index {} out of bounds", neighbor.index))
                })
            })
            .collect::<AppResult<_>>()?;

        let ids: Vec<u32> = movies.iter().map(|movie| movie.id).collect();
        let details = self.provider.fetch_details_batch(ids).await;

        let cards: Vec<RecommendationCard> = movies
            .into_iter()
            .zip(details)
            .map(|(movie, details)| RecommendationCard {
                title: movie.title.clone(),
                rating: details.rating,
                poster_url: details.poster_url,
                detail_url: detail_url(movie.id),
            })
            .collect();

        tracing::info!(
            query = %title,
            results = cards.len(),
            "Recommendations assembled"
        );

        Ok(cards)
    }

    /// Details for the selected movie itself
    pub async fn selected(&self, title: &str) -> AppResult<SelectedMovie> {
        let row = self
            .store
            .catalog
            .resolve(title)
            .ok_or_else(|| AppError::NotFound(format!("movie not found: {}", title)))?;

        let movie = self
            .store
            .catalog
            .movie(row)
            .ok_or_else(|| AppError::Internal(format!("catalog row {} out of bounds", row)))?;

        let details = self.provider.fetch_details(movie.id).await;

        Ok(SelectedMovie {
            title: movie.title.clone(),
            rating: details.rating,
            poster_url: details.poster_url,
            detail_url: detail_url(movie.id),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, SimilarityMatrix};
    use crate::models::{MovieDetails, Rating, FETCH_ERROR_POSTER_URL};
    use crate::services::providers::MockMetadataProvider;

    fn test_store() -> Arc<CatalogStore> {
        let catalog = Catalog::new(vec![
            Movie {
                id: 101,
                title: "Alpha".to_string(),
            },
            Movie {
                id: 102,
                title: "Beta".to_string(),
            },
            Movie {
                id: 103,
                title: "Gamma".to_string(),
            },
            Movie {
                id: 104,
                title: "Delta".to_string(),
            },
        ]);
        let matrix = SimilarityMatrix::new(vec![
            vec![1.0, 0.9, 0.1, 0.5],
            vec![0.9, 1.0, 0.2, 0.4],
            vec![0.1, 0.2, 1.0, 0.3],
            vec![0.5, 0.4, 0.3, 1.0],
        ])
        .unwrap();

        Arc::new(CatalogStore::new(catalog, matrix).unwrap())
    }

    fn details_for(id: u32) -> MovieDetails {
        MovieDetails {
            poster_url: format!("https://posters.test/{}.jpg", id),
            rating: Rating::Score(id as f64 / 20.0),
        }
    }

    #[tokio::test]
    async fn test_recommend_cards_follow_rank_order() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details_batch()
            .withf(|ids| ids == &[102, 104, 103])
            .returning(|ids| ids.into_iter().map(details_for).collect());

        let recommender = Recommender::new(test_store(), Arc::new(provider));
        let cards = recommender.recommend("Alpha").await.unwrap();

        let titles: Vec<&str> = cards.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Beta", "Delta", "Gamma"]);
        assert_eq!(cards[0].poster_url, "https://posters.test/102.jpg");
        assert_eq!(
            cards[0].detail_url,
            "https://www.themoviedb.org/movie/102"
        );
    }

    #[tokio::test]
    async fn test_recommend_single_failed_fetch_degrades_one_card() {
        let mut provider = MockMetadataProvider::new();
        provider.expect_fetch_details_batch().returning(|ids| {
            ids.into_iter()
                .map(|id| {
                    if id == 104 {
                        MovieDetails::fetch_failed()
                    } else {
                        details_for(id)
                    }
                })
                .collect()
        });

        let recommender = Recommender::new(test_store(), Arc::new(provider));
        let cards = recommender.recommend("Alpha").await.unwrap();

        // The failed fetch keeps its slot with placeholder values.
        assert_eq!(cards.len(), 3);
        assert_eq!(cards[1].title, "Delta");
        assert_eq!(cards[1].poster_url, FETCH_ERROR_POSTER_URL);
        assert_eq!(cards[1].rating, Rating::Unavailable);
        assert_eq!(cards[0].poster_url, "https://posters.test/102.jpg");
    }

    #[tokio::test]
    async fn test_recommend_unknown_title() {
        let provider = MockMetadataProvider::new();
        let recommender = Recommender::new(test_store(), Arc::new(provider));

        let err = recommender.recommend("Zeta").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_selected_movie_details() {
        let mut provider = MockMetadataProvider::new();
        provider
            .expect_fetch_details()
            .withf(|id| *id == 103)
            .returning(|id| details_for(id));

        let recommender = Recommender::new(test_store(), Arc::new(provider));
        let selected = recommender.selected("Gamma").await.unwrap();

        assert_eq!(selected.title, "Gamma");
        assert_eq!(selected.poster_url, "https://posters.test/103.jpg");
        assert_eq!(
            selected.detail_url,
            "https://www.themoviedb.org/movie/103"
        );
    }

    #[tokio::test]
    async fn test_selected_unknown_title() {
        let provider = MockMetadataProvider::new();
        let recommender = Recommender::new(test_store(), Arc::new(provider));

        let err = recommender.selected("Zeta").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
