/// Movie metadata provider abstraction
///
/// Poster and rating data comes from a remote metadata service. The trait
/// keeps the HTTP details swappable and gives tests a seam. Its contract is
/// deliberately infallible: a recommendation must never be lost because its
/// poster could not be fetched, so failures degrade to placeholder values
/// inside the provider.
use crate::models::MovieDetails;

pub mod tmdb;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch poster URL and rating for a movie identifier.
    ///
    /// Never fails: transport errors, bad statuses, and unparseable bodies
    /// all yield placeholder details.
    async fn fetch_details(&self, movie_id: u32) -> MovieDetails;

    /// Fetch details for multiple movies in parallel.
    ///
    /// Default implementation spawns one task per id. The returned sequence
    /// matches the input order regardless of completion order, so callers
    /// can zip it back against their ranked ids.
    async fn fetch_details_batch(&self, movie_ids: Vec<u32>) -> Vec<MovieDetails> {
        let mut tasks = Vec::with_capacity(movie_ids.len());

        for movie_id in movie_ids {
            let provider = self.clone_for_task();
            let task = tokio::spawn(async move { provider.fetch_details(movie_id).await });
            tasks.push(task);
        }

        let mut details = Vec::with_capacity(tasks.len());
        for task in tasks {
            match task.await {
                Ok(fetched) => details.push(fetched),
                Err(e) => {
                    tracing::error!(error = %e, "Metadata fetch task join error");
                    details.push(MovieDetails::fetch_failed());
                }
            }
        }

        details
    }

    /// Clone provider for parallel task execution
    ///
    /// Required because providers need to be moved into tokio tasks.
    fn clone_for_task(&self) -> Box<dyn MetadataProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
