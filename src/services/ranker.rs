//! Nearest-neighbor ranking over the precomputed similarity matrix.

use std::cmp::Ordering;

use crate::catalog::{Catalog, SimilarityMatrix};
use crate::error::{AppError, AppResult};

/// Maximum number of neighbors returned per query
pub const TOP_N: usize = 5;

/// A ranked neighbor: its catalog row and similarity score to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    pub index: usize,
    pub score: f32,
}

/// Ranks the catalog by similarity to the movie with the given title.
///
/// Returns the `TOP_N` nearest neighbors in descending score order, ties
/// broken by catalog order, the query itself excluded. With fewer than
/// `TOP_N + 1` movies in the catalog, returns all `N - 1` neighbors.
///
/// Pure and deterministic: identical inputs produce identical output and
/// neither the catalog nor the matrix is mutated.
pub fn rank(
    title: &str,
    catalog: &Catalog,
    matrix: &SimilarityMatrix,
) -> AppResult<Vec<Neighbor>> {
    // The loader validates this at startup; re-check here so a mismatched
    // pair passed in directly cannot index out of bounds.
    if matrix.dim() != catalog.len() {
        return Err(AppError::CorruptData(format!(
            "similarity matrix dimension {} does not match catalog length {}",
            matrix.dim(),
            catalog.len()
        )));
    }

    let query = catalog
        .resolve(title)
        .ok_or_else(|| AppError::NotFound(format!("movie not found: {}", title)))?;

    let row = matrix.row(query).ok_or_else(|| {
        AppError::CorruptData(format!("similarity row {} out of bounds", query))
    })?;

    let mut scored: Vec<Neighbor> = row
        .iter()
        .enumerate()
        .map(|(index, &score)| Neighbor { index, score })
        .collect();

    // Stable sort, so equal scores keep their catalog order.
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

    // Self-similarity is maximal by construction, so the head of the sorted
    // sequence must be the query row. Anything else means the matrix does
    // not belong to this catalog.
    match scored.first() {
        Some(head) if head.index == query => {}
        _ => {
            return Err(AppError::CorruptData(format!(
                "self-similarity for row {} is not maximal, similarity matrix is malformed",
                query
            )))
        }
    }

    Ok(scored.into_iter().skip(1).take(TOP_N).collect())
}
