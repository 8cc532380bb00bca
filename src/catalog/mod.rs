//! Loading and validation of the precomputed recommendation artifacts.
//!
//! Two bincode blobs are produced offline: the ordered movie catalog and the
//! square similarity matrix. Both are loaded once at startup, validated
//! against each other, and held read-only for the process lifetime.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::models::Movie;

/// Ordered movie catalog with a precomputed title lookup.
///
/// The title index is built once at construction so repeated title
/// resolution is O(1). When the same title appears more than once, the
/// first occurrence wins.
#[derive(Debug, Clone)]
pub struct Catalog {
    movies: Vec<Movie>,
    title_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        let mut title_index = HashMap::with_capacity(movies.len());
        for (row, movie) in movies.iter().enumerate() {
            title_index.entry(movie.title.clone()).or_insert(row);
        }
        Self {
            movies,
            title_index,
        }
    }

    /// Resolve a title to its matrix row index by exact match
    pub fn resolve(&self, title: &str) -> Option<usize> {
        self.title_index.get(title).copied()
    }

    pub fn movie(&self, row: usize) -> Option<&Movie> {
        self.movies.get(row)
    }

    /// All movies in catalog order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Square table of pairwise similarity scores, entry (i, j) = similarity
/// between movie i and movie j. Immutable after load.
#[derive(Debug, Clone)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Wraps raw rows, rejecting non-square input
    pub fn new(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let dim = rows.len();
        if let Some(bad) = rows.iter().position(|row| row.len() != dim) {
            return Err(AppError::CorruptData(format!(
                "similarity matrix is not square: row {} has {} columns, expected {}",
                bad,
                rows[bad].len(),
                dim
            )));
        }
        Ok(Self { rows })
    }

    pub fn dim(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(Vec::as_slice)
    }
}

/// The two loaded artifacts, cross-validated.
///
/// Constructed once at process start and shared behind an `Arc`; there is
/// exactly one instance by construction and nothing ever mutates it.
#[derive(Debug, Clone)]
pub struct CatalogStore {
    pub catalog: Catalog,
    pub matrix: SimilarityMatrix,
}

impl CatalogStore {
    pub fn new(catalog: Catalog, matrix: SimilarityMatrix) -> AppResult<Self> {
        if catalog.len() != matrix.dim() {
            return Err(AppError::Load(format!(
                "corrupt catalog: {} movies but similarity matrix dimension is {}",
                catalog.len(),
                matrix.dim()
            )));
        }
        Ok(Self { catalog, matrix })
    }

    /// Loads and validates both artifacts
    pub fn load(catalog_path: &Path, similarity_path: &Path) -> AppResult<Self> {
        let catalog = load_catalog(catalog_path)?;
        let matrix = load_matrix(similarity_path)?;
        let store = Self::new(catalog, matrix)?;

        tracing::info!(
            movies = store.catalog.len(),
            matrix_dim = store.matrix.dim(),
            "Catalog store ready"
        );

        Ok(store)
    }
}

/// Loads the movie catalog from a bincode blob
pub fn load_catalog(path: &Path) -> AppResult<Catalog> {
    let data = read_blob(path, "catalog")?;
    let movies: Vec<Movie> = bincode::deserialize(&data).map_err(|e| {
        AppError::Load(format!(
            "failed to deserialize catalog {}: {}",
            path.display(),
            e
        ))
    })?;

    tracing::info!(
        movies = movies.len(),
        path = %path.display(),
        "Loaded movie catalog"
    );

    Ok(Catalog::new(movies))
}

/// Loads the similarity matrix from a bincode blob
pub fn load_matrix(path: &Path) -> AppResult<SimilarityMatrix> {
    let data = read_blob(path, "similarity matrix")?;
    let rows: Vec<Vec<f32>> = bincode::deserialize(&data).map_err(|e| {
        AppError::Load(format!(
            "failed to deserialize similarity matrix {}: {}",
            path.display(),
            e
        ))
    })?;

    let matrix = SimilarityMatrix::new(rows)
        .map_err(|e| AppError::Load(format!("{}: {}", path.display(), e)))?;

    tracing::info!(
        matrix_dim = matrix.dim(),
        path = %path.display(),
        "Loaded similarity matrix"
    );

    Ok(matrix)
}

// File-not-found gets its own message so startup failures name the missing
// artifact rather than a generic io error.
fn read_blob(path: &Path, what: &str) -> AppResult<Vec<u8>> {
    std::fs::read(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => {
            AppError::Load(format!("{} file not found: {}", what, path.display()))
        }
        _ => AppError::Load(format!(
            "failed to read {} file {}: {}",
            what,
            path.display(),
            e
        )),
    })
}
