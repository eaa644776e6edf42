use std::fmt;

/// Why a candidate recipe was judged a duplicate
#[derive(Debug, Clone, PartialEq)]
pub enum DuplicateReason {
    SameTitle,
    SimilarTitle(f64),
    SimilarIngredients(f64),
}

impl fmt::Display for DuplicateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SameTitle => write!(f, "same title"),
            Self::SimilarTitle(score) => write!(f, "title similarity {:.2}", score),
            Self::SimilarIngredients(score) => write!(f, "ingredient similarity {:.2}", score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate of recipe {existing_id} ({reason})")]
    DuplicateRecipe {
        existing_id: String,
        reason: DuplicateReason,
    },

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Failures of the blob store backend. Never surfaced by store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(#[from] r2d2::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
