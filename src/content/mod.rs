//! Post storage consulted by page components.

mod fs;
mod memory;

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

pub use fs::FsContentStore;
pub use memory::MemoryContentStore;

/// Errors that can occur when reading posts.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Post '{slug}' not found")]
    NotFound {
        slug: String,
        #[source]
        source: Option<std::io::Error>,
    },

    #[error("Failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ContentError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ContentError::NotFound { .. })
    }
}

/// Read access to posts keyed by slug.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Text of the post stored under `slug`.
    async fn read(&self, slug: &str) -> Result<String, ContentError>;

    /// Every stored slug, sorted.
    async fn list(&self) -> Result<Vec<String>, ContentError>;
}

/// Returns the slug if it is safe to use as a flat file stem.
///
/// Only ASCII alphanumerics, `-` and `_` are accepted, which rules out path
/// separators and `..`.
pub fn sanitize_slug(slug: &str) -> Option<&str> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then_some(slug)
}
