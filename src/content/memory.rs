use std::collections::BTreeMap;

use async_trait::async_trait;

use super::{ContentError, ContentStore};

/// In-memory post store.
#[derive(Debug, Clone, Default)]
pub struct MemoryContentStore {
    posts: BTreeMap<String, String>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, slug: impl Into<String>, content: impl Into<String>) -> Self {
        self.posts.insert(slug.into(), content.into());
        self
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn read(&self, slug: &str) -> Result<String, ContentError> {
        self.posts
            .get(slug)
            .cloned()
            .ok_or_else(|| ContentError::NotFound {
                slug: slug.to_string(),
                source: None,
            })
    }

    async fn list(&self) -> Result<Vec<String>, ContentError> {
        Ok(self.posts.keys().cloned().collect())
    }
}
