use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use super::{sanitize_slug, ContentError, ContentStore};

const POST_EXTENSION: &str = "txt";

/// Flat directory of `<slug>.txt` files.
#[derive(Debug, Clone)]
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn post_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.{POST_EXTENSION}"))
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn read(&self, slug: &str) -> Result<String, ContentError> {
        let Some(slug) = sanitize_slug(slug) else {
            tracing::debug!(slug, "Rejected unsafe slug");
            return Err(ContentError::NotFound {
                slug: slug.to_string(),
                source: None,
            });
        };

        let path = self.post_path(slug);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(content),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(ContentError::NotFound {
                slug: slug.to_string(),
                source: Some(e),
            }),
            Err(e) => Err(ContentError::Io { path, source: e }),
        }
    }

    async fn list(&self) -> Result<Vec<String>, ContentError> {
        let io_err = |source| ContentError::Io {
            path: self.root.clone(),
            source,
        };

        let mut entries = tokio::fs::read_dir(&self.root).await.map_err(io_err)?;
        let mut slugs = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(io_err)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(POST_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                if sanitize_slug(stem).is_some() {
                    slugs.push(stem.to_string());
                }
            }
        }
        slugs.sort();
        Ok(slugs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_with(posts: &[(&str, &str)]) -> (TempDir, FsContentStore) {
        let dir = TempDir::new().unwrap();
        for (name, body) in posts {
            std::fs::write(dir.path().join(name), body).unwrap();
        }
        let store = FsContentStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn reads_existing_post() {
        let (_dir, store) = store_with(&[("hello-world.txt", "Hello <world>")]);
        assert_eq!(store.read("hello-world").await.unwrap(), "Hello <world>");
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let (_dir, store) = store_with(&[]);
        let err = store.read("missing").await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn unsafe_slug_is_not_found() {
        let (_dir, store) = store_with(&[("secret.txt", "x")]);
        let err = store.read("../secret").await.unwrap_err();
        assert!(matches!(err, ContentError::NotFound { source: None, .. }));
    }

    #[tokio::test]
    async fn lists_sorted_txt_stems_only() {
        let (_dir, store) = store_with(&[
            ("zeta.txt", "z"),
            ("alpha.txt", "a"),
            ("notes.md", "ignored"),
        ]);
        assert_eq!(store.list().await.unwrap(), ["alpha", "zeta"]);
    }
}
