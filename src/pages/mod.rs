//! The blog's page tree: a router over the index page and post pages.
//!
//! Every page is built fresh per request from a [`Site`], which carries the
//! content store and the values the layout prints (title, author, year).

mod components;

use std::sync::Arc;

use crate::content::ContentStore;
use crate::element::{ComponentElement, UiValue};

pub use components::{BlogIndex, Footer, Layout, PostPage, RouterPage};

/// Everything page components need to render.
pub struct Site {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub content: Arc<dyn ContentStore>,
}

impl Site {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        year: i32,
        content: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            content,
        }
    }
}

/// The unresolved page tree for a request path.
pub fn page_for(path: &str, site: Arc<Site>) -> UiValue {
    ComponentElement::new(Arc::new(RouterPage::new(site)))
        .prop("path", path)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::MemoryContentStore;
    use crate::html::to_html;

    fn site() -> Arc<Site> {
        let store = MemoryContentStore::new()
            .with_post("hello-world", "Hello <world>")
            .with_post("second", "More words");
        Arc::new(Site::new("My blog", "Kai Phan", 2024, Arc::new(store)))
    }

    #[tokio::test]
    async fn post_page_renders_inside_layout() {
        let html = to_html(page_for("/hello-world", site())).await.unwrap();
        assert!(html.starts_with("<html><head><title>My blog</title></head><body><nav>"));
        assert!(html.contains(
            "<main><section><h2><a href=\"/hello-world\">hello-world</a></h2>\
             <article>Hello &lt;world&gt;</article></section></main>"
        ));
        assert!(html.contains("<footer><hr></hr><p><i>(c) Kai Phan 2024</i></p></footer>"));
        assert!(html.ends_with("</body></html>"));
    }

    #[tokio::test]
    async fn index_lists_every_post_in_order() {
        let html = to_html(page_for("/", site())).await.unwrap();
        assert!(html.contains("<h1>Welcome to my blog</h1>"));
        let first = html.find("href=\"/hello-world\"").unwrap();
        let second = html.find("href=\"/second\"").unwrap();
        assert!(first < second);
        assert!(html.contains("<article>More words</article>"));
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let err = to_html(page_for("/missing", site())).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn nested_path_is_not_found() {
        let err = to_html(page_for("/a/b", site())).await.unwrap_err();
        assert!(err.is_not_found());
    }
}
