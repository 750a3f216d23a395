//! Render service: page tree → resolved tree → wire text.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

use crate::codec;
use crate::config::Config;
use crate::content::FsContentStore;
use crate::error::RenderError;
use crate::pages::{page_for, Site};
use crate::resolve::resolve_for_transport;
use crate::service::error::ErrorResponse;

/// Stateless per request; owns content access through its [`Site`].
#[derive(Clone)]
pub struct RenderService {
    site: Arc<Site>,
}

impl RenderService {
    pub fn new(site: Arc<Site>) -> Self {
        Self { site }
    }

    /// Service reading posts from the configured directory.
    pub fn from_config(config: &Config) -> Self {
        let content = Arc::new(FsContentStore::new(&config.site.posts_dir));
        Self::new(Arc::new(Site::new(
            config.site.title.clone(),
            config.site.author.clone(),
            config.site_year(),
            content,
        )))
    }

    /// Wire text for the page at `path`.
    pub async fn render(&self, path: &str) -> Result<String, RenderError> {
        let tree = page_for(path, self.site.clone());
        let resolved = resolve_for_transport(tree).await?;
        Ok(codec::encode(&resolved)?)
    }

    pub fn router(self) -> Router {
        Router::new().fallback(handle_render).with_state(self)
    }
}

async fn handle_render(State(service): State<RenderService>, uri: Uri) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("render", %request_id, path = %uri.path());

    async move {
        match service.render(uri.path()).await {
            Ok(body) => {
                tracing::info!(bytes = body.len(), "Rendered");
                (StatusCode::OK, [(CONTENT_TYPE, "application/json")], body).into_response()
            }
            Err(err) if err.is_not_found() => {
                tracing::info!(error = %err, "Not found");
                ErrorResponse::from_render(&err)
            }
            Err(err) => {
                tracing::error!(error = %err, "Render failed");
                ErrorResponse::from_render(&err)
            }
        }
    }
    .instrument(span)
    .await
}
