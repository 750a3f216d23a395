//! Delivery service: fetches wire text from the render service and turns it
//! into a hydratable HTML document, or relays it for navigation requests.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::header::CONTENT_TYPE;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use tracing::Instrument;
use uuid::Uuid;

use crate::codec;
use crate::config::DeliveryConfig;
use crate::html::to_html;
use crate::service::error::{DeliveryError, ErrorResponse};
use crate::service::upstream::RenderClient;

/// Bundled client runtime, served unless a file override is configured.
pub const CLIENT_SCRIPT: &str = include_str!("../../assets/client.js");

/// Global the embedded wire text is assigned to.
pub const INITIAL_TREE_GLOBAL: &str = "__INITIAL_CLIENT_TREE_STRING__";

const FAVICON_PATH: &str = "/favicon.ico";

#[derive(Clone)]
pub struct DeliveryService {
    inner: Arc<DeliveryInner>,
}

struct DeliveryInner {
    config: DeliveryConfig,
    client: RenderClient,
}

impl DeliveryService {
    pub fn new(config: DeliveryConfig) -> Result<Self, DeliveryError> {
        let client = RenderClient::new(&config)?;
        Ok(Self {
            inner: Arc::new(DeliveryInner { config, client }),
        })
    }

    pub fn router(self) -> Router {
        Router::new().fallback(handle_delivery).with_state(self)
    }

    /// Answers one request for `path`; `navigation` requests get the wire text.
    pub async fn deliver(&self, path: &str, navigation: bool) -> Result<Response, DeliveryError> {
        let config = &self.inner.config;

        if path == FAVICON_PATH {
            return Ok(StatusCode::OK.into_response());
        }
        if path == config.client_script_path {
            return self.client_script().await;
        }

        let wire = self.inner.client.fetch(path).await?;
        if navigation {
            tracing::debug!("Relaying navigation payload");
            return Ok(([(CONTENT_TYPE, "application/json")], wire).into_response());
        }

        let tree = codec::decode(&wire)?;
        let markup = to_html(tree).await?;
        let document = self.document(markup, &wire)?;
        Ok(([(CONTENT_TYPE, "text/html; charset=utf-8")], document).into_response())
    }

    /// Markup followed by the client bootstrap and the embedded wire text.
    fn document(&self, markup: String, wire: &str) -> Result<String, DeliveryError> {
        let config = &self.inner.config;
        let import_map = serde_json::to_string_pretty(&serde_json::json!({
            "imports": config.import_map,
        }))?;

        let mut html = markup;
        html.push_str(&format!(
            "\n<script type=\"importmap\">\n{}\n</script>\n",
            escape_script_literal(&import_map)
        ));
        html.push_str(&format!(
            "<script type=\"module\" src=\"{}\"></script>\n",
            config.client_script_path
        ));
        html.push_str(&format!(
            "<script>window.{} = {}</script>",
            INITIAL_TREE_GLOBAL,
            escape_script_literal(&serde_json::to_string(wire)?)
        ));
        Ok(html)
    }

    async fn client_script(&self) -> Result<Response, DeliveryError> {
        let script = match &self.inner.config.client_script_file {
            Some(path) => tokio::fs::read_to_string(path).await.map_err(|source| {
                DeliveryError::ClientScript {
                    path: path.clone(),
                    source,
                }
            })?,
            None => CLIENT_SCRIPT.to_string(),
        };
        Ok(([(CONTENT_TYPE, "text/javascript")], script).into_response())
    }
}

/// Keeps `</script>` sequences inside an inline script from closing the tag.
pub fn escape_script_literal(json: &str) -> String {
    json.replace('<', "\\u003c")
}

async fn handle_delivery(
    State(service): State<DeliveryService>,
    Query(query): Query<HashMap<String, String>>,
    uri: Uri,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("deliver", %request_id, path = %uri.path());
    let navigation = query.contains_key(&service.inner.config.navigation_param);

    async move {
        match service.deliver(uri.path(), navigation).await {
            Ok(response) => {
                tracing::info!(status = %response.status(), navigation, "Delivered");
                response
            }
            Err(err @ DeliveryError::Upstream { .. }) => {
                tracing::info!(error = %err, "Render service declined");
                ErrorResponse::from_delivery(&err)
            }
            Err(err) => {
                tracing::error!(error = %err, "Delivery failed");
                ErrorResponse::from_delivery(&err)
            }
        }
    }
    .instrument(span)
    .await
}
