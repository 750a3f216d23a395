//! Shared test utilities: temp post stores and running services.

#![allow(dead_code, unused_imports)]

pub mod mock_render;

use blogtree::config::{Config, DeliveryConfig, RenderConfig, SiteConfig};
use blogtree::service::{DeliveryService, RenderService, Server, ServerHandle};
use std::net::SocketAddr;
use tempfile::TempDir;

/// Write `<slug>.txt` posts into a fresh temp directory.
pub fn posts_dir(posts: &[(&str, &str)]) -> TempDir {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for (slug, text) in posts {
        std::fs::write(dir.path().join(format!("{slug}.txt")), text)
            .expect("Failed to write post");
    }
    dir
}

/// Config pointing at `posts`, both services on ephemeral ports.
pub fn test_config(posts: &TempDir, render_url: &str) -> Config {
    Config {
        site: SiteConfig {
            year: Some(2024),
            posts_dir: posts.path().to_path_buf(),
            ..SiteConfig::default()
        },
        render: RenderConfig {
            bind_addr: "127.0.0.1:0".to_string(),
        },
        delivery: DeliveryConfig {
            bind_addr: "127.0.0.1:0".to_string(),
            render_url: render_url.to_string(),
            connect_timeout_seconds: 2,
            timeout_seconds: 5,
            ..DeliveryConfig::default()
        },
    }
}

pub struct Running {
    pub addr: SocketAddr,
    handle: ServerHandle,
}

impl Running {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

impl Drop for Running {
    fn drop(&mut self) {
        self.handle.shutdown();
    }
}

pub async fn start_render(config: &Config) -> Running {
    let server = Server::bind("render", &config.render.bind_addr)
        .await
        .expect("Failed to bind render service");
    let addr = server.addr();
    let handle = server.handle();
    let router = RenderService::from_config(config).router();
    tokio::spawn(async move {
        let _ = server.run(router).await;
    });
    Running { addr, handle }
}

pub async fn start_delivery(config: &Config) -> Running {
    let server = Server::bind("delivery", &config.delivery.bind_addr)
        .await
        .expect("Failed to bind delivery service");
    let addr = server.addr();
    let handle = server.handle();
    let router = DeliveryService::new(config.delivery.clone())
        .expect("Failed to create delivery service")
        .router();
    tokio::spawn(async move {
        let _ = server.run(router).await;
    });
    Running { addr, handle }
}

/// Render and delivery services wired together over `posts`.
pub async fn start_both(posts: &TempDir) -> (Running, Running) {
    let render_config = test_config(posts, "http://unused");
    let render = start_render(&render_config).await;
    let delivery_config = test_config(posts, &format!("http://{}", render.addr));
    let delivery = start_delivery(&delivery_config).await;
    (render, delivery)
}

/// Pull the JSON string literal assigned to the initial-tree global.
pub fn embedded_wire(document: &str) -> String {
    let prefix = format!(
        "<script>window.{} = ",
        blogtree::service::delivery::INITIAL_TREE_GLOBAL
    );
    let start = document.find(&prefix).expect("no embedded tree") + prefix.len();
    let end = document[start..].find("</script>").expect("unterminated script") + start;
    serde_json::from_str(&document[start..end]).expect("embedded tree is not a JSON string")
}
