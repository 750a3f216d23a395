use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

/// Values printed by the page layout, plus where posts live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Document title (default: "My blog").
    #[serde(default = "default_title")]
    pub title: String,
    /// Name shown in the footer.
    #[serde(default = "default_author")]
    pub author: String,
    /// Copyright year; the current UTC year when unset.
    #[serde(default)]
    pub year: Option<i32>,
    /// Directory of `<slug>.txt` posts (default: "./posts").
    #[serde(default = "default_posts_dir")]
    pub posts_dir: PathBuf,
}

/// Render service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Bind address (host:port).
    #[serde(default = "default_render_bind_addr")]
    pub bind_addr: String,
}

/// Delivery service settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    /// Bind address (host:port).
    #[serde(default = "default_delivery_bind_addr")]
    pub bind_addr: String,
    /// Base URL of the render service (scheme + host + port).
    #[serde(default = "default_render_url")]
    pub render_url: String,
    /// Connection timeout in seconds (default: 5).
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Total timeout for a render service call in seconds (default: 30).
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Query parameter marking a navigation (data only) request.
    #[serde(default = "default_navigation_param")]
    pub navigation_param: String,
    /// Path the client runtime is served from.
    #[serde(default = "default_client_script_path")]
    pub client_script_path: String,
    /// Serve this file as the client runtime instead of the bundled one.
    #[serde(default)]
    pub client_script_file: Option<PathBuf>,
    /// Bare module specifiers resolved by the page's import map.
    #[serde(default = "default_import_map")]
    pub import_map: BTreeMap<String, String>,
}

fn default_title() -> String {
    "My blog".to_string()
}

fn default_author() -> String {
    "Kai Phan".to_string()
}

fn default_posts_dir() -> PathBuf {
    PathBuf::from("./posts")
}

fn default_render_bind_addr() -> String {
    "127.0.0.1:8081".to_string()
}

fn default_delivery_bind_addr() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_render_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_connect_timeout() -> u32 {
    5
}

fn default_timeout() -> u32 {
    30
}

fn default_navigation_param() -> String {
    "jsx".to_string()
}

fn default_client_script_path() -> String {
    "/client.js".to_string()
}

fn default_import_map() -> BTreeMap<String, String> {
    BTreeMap::from([
        ("react".to_string(), "https://esm.sh/react@canary".to_string()),
        (
            "react-dom/client".to_string(),
            "https://esm.sh/react-dom@canary/client".to_string(),
        ),
    ])
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            author: default_author(),
            year: None,
            posts_dir: default_posts_dir(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_render_bind_addr(),
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_delivery_bind_addr(),
            render_url: default_render_url(),
            connect_timeout_seconds: default_connect_timeout(),
            timeout_seconds: default_timeout(),
            navigation_param: default_navigation_param(),
            client_script_path: default_client_script_path(),
            client_script_file: None,
            import_map: default_import_map(),
        }
    }
}
