//! Configuration loading for both services.

mod loader;
mod types;

pub use loader::ConfigError;
pub use types::{Config, DeliveryConfig, RenderConfig, SiteConfig};
