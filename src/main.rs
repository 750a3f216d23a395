use std::path::PathBuf;

use anyhow::Context;
use blogtree::config::Config;
use blogtree::service::{init_tracing, DeliveryService, RenderService, Server};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "blogtree")]
#[command(about = "Blog served as a resolved UI tree by a render and a delivery service")]
struct Cli {
    /// Config file (default: <config dir>/blogtree/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the render service (page tree → wire text)
    Render {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<String>,
    },
    /// Run the delivery service (wire text → HTML)
    Deliver {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<String>,
        /// Override the render service URL
        #[arg(long)]
        render_url: Option<String>,
    },
    /// Run both services in one process
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    }
    .context("Failed to load configuration")?;

    match cli.command {
        Command::Render { bind } => {
            if let Some(bind) = bind {
                config.render.bind_addr = bind;
            }
            run_render(&config).await
        }
        Command::Deliver { bind, render_url } => {
            if let Some(bind) = bind {
                config.delivery.bind_addr = bind;
            }
            if let Some(url) = render_url {
                config.delivery.render_url = url;
            }
            run_delivery(&config).await
        }
        Command::Serve => {
            tokio::try_join!(run_render(&config), run_delivery(&config))?;
            Ok(())
        }
    }
}

async fn run_render(config: &Config) -> anyhow::Result<()> {
    let server = Server::bind("render", &config.render.bind_addr).await?;
    let service = RenderService::from_config(config);
    server.run(service.router()).await?;
    Ok(())
}

async fn run_delivery(config: &Config) -> anyhow::Result<()> {
    let server = Server::bind("delivery", &config.delivery.bind_addr).await?;
    let service = DeliveryService::new(config.delivery.clone())
        .context("Failed to create delivery service")?;
    server.run(service.router()).await?;
    Ok(())
}
