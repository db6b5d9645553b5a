use std::net::{Ipv4Addr, SocketAddr};

use anyhow::Context as _;
use sync_news::events::{dispatch, UiEvent};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = util::load_config("Config.toml")?;
    let port = util::config_u64(&config, "web", "port")?;
    let port = u16::try_from(port).context("failed to parse port config")?;

    let sync = sync_news::init(&config)?;

    dispatch(sync.clone(), UiEvent::Loaded);

    let router = web::serve(sync);
    let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!(task = "listen", addr = %addr);

    axum::serve(listener, router).await?;

    Ok(())
}
