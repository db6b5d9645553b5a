use std::{sync::Arc, time::Duration};

use entity::prelude::FormError;
use news_client::NewsClientError;
use tokio::sync::Mutex;
use toml::{map::Map, Value};
use tracing::info;

pub mod document;
pub mod events;
mod news;
pub mod render;
mod response;

use document::Document;

#[derive(Debug, thiserror::Error)]
pub enum SyncNewsError {
    #[error("in news client: {}: {}", message, source)]
    NewsClientError {
        message: String,
        source: NewsClientError,
    },

    #[error("invalid form: {}: {}", message, source)]
    InvalidForm { message: String, source: FormError },
}

#[derive(Clone, Debug)]
pub struct Config {
    pub fade_delay: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fade_delay: Duration::from_millis(500),
        }
    }
}

/// Keeps the page document in step with the remote news collection.
///
/// Cloning is cheap; clones share the same document.
#[derive(Clone, Debug)]
pub struct SyncClient {
    client: news_client::Client,
    document: Arc<Mutex<Document>>,
    config: Config,
}

impl SyncClient {
    pub fn new(client: news_client::Client, config: Config) -> Self {
        Self {
            client,
            document: Arc::new(Mutex::new(Document::new())),
            config,
        }
    }

    /// A copy of the document as it is right now.
    pub async fn snapshot(&self) -> Document {
        self.document.lock().await.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

pub fn init(config: &Map<String, Value>) -> anyhow::Result<SyncClient> {
    info!(task = "start news sync");

    let client = news_client::Client::new(config)?;
    let config = init_config(config)?;

    Ok(SyncClient::new(client, config))
}

pub fn init_config(config: &Map<String, Value>) -> anyhow::Result<Config> {
    let fade_millis = util::config_u64(config, "news", "fade_millis")?;

    Ok(Config {
        fade_delay: Duration::from_millis(fade_millis),
    })
}

#[cfg(test)]
mod test {
    use util::parse_config;

    use super::*;

    #[test]
    fn test_init_config() {
        let config = parse_config(
            "[news]\nbase_url = \"http://localhost\"\nfade_millis = 250\n",
        )
        .unwrap();

        let sync = init(&config).unwrap();

        assert_eq!(sync.config().fade_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_init_config_requires_fade_millis() {
        let config =
            parse_config("[news]\nbase_url = \"http://localhost\"\n").unwrap();

        let err = init(&config).unwrap_err();

        assert_eq!(err.to_string(), "failed to load fade_millis config");
    }
}
