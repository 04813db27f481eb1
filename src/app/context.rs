use std::path::Path;
use std::sync::Arc;

use crate::app::builder::FeedBuilder;
use crate::app::error::{Result, StationlogError};
use crate::config::Config;
use crate::domain::Identifier;
use crate::fetcher::gemini_fetcher::GeminiFetcher;
use crate::fetcher::PageFetcher;
use crate::normalizer::Normalizer;
use crate::renderer::Renderer;

pub struct AppContext {
    pub config: Config,
    pub fetcher: Arc<dyn PageFetcher + Send + Sync>,
    pub normalizer: Normalizer,
    pub renderer: Renderer,
}

impl AppContext {
    pub fn new(config: Config) -> Result<Self> {
        let fetcher: Arc<dyn PageFetcher + Send + Sync> = Arc::new(GeminiFetcher::new(&config)?);
        Ok(Self::with_fetcher(config, fetcher))
    }

    /// Loads the config (see [`Config::load`]) and builds the context from it.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config =
            Config::load(config_path).map_err(|e| StationlogError::Config(e.to_string()))?;
        Self::new(config)
    }

    pub fn with_fetcher(config: Config, fetcher: Arc<dyn PageFetcher + Send + Sync>) -> Self {
        Self {
            config,
            fetcher,
            normalizer: Normalizer::new(),
            renderer: Renderer::new(),
        }
    }

    pub fn station_link(&self, identifier: &Identifier) -> String {
        identifier.station_link(&self.config.base_url)
    }

    /// Fresh builder, and with it a fresh model, for one identifier.
    pub fn builder(&self, identifier: &Identifier) -> FeedBuilder<'_> {
        FeedBuilder::new(self, self.station_link(identifier))
    }
}
