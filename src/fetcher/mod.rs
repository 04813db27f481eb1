pub mod gemini_fetcher;

use async_trait::async_trait;

use crate::app::Result;

/// Anything that can hand back the raw text of a station page.
#[async_trait]
pub trait PageFetcher {
    async fn fetch(&self, address: &str) -> Result<String>;
}
