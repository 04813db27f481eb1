//! Drives one invocation: fetch, parse, render.
//!
//! ```text
//! Idle -> Fetching -> Parsing -> Rendered
//!            |
//!            +-> Failed
//! ```

use chrono::Local;

use crate::app::context::AppContext;
use crate::app::error::Result;
use crate::domain::TinyLog;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    Idle,
    Fetching,
    Parsing,
    Rendered,
    Failed,
}

pub struct FeedBuilder<'a> {
    ctx: &'a AppContext,
    log: TinyLog,
    state: BuildState,
}

impl<'a> FeedBuilder<'a> {
    pub fn new(ctx: &'a AppContext, link: impl Into<String>) -> Self {
        Self {
            ctx,
            log: TinyLog::new(link),
            state: BuildState::Idle,
        }
    }

    pub fn state(&self) -> BuildState {
        self.state
    }

    pub fn log(&self) -> &TinyLog {
        &self.log
    }

    fn transition(&mut self, next: BuildState) {
        tracing::debug!(link = %self.log.link, from = ?self.state, to = ?next, "Builder state change");
        self.state = next;
    }

    /// Fetches the page and fills the model. Only a failed fetch is an error.
    pub async fn generate(&mut self) -> Result<()> {
        self.transition(BuildState::Fetching);

        let page = match self.ctx.fetcher.fetch(&self.log.link).await {
            Ok(page) => page,
            Err(e) => {
                self.transition(BuildState::Failed);
                tracing::info!(link = %self.log.link, error = %e, "Fetch failed");
                return Err(e);
            }
        };

        self.transition(BuildState::Parsing);
        let now = Local::now().fixed_offset();
        self.ctx.normalizer.apply(&mut self.log, &page, now);
        tracing::info!(
            link = %self.log.link,
            author = %self.log.author,
            entries = self.log.entries.len(),
            "Parsed station page"
        );

        Ok(())
    }

    /// Renders the model. Only a parsed model moves the builder to `Rendered`;
    /// rendering from `Idle` or `Failed` leaves the state alone.
    pub fn render(&mut self) -> String {
        let document = self.ctx.renderer.render(&self.log);
        match self.state {
            BuildState::Parsing | BuildState::Rendered => self.transition(BuildState::Rendered),
            state => tracing::warn!(link = %self.log.link, ?state, "Rendering a model that was never parsed"),
        }
        document
    }

    pub async fn build(mut self) -> Result<String> {
        self.generate().await?;
        Ok(self.render())
    }
}
