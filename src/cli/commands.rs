use std::io::Write;
use std::path::Path;

use chrono::Local;

use crate::app::{AppContext, Result};
use crate::cgi::{self, GeminiSink, OutputSink};
use crate::domain::{Identifier, TinyLog};

/// Reads `QUERY_STRING` and writes the Gemini response to `out`.
///
/// Takes the context as it came out of startup so that a broken config still
/// gets a Gemini answer instead of a silent exit.
pub async fn run_cgi<W: Write>(setup: Result<AppContext>, out: W) -> Result<()> {
    let response = match setup {
        Ok(ctx) => {
            let query = std::env::var(cgi::QUERY_ENV).ok();
            cgi::handle_query(&ctx, query.as_deref()).await
        }
        Err(e) => {
            tracing::error!(error = %e, "Startup failed");
            cgi::startup_failure(&e)
        }
    };

    let mut sink = GeminiSink::new(out);
    sink.send(&response)?;
    Ok(())
}

pub async fn generate<W: Write>(ctx: &AppContext, user: &str, mut out: W) -> Result<()> {
    let identifier = Identifier::parse(user)?;
    let document = ctx.builder(&identifier).build().await?;
    out.write_all(document.as_bytes())?;
    Ok(())
}

pub fn convert<W: Write>(ctx: &AppContext, path: &Path, link: &str, mut out: W) -> Result<()> {
    let page = std::fs::read_to_string(path)?;

    let mut log = TinyLog::new(link);
    ctx.normalizer.apply(&mut log, &page, Local::now().fixed_offset());
    tracing::info!(path = %path.display(), entries = log.entries.len(), "Converted saved page");

    out.write_all(ctx.renderer.render(&log).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;

    use super::*;
    use crate::app::StationlogError;
    use crate::config::Config;
    use crate::fetcher::PageFetcher;

    struct Unreachable;

    #[async_trait]
    impl PageFetcher for Unreachable {
        async fn fetch(&self, address: &str) -> Result<String> {
            Err(StationlogError::Timeout(address.to_string()))
        }
    }

    fn ctx() -> AppContext {
        AppContext::with_fetcher(Config::default(), Arc::new(Unreachable))
    }

    #[test]
    fn test_convert_saved_page() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "### 🐢 bob\n### Logs\n### 🐢 bob\nslow and steady\n🐢 bob · 3 days ago\n"
        )
        .unwrap();

        let mut out = Vec::new();
        convert(&ctx(), file.path(), "gemini://station.martinrue.com/bob", &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("# bob's TinyLog - Generated from station\n\nAuthor: @bob\nAvatar: 🐢\n\n## "));
        assert!(out.ends_with("\nslow and steady\n\n"));
    }

    #[test]
    fn test_convert_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = convert(&ctx(), &dir.path().join("missing.gmi"), "", Vec::new()).unwrap_err();
        assert!(matches!(err, StationlogError::Io(_)));
    }

    #[tokio::test]
    async fn test_cgi_answers_when_startup_failed() {
        let setup = Err(StationlogError::Config("bad timeout_secs".into()));

        let mut out = Vec::new();
        run_cgi(setup, &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        assert_eq!(
            out,
            "20 text/gemini\r\nError starting stationlog: Configuration error: bad timeout_secs\n\r\n"
        );
    }

    #[tokio::test]
    async fn test_cgi_answers_for_unreadable_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"x\"").unwrap();

        let mut out = Vec::new();
        run_cgi(AppContext::load(Some(file.path())), &mut out).await.unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.starts_with("20 text/gemini\r\nError starting stationlog: Configuration error: "));
    }

    #[tokio::test]
    async fn test_generate_rejects_bad_user() {
        let err = generate(&ctx(), "no such user", Vec::new()).await.unwrap_err();
        assert!(matches!(err, StationlogError::InvalidIdentifier(_)));
    }

    #[tokio::test]
    async fn test_generate_surfaces_timeout() {
        let err = generate(&ctx(), "alice", Vec::new()).await.unwrap_err();
        assert!(matches!(err, StationlogError::Timeout(_)));
    }
}
