//! # Stationlog
//!
//! Turns a user's page on a Gemini "station" into a tinylog with absolute
//! timestamps.
//!
//! ## Architecture
//!
//! ```text
//! Identifier → Fetcher → Normalizer → Renderer → OutputSink
//! ```
//!
//! - [`fetcher`]: Gemini client behind the [`PageFetcher`](fetcher::PageFetcher) trait
//! - [`normalizer`]: Splits the page into header and entries, resolves relative dates
//! - [`renderer`]: Writes the tinylog gemtext
//! - [`cgi`]: Reads the request, writes the Gemini response
//!
//! ## Quick Start
//!
//! ```bash
//! # As a CGI script the server sets QUERY_STRING
//! QUERY_STRING=alice stationlog
//!
//! # From a shell
//! stationlog generate alice
//! stationlog convert saved-page.gmi
//! ```

/// Application context, feed builder and error types.
///
/// [`FeedBuilder`](app::FeedBuilder) owns one [`TinyLog`](domain::TinyLog)
/// per invocation and walks it from `Idle` to `Rendered` or `Failed`.
pub mod app;

/// Gemini CGI request handling and the [`OutputSink`](cgi::OutputSink) trait.
pub mod cgi;

/// Command-line interface using clap.
///
/// - no command / `cgi` - answer a CGI request
/// - `generate <user>` - fetch and print a tinylog
/// - `convert <path>` - render a saved station page
pub mod cli;

/// Configuration loaded from `~/.config/stationlog/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`TinyLog`](domain::TinyLog): author, avatar, source link and entries
/// - [`Entry`](domain::Entry): one post with its resolved timestamp
/// - [`Identifier`](domain::Identifier): validated station user name
pub mod domain;

/// Page fetching.
///
/// - [`PageFetcher`](fetcher::PageFetcher): async trait for fetching a page
/// - [`GeminiFetcher`](fetcher::gemini_fetcher::GeminiFetcher): TLS client with certificate expiry check
pub mod fetcher;

/// Station page parsing.
pub mod normalizer;

/// Tinylog rendering.
pub mod renderer;
