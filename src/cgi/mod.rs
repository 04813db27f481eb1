//! Gemini CGI front end.
//!
//! The server hands the request over in `QUERY_STRING`; the answer goes to
//! stdout as a Gemini response.

use std::borrow::Cow;
use std::io::{self, Write};

use percent_encoding::percent_decode_str;

use crate::app::{AppContext, StationlogError};
use crate::domain::Identifier;

pub const QUERY_ENV: &str = "QUERY_STRING";
pub const INPUT_PROMPT: &str = "Enter the station user name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    /// Ask the client for input (Gemini status 10).
    Input(String),
    Success,
    /// Something went wrong; the body says what.
    Diagnostic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: Status,
    pub body: String,
}

impl Response {
    pub fn input(prompt: &str) -> Self {
        Self {
            status: Status::Input(prompt.to_string()),
            body: String::new(),
        }
    }

    pub fn success(body: String) -> Self {
        Self {
            status: Status::Success,
            body,
        }
    }

    pub fn diagnostic(message: impl Into<String>) -> Self {
        Self {
            status: Status::Diagnostic,
            body: message.into(),
        }
    }
}

/// Where a finished [`Response`] goes.
pub trait OutputSink {
    fn send(&mut self, response: &Response) -> io::Result<()>;
}

/// Writes responses in Gemini wire format.
pub struct GeminiSink<W: Write> {
    writer: W,
}

impl<W: Write> GeminiSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for GeminiSink<W> {
    fn send(&mut self, response: &Response) -> io::Result<()> {
        match &response.status {
            Status::Input(prompt) => write!(self.writer, "10 {}\r\n", prompt)?,
            Status::Success => write!(self.writer, "20 text/gemini\r\n{}\n", response.body)?,
            // Diagnostics go out as readable pages, not as 4x/5x statuses.
            Status::Diagnostic => {
                write!(self.writer, "20 text/gemini\r\n{}\n\r\n", response.body)?
            }
        }
        self.writer.flush()
    }
}

/// Percent-decodes the raw query. Invalid UTF-8 is replaced, not rejected.
pub fn decode_query(raw: &str) -> Cow<'_, str> {
    percent_decode_str(raw).decode_utf8_lossy()
}

/// Answers one request. Never fails: every error becomes a diagnostic.
pub async fn handle_query(ctx: &AppContext, query: Option<&str>) -> Response {
    let raw = match query {
        Some(q) if !q.is_empty() => decode_query(q),
        _ => return Response::input(INPUT_PROMPT),
    };

    let identifier = match Identifier::parse(&raw) {
        Ok(identifier) => identifier,
        Err(e) => {
            tracing::info!(query = %raw, "Rejected identifier");
            return Response::diagnostic(e.to_string());
        }
    };

    match ctx.builder(&identifier).build().await {
        Ok(document) => Response::success(document),
        Err(e) => Response::diagnostic(diagnostic_for(&e)),
    }
}

/// Answer for a process that could not set itself up.
pub fn startup_failure(err: &StationlogError) -> Response {
    Response::diagnostic(format!("Error starting stationlog: {}", err))
}

fn diagnostic_for(err: &StationlogError) -> String {
    match err {
        StationlogError::InvalidIdentifier(_) => err.to_string(),
        _ => format!("Error retrieving from station: {}", err),
    }
}
