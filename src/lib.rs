//! showfinder - Search TV shows and browse their episodes
//!
//! This library searches the TVMaze show database, normalizes the results into
//! `Show` and `Episode` records, and renders them for the terminal.

mod browse;
mod presenter;
mod session;
mod show_lookup;

// Core lookup API
pub use show_lookup::{
    DEFAULT_BASE_URL, Episode, HttpTransport, LookupError, PLACEHOLDER_IMAGE_URL,
    ReqwestTransport, Show, ShowProvider, TvMazeProvider, get_episodes, search_shows,
};

// Stale-response guard
pub use session::{Browser, Fresh, RequestGeneration, Ticket};

// Presentation
pub use browse::{BrowseError, BrowseEvent, Prompter, TerminalPrompter, run_browse};
pub use presenter::{
    render_episode_line, render_episodes, render_show_card, render_shows, show_label,
    summary_text,
};

use serde::Serialize;
use thiserror::Error;

/// Top-level error type for showfinder operations
#[derive(Debug, Error)]
pub enum ShowFinderError {
    /// Error while talking to the show provider
    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),

    /// Error during an interactive session
    #[error("Browse error: {0}")]
    Browse(#[from] BrowseError),

    /// Error while producing JSON output
    #[error("JSON output error: {0}")]
    Json(#[from] serde_json::Error),

    /// The search term was empty
    #[error("Search query must not be empty")]
    EmptyQuery,
}

/// Output style of the non-interactive commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human readable text
    Text,
    /// Pretty-printed JSON array of records
    Json,
}

/// Searches shows for the CLI and renders them in the requested format.
///
/// Unlike [`search_shows`], a blank query is rejected before any request is
/// made.
///
/// # Errors
///
/// Returns `ShowFinderError::EmptyQuery` for a blank query, otherwise any
/// lookup or serialization error.
pub fn search_and_render<P: ShowProvider + ?Sized>(
    provider: &P,
    query: &str,
    format: OutputFormat,
) -> Result<String, ShowFinderError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ShowFinderError::EmptyQuery);
    }

    let shows = search_shows(provider, query)?;
    render(&shows, format, render_shows)
}

/// Fetches a show's episodes for the CLI and renders them in the requested
/// format.
///
/// # Errors
///
/// Returns any lookup or serialization error.
pub fn episodes_and_render<P: ShowProvider + ?Sized>(
    provider: &P,
    show_id: u64,
    format: OutputFormat,
) -> Result<String, ShowFinderError> {
    let episodes = get_episodes(provider, show_id)?;
    render(&episodes, format, render_episodes)
}

fn render<T: Serialize>(
    records: &[T],
    format: OutputFormat,
    as_text: fn(&[T]) -> String,
) -> Result<String, ShowFinderError> {
    match format {
        OutputFormat::Text => Ok(as_text(records)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(records)?),
    }
}
