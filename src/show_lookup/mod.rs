/// Data structures and traits for TV show lookup.
///
/// This module provides the normalized `Show` and `Episode` records returned
/// to callers, the `ShowProvider` trait implemented by show databases, and the
/// two entry points used by the presenter: `search_shows` and `get_episodes`.
mod transport;
mod tvmaze;
mod tvmaze_types;

pub use transport::{HttpTransport, ReqwestTransport};
pub use tvmaze::{DEFAULT_BASE_URL, PLACEHOLDER_IMAGE_URL, TvMazeProvider};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while talking to the show provider.
///
/// Every variant means the same thing to a caller: the remote call failed and
/// no result is available. The variants only preserve the cause for messages.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The HTTP client could not be constructed
    #[error("Failed to set up HTTP client: {0}")]
    ClientSetup(String),

    /// The request could not be sent or its body could not be read
    #[error("Request to {url} failed: {reason}")]
    RequestError { url: String, reason: String },

    /// The provider answered with a non-success status
    #[error("Request to {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Failed to parse the provider's JSON response
    #[error("Failed to parse API response from {url}: {source}")]
    ParseError {
        url: String,
        source: serde_json::Error,
    },
}

/// A TV show as returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Provider identifier, used to request the episode list
    pub id: u64,
    /// The show title
    pub name: String,
    /// Summary as delivered by the provider (may contain HTML markup)
    pub summary: Option<String>,
    /// Medium-size poster URL, or the placeholder image if the provider has none
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Provider identifier of the episode
    pub id: u64,
    /// The episode title (`None` if the provider has none)
    pub name: Option<String>,
    /// The season number this episode belongs to
    pub season: u32,
    /// The episode number within the season (`None` for specials)
    pub number: Option<u32>,
}

/// Trait for providers that can search shows and list their episodes.
///
/// Implementors perform exactly one remote request per call and return the
/// records in the order the remote side delivered them.
pub trait ShowProvider {
    /// Searches shows matching a free-text query.
    ///
    /// # Arguments
    ///
    /// * `query` - The search term, forwarded as-is (even when empty)
    ///
    /// # Errors
    ///
    /// Returns a `LookupError` if the request fails, the provider answers with
    /// a non-success status, or the response cannot be parsed.
    fn search_shows(&self, query: &str) -> Result<Vec<Show>, LookupError>;

    /// Fetches all episodes of the show with the given id.
    ///
    /// # Errors
    ///
    /// Same conditions as [`ShowProvider::search_shows`].
    fn get_episodes(&self, show_id: u64) -> Result<Vec<Episode>, LookupError>;
}

impl<P: ShowProvider + ?Sized> ShowProvider for &P {
    fn search_shows(&self, query: &str) -> Result<Vec<Show>, LookupError> {
        (**self).search_shows(query)
    }

    fn get_episodes(&self, show_id: u64) -> Result<Vec<Episode>, LookupError> {
        (**self).get_episodes(show_id)
    }
}

/// Searches shows matching `query` using the given provider.
///
/// # Examples
///
/// ```no_run
/// use showfinder::{TvMazeProvider, search_shows};
///
/// let provider = TvMazeProvider::new().unwrap();
/// for show in search_shows(&provider, "batman").unwrap() {
///     println!("{} ({})", show.name, show.id);
/// }
/// ```
///
/// # Errors
///
/// Propagates the provider's `LookupError` unchanged.
pub fn search_shows<P: ShowProvider + ?Sized>(
    provider: &P,
    query: &str,
) -> Result<Vec<Show>, LookupError> {
    provider.search_shows(query)
}

/// Fetches the episode list of a show previously returned by [`search_shows`].
///
/// # Errors
///
/// Propagates the provider's `LookupError` unchanged.
pub fn get_episodes<P: ShowProvider + ?Sized>(
    provider: &P,
    show_id: u64,
) -> Result<Vec<Episode>, LookupError> {
    provider.get_episodes(show_id)
}
