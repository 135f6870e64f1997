/// TVMaze show provider implementation.
use super::transport::{HttpTransport, ReqwestTransport};
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult};
use super::{Episode, LookupError, Show, ShowProvider};
use serde::de::DeserializeOwned;

/// Base URL of the public TVMaze API
pub const DEFAULT_BASE_URL: &str = "https://api.tvmaze.com";

/// Image used for shows TVMaze has no poster for
pub const PLACEHOLDER_IMAGE_URL: &str =
    "https://via.placeholder.com/300/6C757D/FFFFFF?text=Show+image+unavailable";

/// Show provider for the TVMaze API.
///
/// This provider uses the `/search/shows` endpoint for searching and
/// `/shows/<id>/episodes` for episode lists.
#[derive(Debug)]
pub struct TvMazeProvider<T = ReqwestTransport> {
    transport: T,
    base_url: String,
}

impl TvMazeProvider<ReqwestTransport> {
    /// Creates a provider talking to the public TVMaze API.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::ClientSetup` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, LookupError> {
        Ok(Self::with_transport(ReqwestTransport::new()?, DEFAULT_BASE_URL))
    }
}

impl<T: HttpTransport> TvMazeProvider<T> {
    /// Creates a provider using the given transport and API base URL.
    ///
    /// A trailing slash on `base_url` is ignored.
    pub fn with_transport(transport: T, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            transport,
            base_url,
        }
    }

    /// Returns the API base URL this provider sends requests to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetches `url` and parses the body as JSON.
    fn fetch_json<R: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<R, LookupError> {
        let body = self.transport.get_text(url, query)?;

        serde_json::from_str(&body).map_err(|e| LookupError::ParseError {
            url: url.to_string(),
            source: e,
        })
    }

    /// Converts a TVMaze search hit to our `Show` record.
    fn convert_show(result: TvMazeSearchResult) -> Show {
        let show = result.show;
        let image = show
            .image
            .and_then(|image| image.medium)
            .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string());

        Show {
            id: show.id,
            name: show.name,
            summary: show.summary,
            image,
        }
    }

    /// Converts a TVMaze episode to our `Episode` record.
    fn convert_episode(episode: TvMazeEpisode) -> Episode {
        Episode {
            id: episode.id,
            name: episode.name,
            season: episode.season,
            number: episode.number,
        }
    }
}

impl<T: HttpTransport> ShowProvider for TvMazeProvider<T> {
    fn search_shows(&self, query: &str) -> Result<Vec<Show>, LookupError> {
        let url = format!("{}/search/shows", self.base_url);
        let results: Vec<TvMazeSearchResult> = self.fetch_json(&url, &[("q", query)])?;

        Ok(results.into_iter().map(Self::convert_show).collect())
    }

    fn get_episodes(&self, show_id: u64) -> Result<Vec<Episode>, LookupError> {
        let url = format!("{}/shows/{}/episodes", self.base_url, show_id);
        let episodes: Vec<TvMazeEpisode> = self.fetch_json(&url, &[])?;

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}
