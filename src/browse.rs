//! Interactive browsing session
//!
//! Repeatedly asks for a search term, lets the user pick one of the matching
//! shows, and lists that show's episodes. Terminal prompts go through the
//! `Prompter` trait so the loop itself does not depend on a real terminal.

use crate::presenter::show_label;
use crate::session::Browser;
use crate::show_lookup::{Episode, LookupError, Show, ShowProvider};
use dialoguer::{Input, Select};
use thiserror::Error;

/// Errors that can end a browsing session
#[derive(Debug, Error)]
pub enum BrowseError {
    /// A lookup against the show provider failed
    #[error(transparent)]
    Lookup(#[from] LookupError),

    /// Reading user input failed
    #[error("Prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Progress event emitted during a browsing session
#[derive(Debug, Clone, PartialEq)]
pub enum BrowseEvent {
    /// A search was sent to the provider
    Searching { query: String },

    /// Search results arrived
    ShowsFound { shows: Vec<Show> },

    /// Episodes for the selected show are being fetched
    FetchingEpisodes { show: Show },

    /// Episode list arrived
    EpisodesFound { show: Show, episodes: Vec<Episode> },

    /// A response was superseded by a newer request and dropped
    Superseded,

    /// The user ended the session
    Finished,
}

/// Source of user decisions during a browsing session.
pub trait Prompter {
    /// Asks for the next search term. `None` or a blank answer ends the session.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Prompt` if input cannot be read.
    fn ask_query(&mut self) -> Result<Option<String>, BrowseError>;

    /// Asks which of `shows` to open. `None` goes back to searching.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::Prompt` if input cannot be read.
    fn pick_show(&mut self, shows: &[Show]) -> Result<Option<usize>, BrowseError>;
}

/// Prompter reading from the terminal via dialoguer.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask_query(&mut self) -> Result<Option<String>, BrowseError> {
        let query: String = Input::new()
            .with_prompt("Search shows (leave empty to quit)")
            .allow_empty(true)
            .interact_text()?;

        Ok(Some(query))
    }

    fn pick_show(&mut self, shows: &[Show]) -> Result<Option<usize>, BrowseError> {
        let labels: Vec<String> = shows.iter().map(show_label).collect();

        let selection = Select::new()
            .with_prompt("Show episodes for (Esc to search again)")
            .items(&labels)
            .default(0)
            .interact_opt()?;

        Ok(selection)
    }
}

/// Runs an interactive session until the user enters an empty query.
///
/// Progress events are emitted through `on_event`, allowing the caller to
/// render results however it likes.
///
/// # Errors
///
/// Returns the first lookup or prompt error; the session ends at that point.
pub fn run_browse<P, R, F>(
    browser: &Browser<P>,
    prompter: &mut R,
    mut on_event: F,
) -> Result<(), BrowseError>
where
    P: ShowProvider,
    R: Prompter + ?Sized,
    F: FnMut(BrowseEvent),
{
    loop {
        let query = prompter.ask_query()?.unwrap_or_default();
        let query = query.trim();

        // Blank searches are never sent to the provider
        if query.is_empty() {
            on_event(BrowseEvent::Finished);
            return Ok(());
        }

        on_event(BrowseEvent::Searching {
            query: query.to_string(),
        });

        let Some(shows) = browser.search(query)?.current() else {
            on_event(BrowseEvent::Superseded);
            continue;
        };

        on_event(BrowseEvent::ShowsFound {
            shows: shows.clone(),
        });

        if shows.is_empty() {
            continue;
        }

        let Some(show) = prompter
            .pick_show(&shows)?
            .and_then(|index| shows.get(index))
            .cloned()
        else {
            continue;
        };

        on_event(BrowseEvent::FetchingEpisodes { show: show.clone() });

        match browser.episodes(show.id)?.current() {
            Some(episodes) => on_event(BrowseEvent::EpisodesFound { show, episodes }),
            None => on_event(BrowseEvent::Superseded),
        }
    }
}
