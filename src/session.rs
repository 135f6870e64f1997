//! Stale-response guard for the search → episodes flow
//!
//! Every request gets a ticket from a generation counter. When the response
//! arrives the ticket is checked against the counter: if a newer request of the
//! same kind was issued in the meantime, the response is reported as stale and
//! must not replace what the newer request shows.

use crate::show_lookup::{Episode, LookupError, Show, ShowProvider};
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation stamp of a single outgoing request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// Monotonic counter handing out request tickets.
#[derive(Debug, Default)]
pub struct RequestGeneration {
    current: AtomicU64,
}

impl RequestGeneration {
    /// Creates a counter with no outstanding tickets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues a new ticket, making every earlier ticket stale.
    pub fn issue(&self) -> Ticket {
        Ticket(self.current.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Makes every outstanding ticket stale without issuing a new one.
    pub fn invalidate(&self) {
        self.current.fetch_add(1, Ordering::AcqRel);
    }

    /// Returns true if `ticket` is the most recently issued one.
    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.current.load(Ordering::Acquire) == ticket.0
    }

    /// Wraps `value` according to whether `ticket` is still current.
    pub fn settle<T>(&self, ticket: Ticket, value: T) -> Fresh<T> {
        if self.is_current(ticket) {
            Fresh::Current(value)
        } else {
            Fresh::Stale
        }
    }
}

/// Outcome of a guarded request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fresh<T> {
    /// The response belongs to the newest request and may be shown
    Current(T),
    /// A newer request was issued while this one was in flight
    Stale,
}

impl<T> Fresh<T> {
    /// Returns the value if the response is current.
    pub fn current(self) -> Option<T> {
        match self {
            Fresh::Current(value) => Some(value),
            Fresh::Stale => None,
        }
    }

    /// Returns true if the response was superseded.
    pub fn is_stale(&self) -> bool {
        matches!(self, Fresh::Stale)
    }
}

/// Drives the search-then-drill-down flow on behalf of a presenter.
///
/// Searches and episode lookups each have their own generation counter. A new
/// search additionally invalidates any episode lookup still in flight, since
/// the episode list belongs to the previous result set.
#[derive(Debug)]
pub struct Browser<P> {
    provider: P,
    searches: RequestGeneration,
    episodes: RequestGeneration,
}

impl<P: ShowProvider> Browser<P> {
    /// Creates a browser on top of the given provider.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            searches: RequestGeneration::new(),
            episodes: RequestGeneration::new(),
        }
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Searches shows, reporting the result as stale if a newer search was
    /// started before this one finished.
    ///
    /// # Errors
    ///
    /// Provider errors are returned as-is, whether the request is stale or not.
    pub fn search(&self, query: &str) -> Result<Fresh<Vec<Show>>, LookupError> {
        let ticket = self.searches.issue();
        self.episodes.invalidate();

        let shows = crate::show_lookup::search_shows(&self.provider, query)?;
        tracing::debug!(query, count = shows.len(), "search finished");

        Ok(self.searches.settle(ticket, shows))
    }

    /// Fetches episodes, reporting the result as stale if another episode
    /// lookup or a new search was started before this one finished.
    ///
    /// # Errors
    ///
    /// Provider errors are returned as-is, whether the request is stale or not.
    pub fn episodes(&self, show_id: u64) -> Result<Fresh<Vec<Episode>>, LookupError> {
        let ticket = self.episodes.issue();

        let episodes = crate::show_lookup::get_episodes(&self.provider, show_id)?;
        tracing::debug!(show_id, count = episodes.len(), "episode lookup finished");

        Ok(self.episodes.settle(ticket, episodes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::thread;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            summary: None,
            image: crate::show_lookup::PLACEHOLDER_IMAGE_URL.to_string(),
        }
    }

    fn episode(id: u64) -> Episode {
        Episode {
            id,
            name: Some(format!("Episode {}", id)),
            season: 1,
            number: Some(1),
        }
    }

    /// Provider whose requests for the "slow" query or show id 1 block until
    /// released through a channel. Entering such a request is announced on
    /// `entered` so the test knows the request is in flight.
    struct GatedProvider {
        entered: Mutex<Sender<()>>,
        release: Mutex<Receiver<()>>,
    }

    impl GatedProvider {
        fn new() -> (Self, Receiver<()>, Sender<()>) {
            let (entered_tx, entered_rx) = mpsc::channel();
            let (release_tx, release_rx) = mpsc::channel();
            let provider = Self {
                entered: Mutex::new(entered_tx),
                release: Mutex::new(release_rx),
            };
            (provider, entered_rx, release_tx)
        }

        fn wait_for_release(&self) {
            self.entered.lock().unwrap().send(()).unwrap();
            self.release.lock().unwrap().recv().unwrap();
        }
    }

    impl ShowProvider for GatedProvider {
        fn search_shows(&self, query: &str) -> Result<Vec<Show>, LookupError> {
            if query == "slow" {
                self.wait_for_release();
            }
            Ok(vec![show(query.len() as u64, query)])
        }

        fn get_episodes(&self, show_id: u64) -> Result<Vec<Episode>, LookupError> {
            if show_id == 1 {
                self.wait_for_release();
            }
            Ok(vec![episode(show_id)])
        }
    }

    /// Provider that always fails
    struct FailingProvider;

    impl ShowProvider for FailingProvider {
        fn search_shows(&self, _query: &str) -> Result<Vec<Show>, LookupError> {
            Err(LookupError::HttpStatus {
                url: "https://api.example.test/search/shows".to_string(),
                status: 503,
            })
        }

        fn get_episodes(&self, _show_id: u64) -> Result<Vec<Episode>, LookupError> {
            Err(LookupError::RequestError {
                url: "https://api.example.test/shows/1/episodes".to_string(),
                reason: "connection reset".to_string(),
            })
        }
    }

    #[test]
    fn test_latest_ticket_is_current() {
        let generation = RequestGeneration::new();
        let first = generation.issue();
        assert!(generation.is_current(first));

        let second = generation.issue();
        assert!(!generation.is_current(first));
        assert!(generation.is_current(second));
        assert_ne!(first, second);
    }

    #[test]
    fn test_invalidate_makes_ticket_stale() {
        let generation = RequestGeneration::new();
        let ticket = generation.issue();
        generation.invalidate();

        assert!(!generation.is_current(ticket));
        assert_eq!(generation.settle(ticket, 42), Fresh::Stale);
    }

    #[test]
    fn test_fresh_accessors() {
        assert_eq!(Fresh::Current(3).current(), Some(3));
        assert_eq!(Fresh::<i32>::Stale.current(), None);
        assert!(Fresh::<i32>::Stale.is_stale());
        assert!(!Fresh::Current(()).is_stale());
    }

    #[test]
    fn test_sequential_search_is_current() {
        let (provider, _entered, _release) = GatedProvider::new();
        let browser = Browser::new(provider);

        let result = browser.search("girls").unwrap();
        assert_eq!(result, Fresh::Current(vec![show(5, "girls")]));
    }

    #[test]
    fn test_slow_search_overtaken_by_newer_search_is_stale() {
        let (provider, entered, release) = GatedProvider::new();
        let browser = Browser::new(provider);

        thread::scope(|scope| {
            let slow = scope.spawn(|| browser.search("slow"));
            entered.recv().unwrap();

            let fast = browser.search("fast").unwrap();
            assert_eq!(fast, Fresh::Current(vec![show(4, "fast")]));

            release.send(()).unwrap();
            let slow = slow.join().unwrap().unwrap();
            assert!(slow.is_stale());
        });
    }

    #[test]
    fn test_slow_episode_lookup_overtaken_by_other_show_is_stale() {
        let (provider, entered, release) = GatedProvider::new();
        let browser = Browser::new(provider);

        thread::scope(|scope| {
            let slow = scope.spawn(|| browser.episodes(1));
            entered.recv().unwrap();

            let other = browser.episodes(2).unwrap();
            assert_eq!(other, Fresh::Current(vec![episode(2)]));

            release.send(()).unwrap();
            assert!(slow.join().unwrap().unwrap().is_stale());
        });
    }

    #[test]
    fn test_new_search_makes_pending_episode_lookup_stale() {
        let (provider, entered, release) = GatedProvider::new();
        let browser = Browser::new(provider);

        thread::scope(|scope| {
            let pending = scope.spawn(|| browser.episodes(1));
            entered.recv().unwrap();

            assert!(!browser.search("new").unwrap().is_stale());

            release.send(()).unwrap();
            assert!(pending.join().unwrap().unwrap().is_stale());
        });
    }

    #[test]
    fn test_errors_propagate() {
        let browser = Browser::new(FailingProvider);

        assert!(matches!(
            browser.search("batman"),
            Err(LookupError::HttpStatus { status: 503, .. })
        ));
        assert!(matches!(
            browser.episodes(1),
            Err(LookupError::RequestError { .. })
        ));
    }
}
