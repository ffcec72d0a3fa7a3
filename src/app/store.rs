//! Country store - owns the country state and publishes snapshots
//!
//! Every action runs to completion before the new snapshot is published,
//! so subscribers never observe a half-applied transition.

use tokio::sync::watch;

use crate::app::countries::{reduce, CountriesAction, CountriesState};
use crate::models::Country;

/// Outcome of a fetch settlement offered to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settlement {
    Applied,
    /// Dropped because a newer fetch was issued after it (fencing only)
    Stale,
}

pub struct CountryStore {
    state: CountriesState,
    snapshot_tx: watch::Sender<CountriesState>,
    latest_fetch_id: u64,
    fence_fetches: bool,
}

impl Default for CountryStore {
    fn default() -> Self {
        Self::new(CountriesState::default())
    }
}

impl CountryStore {
    pub fn new(initial: CountriesState) -> Self {
        let (snapshot_tx, _) = watch::channel(initial.clone());
        CountryStore {
            state: initial,
            snapshot_tx,
            latest_fetch_id: 0,
            fence_fetches: false,
        }
    }

    /// Drop settlements of fetches superseded by a newer one
    pub fn with_fencing(mut self, enabled: bool) -> Self {
        self.fence_fetches = enabled;
        self
    }

    /// Current state
    pub fn snapshot(&self) -> &CountriesState {
        &self.state
    }

    /// Receive a snapshot after every completed transition
    pub fn subscribe(&self) -> watch::Receiver<CountriesState> {
        self.snapshot_tx.subscribe()
    }

    pub fn dispatch(&mut self, action: CountriesAction) {
        reduce(&mut self.state, action);
        self.snapshot_tx.send_replace(self.state.clone());
    }

    /// Start a fetch and return its request id
    pub fn begin_fetch(&mut self) -> u64 {
        self.latest_fetch_id += 1;
        self.dispatch(CountriesAction::FetchStarted);
        self.latest_fetch_id
    }

    pub fn settle_success(&mut self, id: u64, countries: Vec<Country>) -> Settlement {
        if self.is_stale(id) {
            return Settlement::Stale;
        }
        self.dispatch(CountriesAction::FetchSucceeded(countries));
        Settlement::Applied
    }

    pub fn settle_failure(&mut self, id: u64, message: String) -> Settlement {
        if self.is_stale(id) {
            return Settlement::Stale;
        }
        self.dispatch(CountriesAction::FetchFailed(message));
        Settlement::Applied
    }

    fn is_stale(&self, id: u64) -> bool {
        self.fence_fetches && id != self.latest_fetch_id
    }
}
