//! The region browser view-model.
//!
//! [`RegionBrowser`] owns the [`ViewState`] and is the only writer. Actions
//! run as async methods; every response is applied in one `send_modify` so
//! renderers never observe a region index paired with another search's
//! hierarchies. Each action kind carries a monotonic request token and a
//! response is dropped unless its token is still the newest one issued.

use std::sync::{
    atomic::{AtomicU64, AtomicUsize, Ordering},
    Arc, Mutex, PoisonError,
};

use shared::{
    domain::{ConnectionId, RegionHierarchy},
    protocol::FindRegionResult,
};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info, warn};

use crate::{
    error::BrowserError,
    languages::{collect_languages, restore_language},
    settings::{Settings, SettingsStore},
    state::ViewState,
    transport::RegionApi,
};

/// How an action that reached the API ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The response was applied and the error message cleared.
    Applied,
    /// The request failed; the error message was set and the action's state reset.
    Failed,
    /// A newer request of the same kind was issued meanwhile; nothing was applied.
    Superseded,
}

struct PersistedSettings {
    store: SettingsStore,
    current: Settings,
}

pub struct RegionBrowser {
    api: Arc<dyn RegionApi>,
    state: watch::Sender<ViewState>,
    settings: Mutex<PersistedSettings>,
    connections_token: AtomicU64,
    search_token: AtomicU64,
    in_flight: AtomicUsize,
}

/// Marks one request as in flight; clears `loading` when the last one ends,
/// including when the action future is dropped early.
struct InFlight<'a> {
    browser: &'a RegionBrowser,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.browser.in_flight.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.browser.state.send_if_modified(|state| {
                let changed = state.loading;
                state.loading = false;
                changed
            });
        }
    }
}

impl RegionBrowser {
    /// Loads persisted settings once. An unreadable record is logged and
    /// replaced by defaults. Connections are not fetched here; call
    /// [`RegionBrowser::refresh_connections`] at startup.
    pub fn new(api: Arc<dyn RegionApi>, store: SettingsStore) -> Self {
        let current = match store.load() {
            Ok(Some(settings)) => settings,
            Ok(None) => Settings::default(),
            Err(err) => {
                warn!(error = %err, "ignoring unreadable settings, using defaults");
                Settings::default()
            }
        };
        let (state, _) = watch::channel(ViewState {
            show_bigger_regions: current.show_bigger_regions,
            ..ViewState::default()
        });

        Self {
            api,
            state,
            settings: Mutex::new(PersistedSettings { store, current }),
            connections_token: AtomicU64::new(0),
            search_token: AtomicU64::new(0),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.subscribe()
    }

    /// Stream of states, starting with the current one.
    pub fn changes(&self) -> WatchStream<ViewState> {
        WatchStream::new(self.state.subscribe())
    }

    /// The user's remembered preferences, independent of what the current
    /// connection and language lists allow.
    pub fn persisted_settings(&self) -> Settings {
        self.lock_settings().current.clone()
    }

    pub fn project_name(&self, hierarchy: &RegionHierarchy) -> String {
        self.state.borrow().project_name(hierarchy)
    }

    pub fn format_area_tag(&self, hierarchy: &RegionHierarchy) -> String {
        self.state.borrow().format_area_tag(hierarchy)
    }

    pub async fn refresh_connections(&self) -> Completion {
        let token = self.connections_token.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = self.begin_request();

        let result = self.api.list_connections().await;
        if token != self.connections_token.load(Ordering::SeqCst) {
            debug!(token, "dropping superseded connection list");
            return Completion::Superseded;
        }

        match result {
            Ok(connections) => {
                let restored = self
                    .persisted_settings()
                    .selected_connection
                    .filter(|id| connections.iter().any(|connection| connection.index == *id));
                info!(
                    count = connections.len(),
                    restored = ?restored,
                    "connections refreshed"
                );
                self.state.send_modify(|state| {
                    state.available_connections = connections;
                    state.selected_connection = restored;
                    state.error_message = None;
                });
                Completion::Applied
            }
            Err(err) => {
                warn!(error = %err, "connection refresh failed");
                let language = self.persisted_settings().preferred_language;
                self.state.send_modify(|state| {
                    replace_results(state, FindRegionResult::default(), language.as_deref());
                    state.error_message = Some(err.to_string());
                });
                Completion::Failed
            }
        }
    }

    /// Searches `query` on `connection`. An empty query is rejected without
    /// touching state or issuing a request.
    pub async fn search(
        &self,
        connection: ConnectionId,
        query: &str,
    ) -> Result<Completion, BrowserError> {
        if query.is_empty() {
            return Err(BrowserError::EmptyQuery);
        }

        let token = self.search_token.fetch_add(1, Ordering::SeqCst) + 1;
        let _in_flight = self.begin_request();

        let result = self.api.find_region(connection, query).await;
        if token != self.search_token.load(Ordering::SeqCst) {
            debug!(token, query, "dropping superseded search result");
            return Ok(Completion::Superseded);
        }

        let language = self.persisted_settings().preferred_language;
        let completion = match result {
            Ok(found) => {
                info!(
                    query,
                    regions = found.regions.len(),
                    hierarchies = found.hierarchies.len(),
                    "search applied"
                );
                self.state.send_modify(|state| {
                    replace_results(state, found, language.as_deref());
                    state.error_message = None;
                });
                Completion::Applied
            }
            Err(err) => {
                warn!(query, error = %err, "search failed");
                self.state.send_modify(|state| {
                    replace_results(state, FindRegionResult::default(), language.as_deref());
                    state.error_message = Some(err.to_string());
                });
                Completion::Failed
            }
        };
        Ok(completion)
    }

    /// Runs [`RegionBrowser::search`] with the connection and query of the form.
    pub async fn search_form(&self) -> Result<Completion, BrowserError> {
        let (connection, query) = {
            let state = self.state.borrow();
            (
                state.selected_connection,
                state.query_region_hierarchy.clone(),
            )
        };
        let connection = connection.ok_or(BrowserError::NoConnectionSelected)?;
        self.search(connection, &query).await
    }

    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.state.send_if_modified(|state| {
            if state.query_region_hierarchy == query {
                return false;
            }
            state.query_region_hierarchy = query;
            true
        });
    }

    /// Selects a connection from the available list, or clears the selection.
    pub fn select_connection(&self, connection: Option<ConnectionId>) -> Result<(), BrowserError> {
        if let Some(id) = connection {
            let known = self
                .state
                .borrow()
                .available_connections
                .iter()
                .any(|candidate| candidate.index == id);
            if !known {
                return Err(BrowserError::UnknownConnection(id));
            }
        }

        self.state
            .send_modify(|state| state.selected_connection = connection);
        self.persist(|settings| settings.selected_connection = connection);
        Ok(())
    }

    /// Sets the language names are resolved in. An empty code clears it.
    pub fn set_preferred_language(&self, language: Option<String>) {
        let language = language.filter(|language| !language.is_empty());
        self.state
            .send_modify(|state| state.preferred_language = language.clone());
        self.persist(|settings| settings.preferred_language = language);
    }

    pub fn set_show_bigger_regions(&self, show: bool) {
        self.state
            .send_modify(|state| state.show_bigger_regions = show);
        self.persist(|settings| settings.show_bigger_regions = show);
    }

    fn begin_request(&self) -> InFlight<'_> {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        self.state.send_if_modified(|state| {
            let changed = !state.loading;
            state.loading = true;
            changed
        });
        InFlight { browser: self }
    }

    fn lock_settings(&self) -> std::sync::MutexGuard<'_, PersistedSettings> {
        self.settings.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies a user change to the remembered settings and writes the record
    /// when it differs from the previous one.
    fn persist(&self, update: impl FnOnce(&mut Settings)) {
        let mut persisted = self.lock_settings();
        let mut next = persisted.current.clone();
        update(&mut next);
        if next == persisted.current {
            return;
        }

        match persisted.store.save(&next) {
            Ok(()) => {
                debug!(settings = ?next, "settings saved");
                persisted.current = next;
            }
            Err(err) => warn!(error = %err, "failed to save settings"),
        }
    }
}

/// Swaps in a search result as a whole and recomputes the language list.
fn replace_results(
    state: &mut ViewState,
    found: FindRegionResult,
    persisted_language: Option<&str>,
) {
    let FindRegionResult {
        regions,
        hierarchies,
    } = found;
    state.available_languages = collect_languages(&regions);
    state.preferred_language = restore_language(persisted_language, &state.available_languages);
    state.region_names = regions;
    state.region_hierarchies = hierarchies;
}

#[cfg(test)]
#[path = "tests/browser_tests.rs"]
mod tests;
