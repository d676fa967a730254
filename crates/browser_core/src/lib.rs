//! View-model for browsing region hierarchies served by the region API.
//!
//! The crate is UI agnostic: renderers read [`ViewState`] snapshots or
//! subscribe to changes, and call the action methods of [`RegionBrowser`].

pub mod browser;
pub mod error;
pub mod filter;
pub mod languages;
pub mod names;
pub mod settings;
pub mod state;
pub mod transport;

pub use browser::{Completion, RegionBrowser};
pub use error::{BrowserError, RequestError, SettingsError, StorageError};
pub use filter::filter_hierarchies;
pub use languages::collect_languages;
pub use names::{format_area_tag, project_name};
pub use settings::{FileStorage, KeyValueStorage, MemoryStorage, Settings, SettingsStore};
pub use state::ViewState;
pub use transport::{HttpRegionApi, RegionApi, DEFAULT_REQUEST_TIMEOUT};

#[cfg(test)]
#[path = "tests/transport_tests.rs"]
mod transport_tests;
