//! Core library for the `getweath` client.
//!
//! This crate defines:
//! - The weather provider abstraction and its wttr.in / Geoapify backends
//! - The bounded most-recently-used history of visited locations
//! - Session orchestration: fetch-on-change with stale-result discard
//! - Pure presentation mapping from conditions to icons and backgrounds
//! - Key-value persistence for the last location and the visit history
//!
//! It is used by `getweath-cli`, but can also be reused by other binaries.

pub mod config;
pub mod history;
pub mod model;
pub mod notify;
pub mod presentation;
pub mod provider;
pub mod session;
pub mod store;

pub use config::Config;
pub use history::LocationHistory;
pub use model::{ForecastEntry, WeatherBundle, WeatherSnapshot};
pub use notify::{Notifier, NullNotifier};
pub use provider::{ErrorKind, FetchError, WeatherProvider, wttr::WttrProvider};
pub use session::{FetchTicket, SessionState, WeatherSession};
pub use store::{FileStore, KeyValueStore, MemoryStore};
