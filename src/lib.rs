//! # Countries Explorer
//!
//! A terminal directory of world countries.
//!
//! ## Features
//! - Sign-in gate (client-side validation only)
//! - Auto-rotating featured country slider
//! - Two-column country list with region filter
//! - Incremental "load more" paging and page size selection
//! - Country data fetched once from a public REST endpoint
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use models::{Country, Session, Slide};
pub use config::Config;
pub use error::FetchError;
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, CountriesAction, CountriesState, CountryStore};
pub use network::NetworkActor;
