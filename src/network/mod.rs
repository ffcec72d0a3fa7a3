//! Network layer - country list fetching
//!
//! The Network actor receives fetch commands and sends back one settlement per fetch.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
