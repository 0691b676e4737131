//! Vancare — chat concierge and admin dashboard for a camper-van repair
//! matching service.
//!
//! Diagnosis, factory matching, and cost estimation all run in the external
//! backend; this crate owns the client side of that relationship: the typed
//! API client, the per-client session identity, the chat conversation
//! controller, and the presentational shell that renders them.

pub mod api;
pub mod chat;
pub mod files;
pub mod session;
pub mod types;

#[cfg(feature = "ui")]
pub mod theme;
#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
