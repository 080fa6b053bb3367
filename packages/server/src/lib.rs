//! Capture server library.
//!
//! HTTP surface for the content structuring pipeline: the ingestion entry
//! point the browser extension posts to, a read-back listing endpoint for
//! the dashboard, a health check, and the placeholder image endpoint.
//! Startup wiring (env config, model probe, store selection) lives in the
//! `server` binary.

pub mod config;
pub mod server;

pub use config::Config;
pub use server::app::{build_app, router, AppState};
