//! HTTP server for the component gallery demo.
//!
//! Serves the SPA shell and its assets, a mock paginated user API over a
//! synthetic million-row dataset, and pre-rendered snapshots to crawlers.

pub mod bot;
pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod router;
pub mod site;
pub mod snapshot;
pub mod state;
pub mod tracing;
pub mod users;

pub use config::ApiConfig;
pub use state::ApiState;
