//! Pre-rendered snapshots for crawlers.
//!
//! Snapshots are static HTML files produced out-of-band, laid out on disk to
//! mirror URL paths. They are reachable directly under `/snapshot/*` and,
//! for requests classified as bots, transparently in place of the SPA shell.

pub mod prerender;
pub mod routes;
pub mod store;

pub use prerender::{PrerenderDecision, prerender_for_bots, snapshot_path_for};
pub use routes::routes;
pub use store::{Snapshot, SnapshotStore};
