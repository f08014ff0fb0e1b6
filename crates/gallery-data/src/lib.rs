//! Virtual user dataset for the component gallery demo server.
//!
//! This crate holds the framework-free core behind the mock user API:
//! a deterministic synthesizer mapping an ID to a user record, batch access
//! to contiguous slices of the virtual dataset, an approximate substring
//! search that never materializes the full dataset, and the signed opaque
//! cursor used by cursor-based pagination.

pub mod cursor;
pub mod directory;
pub mod estimate;
pub mod search;
pub mod user;

pub use cursor::{CursorCodec, CursorPosition};
pub use directory::UserDirectory;
pub use estimate::{DensityEstimator, ExactCount, MatchEstimator, ScanProgress};
pub use search::{SEARCH_BATCH_SIZE, SearchPage};
pub use user::{TOTAL_USERS, User, generate_user};
