use std::sync::Arc;

use crate::{
    estimate::{DensityEstimator, MatchEstimator},
    user::{TOTAL_USERS, User, generate_user},
};

/// Handle on the virtual user dataset.
///
/// Nothing is stored: every read synthesizes the requested rows. The dataset
/// size and the search estimator are configurable so that tests can run
/// against a few hundred rows with exact counts.
#[derive(Debug, Clone)]
pub struct UserDirectory {
    total_users: u64,
    pub(crate) estimator: Arc<dyn MatchEstimator>,
}

impl UserDirectory {
    /// Dataset of `total_users` rows using the default density estimator
    pub fn new(total_users: u64) -> Self {
        Self {
            total_users,
            estimator: Arc::new(DensityEstimator::default()),
        }
    }

    /// Replace the search estimator
    pub fn with_estimator(mut self, estimator: impl MatchEstimator + 'static) -> Self {
        self.estimator = Arc::new(estimator);
        self
    }

    /// Number of rows in the dataset
    pub const fn total_users(&self) -> u64 {
        self.total_users
    }

    /// Look up a single user by its 1-based ID, `None` when out of range
    pub fn user(&self, id: u64) -> Option<User> {
        (1..=self.total_users)
            .contains(&id)
            .then(|| generate_user(id))
    }

    /// Materialize rows `[start_index, start_index + count)`, cut at the end of
    /// the dataset. Row `i` holds the user with ID `i + 1`.
    pub fn batch(&self, start_index: u64, count: u64) -> Vec<User> {
        let end = start_index.saturating_add(count).min(self.total_users);
        if start_index >= end {
            return Vec::new();
        }

        (start_index..end).map(|i| generate_user(i + 1)).collect()
    }
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new(TOTAL_USERS)
    }
}
