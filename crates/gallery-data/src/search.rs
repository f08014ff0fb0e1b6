use crate::{directory::UserDirectory, estimate::ScanProgress, user::User};

/// Records synthesized per scan step
pub const SEARCH_BATCH_SIZE: u64 = 1000;

/// One page of search results
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Matching users, at most `limit` of them
    pub users: Vec<User>,
    /// Total number of matches, estimated when `exact` is false
    pub total_matches: u64,
    /// Whether the whole dataset was scanned
    pub exact: bool,
}

impl UserDirectory {
    /// Case-insensitive substring search over name, email and role.
    ///
    /// Scans the dataset from the start in batches of [`SEARCH_BATCH_SIZE`].
    /// Matches are counted as a stream: the first `start_index` matches are
    /// skipped, the next `limit` are collected. After each batch the
    /// directory's estimator may end the scan, in which case the reported
    /// total is its estimate rather than the exact count.
    ///
    /// `term` is expected to be non-empty; an empty term matches everything.
    pub fn search(&self, term: &str, start_index: u64, limit: usize) -> SearchPage {
        let needle = term.to_lowercase();
        let mut users = Vec::with_capacity(limit.min(SEARCH_BATCH_SIZE as usize));
        let mut matches = 0u64;
        let mut scanned = 0u64;

        while scanned < self.total_users() {
            let batch = self.batch(scanned, SEARCH_BATCH_SIZE);
            scanned += batch.len() as u64;

            for user in batch {
                if !user.matches(&needle) {
                    continue;
                }
                matches += 1;
                if matches > start_index && users.len() < limit {
                    users.push(user);
                }
            }

            let progress = ScanProgress {
                matches,
                scanned,
                dataset_size: self.total_users(),
                page_full: users.len() >= limit,
            };

            if scanned < self.total_users() && self.estimator.should_stop(&progress) {
                let total_matches = self.estimator.estimate(&progress);
                tracing::debug!(
                    term,
                    scanned,
                    matches,
                    total_matches,
                    "Search stopped early, total estimated"
                );

                return SearchPage {
                    users,
                    total_matches,
                    exact: false,
                };
            }
        }

        SearchPage {
            users,
            total_matches: matches,
            exact: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TOTAL_USERS, estimate::ExactCount};

    fn brute_force(directory: &UserDirectory, term: &str) -> Vec<User> {
        let needle = term.to_lowercase();
        directory
            .batch(0, directory.total_users())
            .into_iter()
            .filter(|u| u.matches(&needle))
            .collect()
    }

    #[test]
    fn test_exact_search_on_small_dataset() {
        let directory = UserDirectory::new(2500).with_estimator(ExactCount);
        let expected = brute_force(&directory, "alice");

        let page = directory.search("ALICE", 0, 10);

        assert!(page.exact);
        assert_eq!(page.total_matches, expected.len() as u64);
        assert_eq!(page.users, expected[..10.min(expected.len())]);
    }

    #[test]
    fn test_start_index_skips_matches() {
        let directory = UserDirectory::new(2500).with_estimator(ExactCount);
        let expected = brute_force(&directory, "admin");
        assert!(expected.len() > 15);

        let page = directory.search("admin", 5, 10);

        assert_eq!(page.users, expected[5..15]);
    }

    #[test]
    fn test_start_index_past_matches_is_empty() {
        let directory = UserDirectory::new(300).with_estimator(ExactCount);
        let total = brute_force(&directory, "bob").len() as u64;

        let page = directory.search("bob", total + 10, 20);

        assert!(page.users.is_empty());
        assert_eq!(page.total_matches, total);
    }

    #[test]
    fn test_no_matches() {
        let directory = UserDirectory::new(1500);
        let page = directory.search("no-such-user-anywhere", 0, 20);

        assert!(page.users.is_empty());
        assert_eq!(page.total_matches, 0);
        assert!(page.exact);
    }

    #[test]
    fn test_early_exit_extrapolates_on_full_dataset() {
        // Every email matches, so the first batch fills the page and the threshold
        let directory = UserDirectory::default();
        let page = directory.search("example.com", 0, 20);

        assert!(!page.exact);
        assert_eq!(page.users.len(), 20);
        assert_eq!(page.total_matches, TOTAL_USERS);
    }

    #[test]
    fn test_large_limit_keeps_scanning_until_page_full() {
        let directory = UserDirectory::new(5000);
        let page = directory.search("example.com", 0, 1500);

        // First batch reaches the match threshold but not a full page
        assert_eq!(page.users.len(), 1500);
        assert!(!page.exact);
        assert_eq!(page.total_matches, 5000);
    }

    #[test]
    fn test_limit_beyond_matches_returns_short_exact_page() {
        let directory = UserDirectory::new(3000);
        let page = directory.search("example.com", 0, 5000);

        assert_eq!(page.users.len(), 3000);
        assert!(page.exact);
        assert_eq!(page.total_matches, 3000);
    }
}
