use std::{
    fmt,
    path::PathBuf,
    sync::Arc,
    time::{Duration, Instant},
};

use gallery_data::{CursorCodec, UserDirectory};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::{ApiConfig, bot::BotClassifier, config::Environment, snapshot::SnapshotStore};

#[derive(Clone)]
pub struct ApiState {
    pub directory: UserDirectory,
    pub cursors: CursorCodec,
    pub bots: Arc<BotClassifier>,
    pub snapshots: SnapshotStore,
    pub cursor_latency: Duration,
    pub public_dir: PathBuf,
    pub public_url: Option<String>,
    pub environment: Environment,
    pub started_at: Instant,
    pub metrics: Option<PrometheusHandle>,
}

impl ApiState {
    pub fn new(config: &ApiConfig) -> Self {
        Self {
            directory: UserDirectory::new(config.total_users),
            cursors: CursorCodec::new(config.cursor_secret.clone(), config.total_users),
            bots: Arc::new(BotClassifier::with_capacity(config.bot_cache_capacity)),
            snapshots: SnapshotStore::new(config.snapshot_dir.clone()),
            cursor_latency: Duration::from_millis(config.cursor_latency_ms),
            public_dir: config.public_dir.clone(),
            public_url: config.public_url.clone(),
            environment: config.env,
            started_at: Instant::now(),
            metrics: None,
        }
    }

    /// Expose the installed Prometheus recorder on `/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Swap the bot classifier, e.g. for one with a custom verdict cache
    pub fn with_bot_classifier(mut self, classifier: BotClassifier) -> Self {
        self.bots = Arc::new(classifier);
        self
    }
}

impl fmt::Debug for ApiState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiState")
            .field("directory", &self.directory)
            .field("cursors", &self.cursors)
            .field("bots", &self.bots)
            .field("snapshots", &self.snapshots)
            .field("cursor_latency", &self.cursor_latency)
            .field("environment", &self.environment)
            .field("metrics", &self.metrics.is_some())
            .finish_non_exhaustive()
    }
}
