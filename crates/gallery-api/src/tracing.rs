//! Log subscriber setup.
//!
//! Development gets pretty multi-line output at `debug`, production gets one
//! flattened JSON object per event at `info`. `RUST_LOG` overrides either
//! default, e.g. `RUST_LOG=gallery_api=trace,tower_http=debug`.

use tracing_subscriber::{
    EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::config::Environment;

const DEVELOPMENT_FILTER: &str = "debug,gallery_data=debug,tower_http=debug";
const PRODUCTION_FILTER: &str = "info,gallery_data=info,tower_http=info";

/// Install the global subscriber for `env`
pub fn init_tracing(env: &Environment) {
    let default_filter = if env.is_development() {
        DEVELOPMENT_FILTER
    } else {
        PRODUCTION_FILTER
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let fmt_layer: Box<dyn Layer<Registry> + Send + Sync> = if env.is_development() {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .pretty()
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .flatten_event(true)
            .with_target(true)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer.with_filter(env_filter))
        .init();

    tracing::info!(environment = %env, "Tracing initialized");
}
