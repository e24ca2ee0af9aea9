use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Installs the global fmt subscriber. `RUST_LOG` overrides `default_filter`.
pub fn init(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .finish();
    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing::subscriber::set_global_default(subscriber);
}
