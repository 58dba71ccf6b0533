use crate::config::{DEFAULT_DIRECTIVE, LOG_ENV_VAR};
use std::str::FromStr as _;
use tracing_subscriber::{EnvFilter, filter::Directive};

/// Route log output through the test harness so it only shows for failing tests.
pub fn init() {
    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(Directive::from_str(DEFAULT_DIRECTIVE).unwrap())
                .with_env_var(LOG_ENV_VAR)
                .from_env_lossy(),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
