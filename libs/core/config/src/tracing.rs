//! Process-wide error reporting and log output.

use crate::Environment;
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install the color-eyre panic and error report hooks.
///
/// Reports show the source location but not environment variables. Calling
/// it again after the hooks are installed does nothing.
pub fn install_color_eyre() {
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Filter directives used when `RUST_LOG` is unset
pub fn default_directives(environment: &Environment) -> &'static str {
    match environment {
        // request logs and above; the driver only when something is wrong
        Environment::Production => "info,tower_http=info,mongodb=warn",
        Environment::Development => "debug,tower_http=debug,mongodb=info",
    }
}

/// Install the global subscriber.
///
/// Production writes flattened JSON lines without targets; development writes
/// the pretty multi-line format. Both carry a `tracing_error::ErrorLayer` so
/// eyre reports include the active span trace, which is why facade operations
/// are instrumented:
///
/// ```ignore
/// #[instrument(skip(self), fields(task_id = %id))]
/// async fn get_task(&self, id: &str) -> TaskResult<Task> { .. }
/// ```
///
/// A subscriber that is already installed (tests) is left in place.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(environment)));
    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let installed = match environment {
        Environment::Production => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init(),
        Environment::Development => registry
            .with(tracing_subscriber::fmt::layer().with_target(false).pretty())
            .try_init(),
    };

    if installed.is_ok() {
        tracing::info!(environment = ?environment, "Tracing initialized");
    }
}
