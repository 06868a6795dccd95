use std::path::Path;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var naming the log file base path.
pub const LOG_ENV_VAR: &str = "HOME_LAUNCHER_LOG";

/// Initialize tracing with optional file output.
///
/// Logging is disabled by default so it never interleaves with the screen
/// rendered on stdout. Set `HOME_LAUNCHER_LOG` to a file path, or pass
/// `override_path`, to enable it. The filter comes from `RUST_LOG` and
/// defaults to `info`.
///
/// Log files are created with unique names to prevent conflicts when
/// multiple instances run simultaneously: `{path}.{timestamp}.{pid}`
pub fn init_tracing(override_path: Option<&Path>) {
    let log_path = match override_path {
        Some(path) => path.display().to_string(),
        None => match std::env::var(LOG_ENV_VAR) {
            Ok(path) if !path.is_empty() => path,
            _ => return,
        },
    };

    let unique_path = unique_log_path(&log_path);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(file) = std::fs::File::create(&unique_path) else {
        eprintln!("Warning: Failed to create log file: {}", unique_path);
        return;
    };

    let file_layer = fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_level(true);

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();
}

fn unique_log_path(base: &str) -> String {
    let pid = std::process::id();
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    format!("{}.{}.{}", base, timestamp, pid)
}
