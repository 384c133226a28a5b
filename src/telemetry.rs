//! JSON trace sink. The simulator owns the terminal, so logs go to a file.
//!
//! Engine events (page switches, dropped events, failed actions) carry the
//! page and slot as structured fields, one JSON object per line.

use crate::config::AppConfig;
use std::env;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::Level;
use tracing_subscriber::fmt::time::UtcTime;

const TRACE_LOG_ENV: &str = "PAGEDECK_TRACE_LOG";
const DEFAULT_TRACE_FILE: &str = "pagedeck_trace.jsonl";

static TRACE_SINK: OnceLock<Option<PathBuf>> = OnceLock::new();

/// `PAGEDECK_TRACE_LOG` when set, else a file in the temp directory.
pub fn tracing_log_path() -> PathBuf {
    env::var_os(TRACE_LOG_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| env::temp_dir().join(DEFAULT_TRACE_FILE))
}

fn trace_level(config: &AppConfig) -> Level {
    if config.debug_logs {
        Level::DEBUG
    } else {
        Level::INFO
    }
}

/// Install the global subscriber once and return the file it writes to.
///
/// Without `--logs` nothing is installed and every engine event is discarded.
/// Must run before the terminal enters raw mode: an unwritable sink is
/// reported on stderr.
pub fn init_tracing(config: &AppConfig) -> Option<PathBuf> {
    if !config.logging_enabled() {
        return None;
    }
    let level = trace_level(config);
    TRACE_SINK
        .get_or_init(|| {
            let path = tracing_log_path();
            let file = match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => file,
                Err(err) => {
                    eprintln!("pagedeck: trace log {} unavailable: {err}", path.display());
                    return None;
                }
            };
            let subscriber = tracing_subscriber::fmt()
                .json()
                .with_max_level(level)
                .with_timer(UtcTime::rfc_3339())
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber).ok()?;
            tracing::info!(
                path = %path.display(),
                profile = config.profile.label(),
                max_level = %level,
                "trace sink opened"
            );
            Some(path)
        })
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn logging_off_installs_nothing() {
        let config = AppConfig::parse_from(["test-app", "--no-logs"]);
        assert_eq!(init_tracing(&config), None);
    }

    #[test]
    fn debug_flag_raises_trace_level() {
        let quiet = AppConfig::parse_from(["test-app", "--logs"]);
        let chatty = AppConfig::parse_from(["test-app", "--logs", "--debug-logs"]);
        assert_eq!(trace_level(&quiet), Level::INFO);
        assert_eq!(trace_level(&chatty), Level::DEBUG);
    }

    #[test]
    fn default_trace_file_lives_in_temp_dir() {
        if env::var_os(TRACE_LOG_ENV).is_some() {
            return;
        }
        assert_eq!(tracing_log_path(), env::temp_dir().join(DEFAULT_TRACE_FILE));
    }
}
