use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, fmt,
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
};

use crate::config::LoggingSettings;

const LOG_FILE_NAME: &str = "vagas.log";

/// Where log lines go. The dashboard owns the terminal, so it logs to a file.
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

pub fn default_log_path() -> PathBuf {
    if let Some(proj_dirs) = directories::ProjectDirs::from("", "", "vagas") {
        proj_dirs.data_dir().join(LOG_FILE_NAME)
    } else {
        PathBuf::from(LOG_FILE_NAME)
    }
}

/// Install the global subscriber. `RUST_LOG` directives refine the configured level.
pub fn init(settings: &LoggingSettings, target: LogTarget) -> Result<()> {
    let env_filter = EnvFilter::builder()
        .with_default_directive(settings.level.into())
        .from_env_lossy();

    let fmt_layer = match target {
        LogTarget::Stderr => format_layer(fmt::layer().with_writer(std::io::stderr), settings.json),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            format_layer(
                fmt::layer().with_ansi(false).with_writer(Mutex::new(file)),
                settings.json,
            )
        }
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
        .context("failed to install tracing subscriber")
}

fn format_layer<S, W>(
    layer: fmt::Layer<S, fmt::format::DefaultFields, fmt::format::Format, W>,
    json: bool,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a> + 'static,
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        layer.json().with_current_span(true).with_target(true).boxed()
    } else {
        layer.compact().with_target(true).boxed()
    }
}

fn open_log_file(path: &Path) -> Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_log_path_names_the_file() {
        assert!(default_log_path().ends_with(LOG_FILE_NAME));
    }

    #[test]
    fn test_open_log_file_creates_parent_dirs_and_appends() {
        use std::io::Write;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(LOG_FILE_NAME);

        writeln!(open_log_file(&path).unwrap(), "first").unwrap();
        writeln!(open_log_file(&path).unwrap(), "second").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "first\nsecond\n");
    }
}
