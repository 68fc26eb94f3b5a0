//! Tracing setup.
//!
//! The terminal belongs to the UI, so log records go to a file. The filter
//! comes from `VIBE_LOG` when set, otherwise from `log.level`.

use std::fs::{self, File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogSettings, default_log_path};

pub const FILTER_ENV: &str = "VIBE_LOG";

/// Install the global subscriber. Failure to open the log file is reported
/// once on stderr and the player runs without logging.
pub fn init(settings: &LogSettings) {
    let Some(path) = settings.file.clone().or_else(default_log_path) else {
        eprintln!("vibe: no log file location (HOME is unset), logging disabled");
        return;
    };

    let file = match open_log_file(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("vibe: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let result = tracing_subscriber::registry()
        .with(filter(&settings.level))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_target(false)
                .with_writer(Mutex::new(file)),
        )
        .try_init();

    if let Err(e) = result {
        eprintln!("vibe: logging already initialised: {e}");
    }
}

/// `VIBE_LOG` wins; an unparsable level falls back to `info`.
pub fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_env(FILTER_ENV)
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

fn open_log_file(path: &Path) -> std::io::Result<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}
