//! Diagnostics and session transcripts.
//!
//! Diagnostics go through `tracing` to a log file, never to the terminal the
//! UI is drawing on. Transcripts, when enabled, write every output line to a
//! daily file named `<character>_<date>.log` in the configured directory
//! (default: `~/.local/share/playhud/transcripts/`).

use crate::app::state::{LineKind, OutputLine};
use crate::config::{expand_home, LoggingConfig};
use anyhow::{Context, Result};
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Without a log file nothing is installed and diagnostics are dropped.
pub fn init_tracing(config: &LoggingConfig, log_file: Option<&str>) -> Result<()> {
    let Some(path) = log_file.or(config.log_file.as_deref()) else {
        return Ok(());
    };
    let path = expand_home(path);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

/// Writes output lines to per-character daily transcript files. The
/// character is passed with each line, so a rename by the server starts a
/// new file.
///
/// File handles are cached for the lifetime of the logger. A file that
/// cannot be opened disables the transcript for the rest of the session.
pub struct TranscriptLogger {
    enabled: bool,
    dir: PathBuf,
    file_handles: HashMap<String, File>,
}

impl TranscriptLogger {
    pub fn new(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.transcript,
            dir: expand_home(&config.transcript_dir),
            file_handles: HashMap::new(),
        }
    }

    pub fn log_line(&mut self, character: &str, line: &OutputLine) {
        if !self.enabled {
            return;
        }

        let text = match line.kind {
            LineKind::Game => format!("[{}] {}", line.timestamp, line.text),
            LineKind::Echo => format!("[{}] > {}", line.timestamp, line.text),
            LineKind::System => format!("[{}] *** {}", line.timestamp, line.text),
            LineKind::Error => format!("[{}] !!! {}", line.timestamp, line.text),
        };

        let safe_name: String = character
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        let date = chrono::Local::now().format("%Y-%m-%d").to_string();
        let filename = format!("{}_{}.log", safe_name, date);

        if !self.file_handles.contains_key(&filename) {
            match self.open(&filename) {
                Ok(file) => {
                    self.file_handles.insert(filename.clone(), file);
                }
                Err(e) => {
                    warn!("transcript disabled: {:#}", e);
                    self.enabled = false;
                    return;
                }
            }
        }

        if let Some(handle) = self.file_handles.get_mut(&filename) {
            if let Err(e) = writeln!(handle, "{}", text) {
                warn!("transcript write failed: {}", e);
            }
        }
    }

    fn open(&self, filename: &str) -> Result<File> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        let path = self.dir.join(filename);
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))
    }
}
