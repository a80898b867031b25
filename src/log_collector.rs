//! Logging sink for the `log` facade.
//!
//! `LogCollector` formats every record as `[HH:MM:SS.mmm] [LEVEL] message`,
//! writes it to stderr and, when a log file is configured, appends it there
//! as well.

use chrono::Local;
use log::{LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// A formatted log line.
#[derive(Clone, Debug)]
pub struct LogLine {
    pub message: String,
    pub level: log::Level,
    pub timestamp: String,
}

impl LogLine {
    pub fn new(level: log::Level, message: String) -> Self {
        LogLine {
            message,
            level,
            timestamp: Local::now().format("%H:%M:%S%.3f").to_string(),
        }
    }

    pub fn formatted(&self) -> String {
        format!("[{}] [{}] {}", self.timestamp, self.level, self.message)
    }
}

/// Logger writing to stderr and an optional append-only file
#[derive(Clone)]
pub struct LogCollector {
    level: LevelFilter,
    file: Option<Arc<Mutex<File>>>,
    file_path: Option<PathBuf>,
}

impl LogCollector {
    /// Stderr-only collector.
    pub fn new(level: LevelFilter) -> Self {
        LogCollector {
            level,
            file: None,
            file_path: None,
        }
    }

    /// Also append every line to `path`, creating parent directories as needed.
    pub fn with_file(mut self, path: &Path) -> Result<Self, String> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("Failed to create log directory: {}", e))?;
            }
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| format!("Failed to open log file {}: {}", path.display(), e))?;
        self.file = Some(Arc::new(Mutex::new(file)));
        self.file_path = Some(path.to_path_buf());
        Ok(self)
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    /// Register this collector as the global `log` backend.
    pub fn install(self) -> Result<(), String> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))
            .map(|()| log::set_max_level(level))
            .map_err(|e| format!("Failed to register logger: {}", e))
    }

    fn write_line(&self, line: &LogLine) {
        let formatted = line.formatted();
        eprintln!("{}", formatted);

        if let Some(file) = &self.file {
            if let Ok(mut handle) = file.lock() {
                let _ = writeln!(handle, "{}", formatted);
            }
        }
    }
}

impl Log for LogCollector {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.write_line(&LogLine::new(record.level(), record.args().to_string()));
        }
    }

    fn flush(&self) {
        if let Some(file) = &self.file {
            if let Ok(mut handle) = file.lock() {
                let _ = handle.flush();
            }
        }
    }
}
