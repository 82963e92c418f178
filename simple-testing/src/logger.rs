//! Leveled line emitter with a console sink and a file sink.
//!
//! A record is emitted only when `priority <= level`. Console lines are
//! colorized when the sink supports it; file lines are always plain text,
//! one record per line, appended.

use crate::config::LoggerConfig;
use crate::error::LoggerError;
use crate::style::{Category, Message};
use chrono::Local;
use std::fs::{File, OpenOptions};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub message: Message,
    pub priority: u32,
    pub category: Category,
}

impl LogRecord {
    pub fn new(category: Category, message: impl Into<Message>, priority: u32) -> Self {
        Self {
            message: message.into(),
            priority,
            category,
        }
    }
}

type ConsoleSink = Box<dyn Write + Send>;

/// Owns both sinks. Each sink sits behind its own mutex so a logger shared
/// between evaluators never interleaves partial lines.
pub struct Logger {
    level: u32,
    log_file: PathBuf,
    ansi: bool,
    timestamps: bool,
    console: Mutex<ConsoleSink>,
    file: Mutex<Option<File>>,
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("log_file", &self.log_file)
            .field("ansi", &self.ansi)
            .field("timestamps", &self.timestamps)
            .finish_non_exhaustive()
    }
}

impl Logger {
    /// Logger writing to stdout.
    pub fn new(config: LoggerConfig) -> Self {
        let ansi = config.color.resolve(io::stdout().is_terminal());
        Self::build(config, Box::new(io::stdout()), ansi)
    }

    /// Logger writing console records to `writer`. `ColorChoice::Auto`
    /// resolves to no color here since the writer is not a terminal.
    pub fn with_console<W>(config: LoggerConfig, writer: W) -> Self
    where
        W: Write + Send + 'static,
    {
        let ansi = config.color.resolve(false);
        Self::build(config, Box::new(writer), ansi)
    }

    fn build(config: LoggerConfig, console: ConsoleSink, ansi: bool) -> Self {
        Self {
            level: config.level,
            log_file: config.log_file,
            ansi,
            timestamps: config.timestamps,
            console: Mutex::new(console),
            file: Mutex::new(None),
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn log_file(&self) -> &Path {
        &self.log_file
    }

    pub fn ansi(&self) -> bool {
        self.ansi
    }

    pub fn enabled(&self, priority: u32) -> bool {
        priority <= self.level
    }

    // --- Console ---

    pub fn log(&self, record: &LogRecord) -> Result<(), LoggerError> {
        if !self.enabled(record.priority) {
            return Ok(());
        }
        let mut line = record.message.render(self.ansi);
        line.push('\n');
        let mut console = lock(&self.console);
        console
            .write_all(line.as_bytes())
            .and_then(|_| console.flush())
            .map_err(LoggerError::Console)
    }

    pub fn debug(&self, message: impl Into<Message>, priority: u32) -> Result<(), LoggerError> {
        self.log(&LogRecord::new(Category::Debug, message, priority))
    }

    pub fn success(&self, message: impl Into<Message>, priority: u32) -> Result<(), LoggerError> {
        self.log(&LogRecord::new(Category::Success, message, priority))
    }

    pub fn error(&self, message: impl Into<Message>, priority: u32) -> Result<(), LoggerError> {
        self.log(&LogRecord::new(Category::Error, message, priority))
    }

    // --- File ---

    /// Append `record` to the configured destination. The handle is opened
    /// on first use and kept for the lifetime of the logger.
    ///
    /// Each record goes out as one `write_all` on an append-mode handle, so
    /// separate loggers sharing a path never split a line.
    pub fn log_to_file(&self, record: &LogRecord) -> Result<(), LoggerError> {
        if !self.enabled(record.priority) {
            return Ok(());
        }
        let line = self.file_line(record);
        let mut slot = lock(&self.file);

        if slot.is_none() {
            *slot = Some(open_append(&self.log_file)?);
        }
        let result = match slot.as_mut() {
            Some(file) => file.write_all(line.as_bytes()).and_then(|_| file.flush()),
            None => Ok(()),
        };

        result.map_err(|source| {
            // Drop the handle so the next call reopens the destination.
            *slot = None;
            file_error(&self.log_file, source)
        })
    }

    pub fn debug_to_file(
        &self,
        message: impl Into<Message>,
        priority: u32,
    ) -> Result<(), LoggerError> {
        self.log_to_file(&LogRecord::new(Category::Debug, message, priority))
    }

    /// Append one line to an arbitrary destination: open, append, close.
    pub fn debug_to(
        &self,
        message: impl Into<Message>,
        destination: &Path,
        priority: u32,
    ) -> Result<(), LoggerError> {
        let record = LogRecord::new(Category::Debug, message, priority);
        if !self.enabled(record.priority) {
            return Ok(());
        }
        let line = self.file_line(&record);
        // Hold the file-sink lock so writes to the configured destination and
        // ad-hoc destinations never race each other.
        let _guard = lock(&self.file);
        let mut file = open_append(destination)?;
        file.write_all(line.as_bytes())
            .map_err(|source| file_error(destination, source))
    }

    /// Plain text of `record` terminated by exactly one newline. Line breaks
    /// inside the message are escaped so a record never spans lines.
    fn file_line(&self, record: &LogRecord) -> String {
        let text = escape_line_breaks(&record.message.render_plain());
        if self.timestamps {
            format!(
                "{} [{}] {}\n",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.category.label(),
                text
            )
        } else {
            format!("{}\n", text)
        }
    }
}

fn escape_line_breaks(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

fn open_append(path: &Path) -> Result<File, LoggerError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| file_error(path, source))
}

fn file_error(path: &Path, source: io::Error) -> LoggerError {
    warn!("Failed writing log file {}: {}", path.display(), source);
    LoggerError::FileWrite {
        path: path.display().to_string(),
        source,
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
