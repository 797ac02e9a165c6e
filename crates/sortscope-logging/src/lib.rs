//! Logging configuration and utilities for sortscope.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::Write;

/// Log level for filtering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn rank(self) -> u8 {
        match self {
            LogLevel::Error => 0,
            LogLevel::Warn => 1,
            LogLevel::Info => 2,
            LogLevel::Debug => 3,
            LogLevel::Trace => 4,
        }
    }

    /// Check if this level should log messages at the given level
    pub fn should_log(&self, level: LogLevel) -> bool {
        self.rank() >= level.rank()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Plain,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum log level to output
    #[serde(default)]
    pub level: LogLevel,
    /// Output format
    #[serde(default)]
    pub format: LogFormat,
    /// Enable timestamps
    #[serde(default = "default_true")]
    pub timestamps: bool,
    /// Component-specific log levels
    #[serde(default)]
    pub component_levels: HashMap<String, LogLevel>,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            format: LogFormat::Plain,
            timestamps: true,
            component_levels: HashMap::new(),
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_timestamps(mut self, timestamps: bool) -> Self {
        self.timestamps = timestamps;
        self
    }

    /// Set a component-specific log level
    pub fn with_component_level(mut self, component: impl Into<String>, level: LogLevel) -> Self {
        self.component_levels.insert(component.into(), level);
        self
    }

    /// Get the effective log level for a component
    pub fn effective_level(&self, component: Option<&str>) -> LogLevel {
        component
            .and_then(|c| self.component_levels.get(c).copied())
            .unwrap_or(self.level)
    }

    /// Check if a message at the given level should be logged
    pub fn should_log(&self, level: LogLevel, component: Option<&str>) -> bool {
        self.effective_level(component).should_log(level)
    }
}

/// A log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level,
            component: None,
            message: message.into(),
        }
    }

    pub fn with_component(level: LogLevel, component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: Some(component.into()),
            ..Self::new(level, message)
        }
    }

    /// Format as a single line.
    pub fn format(&self, format: LogFormat, timestamps: bool) -> String {
        match format {
            LogFormat::Json => serde_json::to_string(self).unwrap_or_else(|_| self.message.clone()),
            LogFormat::Plain => {
                let mut line = String::new();
                if timestamps {
                    line.push_str(&self.timestamp);
                    line.push(' ');
                }
                line.push_str(self.level.as_str());
                if let Some(component) = &self.component {
                    line.push_str(" [");
                    line.push_str(component);
                    line.push(']');
                }
                line.push_str(": ");
                line.push_str(&self.message);
                line
            }
        }
    }
}

/// Log collector for capturing log entries
#[derive(Debug, Default)]
pub struct LogCollector {
    entries: Vec<LogEntry>,
}

impl LogCollector {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }

    pub fn push(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Get entries matching a level
    pub fn filter_by_level(&self, level: LogLevel) -> Vec<&LogEntry> {
        self.entries.iter().filter(|e| e.level == level).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Where a [`Logger`] sends the entries it accepts.
#[derive(Debug)]
enum Sink {
    Stderr,
    Collect(LogCollector),
}

/// Filters entries by [`LoggingConfig`] and writes them out.
#[derive(Debug)]
pub struct Logger {
    config: LoggingConfig,
    sink: Sink,
}

impl Logger {
    /// Logger writing to stderr.
    pub fn stderr(config: LoggingConfig) -> Self {
        Self {
            config,
            sink: Sink::Stderr,
        }
    }

    /// Logger that keeps entries in memory instead of printing them.
    pub fn collecting(config: LoggingConfig) -> Self {
        Self {
            config,
            sink: Sink::Collect(LogCollector::new()),
        }
    }

    pub fn config(&self) -> &LoggingConfig {
        &self.config
    }

    /// Collected entries; empty for a stderr logger.
    pub fn entries(&self) -> &[LogEntry] {
        match &self.sink {
            Sink::Collect(collector) => collector.entries(),
            Sink::Stderr => &[],
        }
    }

    pub fn log(&mut self, level: LogLevel, component: &str, message: impl Into<String>) {
        if !self.config.should_log(level, Some(component)) {
            return;
        }
        let entry = LogEntry::with_component(level, component, message);
        match &mut self.sink {
            Sink::Stderr => {
                let line = entry.format(self.config.format, self.config.timestamps);
                // Nothing sensible to do if stderr is gone.
                let _ = writeln!(std::io::stderr().lock(), "{line}");
            }
            Sink::Collect(collector) => collector.push(entry),
        }
    }

    pub fn error(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Error, component, message);
    }

    pub fn warn(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Warn, component, message);
    }

    pub fn info(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Info, component, message);
    }

    pub fn debug(&mut self, component: &str, message: impl Into<String>) {
        self.log(LogLevel::Debug, component, message);
    }
}
