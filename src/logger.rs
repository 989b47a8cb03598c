//! Logging and verbosity control for the command line tool.
//!
//! Provides a global logger with three verbosity levels:
//! - Quiet: Only the written file path (or span dump) is printed
//! - Normal: Progress messages without prefixes (default)
//! - Verbose: Timestamped colored logs including per-polygon details

use std::sync::OnceLock;
use std::time::Instant;

/// Verbosity level for controlling output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbosityLevel {
    /// Only file paths output
    Quiet,
    /// Progress messages without prefixes (default)
    Normal,
    /// Timestamped colored logs with details
    Verbose,
}

impl VerbosityLevel {
    /// Pick a level from the `-q` / `-v` flags. Quiet wins if both are set.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        match (quiet, verbose) {
            (true, _) => VerbosityLevel::Quiet,
            (false, true) => VerbosityLevel::Verbose,
            (false, false) => VerbosityLevel::Normal,
        }
    }
}

/// Global logger instance.
static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Global start time for elapsed calculations.
static START_TIME: OnceLock<Instant> = OnceLock::new();

/// Thread-safe logger for controlling application output.
#[derive(Debug)]
pub struct Logger {
    level: VerbosityLevel,
    colors_enabled: bool,
}

impl Logger {
    /// Initialize the global logger with the specified verbosity level.
    ///
    /// # Panics
    /// Panics if called more than once.
    pub fn init(level: VerbosityLevel, no_color: bool) {
        let colors_enabled = !no_color
            && std::env::var("NO_COLOR").is_err()
            && atty::is(atty::Stream::Stdout);

        START_TIME.set(Instant::now()).ok();
        LOGGER
            .set(Logger { level, colors_enabled })
            .expect("Logger already initialized");
    }

    /// Get the global logger instance.
    ///
    /// # Panics
    /// Panics if the logger hasn't been initialized.
    pub fn instance() -> &'static Logger {
        LOGGER.get().expect("Logger not initialized")
    }

    /// Get elapsed time since logger init.
    fn elapsed(&self) -> f64 {
        START_TIME
            .get()
            .map(|t| t.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }

    /// Returns true if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.level == VerbosityLevel::Verbose
    }

    /// Build a `[elapsed] [LEVEL] message` line, colored if enabled.
    fn format_line(&self, level: &str, msg: &str) -> String {
        let elapsed = self.elapsed();
        if self.colors_enabled {
            let level_color = match level {
                "ERROR" => "\x1b[31m",
                "WARN" => "\x1b[33m",
                "INFO" => "\x1b[34m",
                "DEBUG" => "\x1b[90m",
                _ => "",
            };
            format!(
                "\x1b[90m[{:.2}s]\x1b[0m {}[{}]\x1b[0m {}",
                elapsed, level_color, level, msg
            )
        } else {
            format!("[{:.2}s] [{}] {}", elapsed, level, msg)
        }
    }

    /// Log an error message (always displayed, on stderr).
    pub fn error(&self, msg: &str) {
        if self.is_verbose() {
            eprintln!("{}", self.format_line("ERROR", msg));
        } else {
            eprintln!("Error: {}", msg);
        }
    }

    /// Log a warning message (normal and verbose modes, on stderr).
    pub fn warn(&self, msg: &str) {
        match self.level {
            VerbosityLevel::Quiet => {}
            VerbosityLevel::Normal => eprintln!("Warning: {}", msg),
            VerbosityLevel::Verbose => eprintln!("{}", self.format_line("WARN", msg)),
        }
    }

    /// Output a written file path (quiet: just path, normal: message, verbose: with prefix).
    pub fn output(&self, path: &str) {
        match self.level {
            VerbosityLevel::Quiet => println!("{}", path),
            VerbosityLevel::Normal => println!("Saved: {}", path),
            VerbosityLevel::Verbose => {
                println!("{}", self.format_line("INFO", &format!("Saved: {}", path)))
            }
        }
    }

    /// Log an info message (displayed in normal mode and above).
    pub fn info(&self, msg: &str) {
        match self.level {
            VerbosityLevel::Quiet => {}
            VerbosityLevel::Normal => println!("{}", msg),
            VerbosityLevel::Verbose => println!("{}", self.format_line("INFO", msg)),
        }
    }

    /// Log a debug message (displayed only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if self.is_verbose() {
            println!("{}", self.format_line("DEBUG", msg));
        }
    }
}

/// Log an error message (always displayed).
pub fn error(msg: &str) {
    Logger::instance().error(msg);
}

/// Log a warning message (normal and verbose modes).
pub fn warn(msg: &str) {
    Logger::instance().warn(msg);
}

/// Output a file path.
pub fn output(path: &str) {
    Logger::instance().output(path);
}

/// Log an info message (displayed in normal mode and above).
pub fn info(msg: &str) {
    Logger::instance().info(msg);
}

/// Log a debug message (displayed only in verbose mode).
pub fn debug(msg: &str) {
    Logger::instance().debug(msg);
}

/// Returns true if verbose mode is enabled.
pub fn is_verbose() -> bool {
    Logger::instance().is_verbose()
}
