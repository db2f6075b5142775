//! Bridge from the `log` crate facade
//!
//! Records emitted through `log::info!` and friends are routed to the logger
//! of the component named by the record's target, so libraries using the
//! facade obey the same hierarchical configuration.
//!
//! | `log` level      | level      |
//! |------------------|------------|
//! | `Trace`, `Debug` | `Debug`    |
//! | `Info`           | `Info`     |
//! | `Warn`           | `Warning`  |
//! | `Error`          | `Error`    |

use crate::core::{CallSite, LogEvent, LogLevel, LoggerError, LoggerManager, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub struct LogBridge {
    manager: &'static LoggerManager,
}

impl LogBridge {
    pub fn new(manager: &'static LoggerManager) -> Self {
        Self { manager }
    }

    /// Install the bridge as the `log` facade's logger
    ///
    /// Fails if another logger was installed first.
    pub fn init(manager: &'static LoggerManager, max_level: LevelFilter) -> Result<()> {
        log::set_boxed_logger(Box::new(Self::new(manager)))
            .map_err(|e| LoggerError::other(format!("cannot install log bridge: {}", e)))?;
        log::set_max_level(max_level);
        Ok(())
    }

    pub fn map_level(level: log::Level) -> LogLevel {
        match level {
            log::Level::Trace | log::Level::Debug => LogLevel::Debug,
            log::Level::Info => LogLevel::Info,
            log::Level::Warn => LogLevel::Warning,
            log::Level::Error => LogLevel::Error,
        }
    }

    fn call_site(record: &Record<'_>) -> CallSite {
        let line = record.line().unwrap_or(0);
        match (record.file_static(), record.file()) {
            (Some(file), _) => CallSite::new(file, line, 0),
            (None, Some(file)) => CallSite::new(file.to_string(), line, 0),
            (None, None) => CallSite::unknown(),
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        self.manager
            .logger(metadata.target())
            .map(|logger| logger.is_enabled_for(Self::map_level(metadata.level())))
            .unwrap_or(false)
    }

    fn log(&self, record: &Record<'_>) {
        let logger = match self.manager.logger(record.target()) {
            Ok(logger) => logger,
            Err(e) => {
                eprintln!("[LOGGER ERROR] No logger for '{}': {}", record.target(), e);
                return;
            }
        };

        let level = Self::map_level(record.level());
        if !logger.core().admit(level) {
            return;
        }

        let event = LogEvent::new(record.target(), level, Self::call_site(record))
            .with_message(record.args().to_string());

        if let Err(e) = logger.core().dispatch(&event) {
            eprintln!("[LOGGER ERROR] {}", e);
        }
    }

    fn flush(&self) {
        if let Err(e) = self.manager.flush() {
            eprintln!("[LOGGER ERROR] Flush failed: {}", e);
        }
    }
}
