use crate::config::LoggingConfig;
use crate::domains::logger::{DomainLogger, DynLogger};
use chrono::Utc;
use std::sync::Arc;

/// Appends to a file through `fast_log`, which owns the global `log` backend.
pub struct FileLogger;

impl FileLogger {
    pub fn init(path: &str, level: log::LevelFilter) -> Result<Self, Box<dyn std::error::Error>> {
        fast_log::init(fast_log::config::Config::new().file(path).level(level))?;
        Ok(FileLogger)
    }
}

impl DomainLogger for FileLogger {
    fn info(&self, msg: &str) {
        log::info!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn warn(&self, msg: &str) {
        log::warn!("{} - {}", Utc::now().to_rfc3339(), msg);
    }

    fn error(&self, msg: &str) {
        log::error!("{} - {}", Utc::now().to_rfc3339(), msg);
    }
}

/// Forwards to `tracing`, so messages land wherever the subscriber sends them.
pub struct TracingLogger;

impl DomainLogger for TracingLogger {
    fn info(&self, msg: &str) {
        tracing::info!(target: "beacon_net::report", "{}", msg);
    }

    fn warn(&self, msg: &str) {
        tracing::warn!(target: "beacon_net::report", "{}", msg);
    }

    fn error(&self, msg: &str) {
        tracing::error!(target: "beacon_net::report", "{}", msg);
    }
}

/// Drops everything. Default for tests.
pub struct NoopLogger;

impl DomainLogger for NoopLogger {
    fn info(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}

/// Sends every message to each of its loggers in order.
pub struct FanoutLogger {
    loggers: Vec<DynLogger>,
}

impl FanoutLogger {
    pub fn new(loggers: Vec<DynLogger>) -> Self {
        Self { loggers }
    }
}

impl DomainLogger for FanoutLogger {
    fn info(&self, msg: &str) {
        self.loggers.iter().for_each(|l| l.info(msg));
    }

    fn warn(&self, msg: &str) {
        self.loggers.iter().for_each(|l| l.warn(msg));
    }

    fn error(&self, msg: &str) {
        self.loggers.iter().for_each(|l| l.error(msg));
    }
}

pub fn init_noop_logger() -> DynLogger {
    Arc::new(NoopLogger)
}

/// Builds the report logger described by `config`: tracing always, plus a
/// file when one is configured. A file that cannot be opened falls back to
/// tracing only, with a warning.
pub fn init_logger(config: &LoggingConfig) -> DynLogger {
    let tracing_logger: DynLogger = Arc::new(TracingLogger);
    let Some(path) = config.file.as_deref() else {
        return tracing_logger;
    };

    match FileLogger::init(path, config.level.as_filter()) {
        Ok(file_logger) => {
            let file_logger: DynLogger = Arc::new(file_logger);
            Arc::new(FanoutLogger::new(vec![tracing_logger, file_logger]))
        }
        Err(e) => {
            tracing_logger.warn(&format!("Failed to initialize file logger at {}: {}", path, e));
            tracing_logger
        }
    }
}
