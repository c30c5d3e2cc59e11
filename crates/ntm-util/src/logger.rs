//! Leveled logging capability injected into the matcher and the
//! orchestration layer.
//!
//! Core code never constructs a logger on its own; callers hand in an
//! `Arc<dyn Logger>`. [`NoopLogger`] is the default so tests stay silent,
//! [`DebugLogger`] forwards to `tracing`.

use std::sync::Arc;

/// Prefix attached to every message emitted by [`DebugLogger`].
pub const LOG_PREFIX: &str = "next-transpile-modules";

/// A small leveled logging interface.
///
/// Implementations must not panic: logging is observability only and never
/// influences the result of the code that calls it.
pub trait Logger: Send + Sync {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
    fn error(&self, message: &str);
}

/// Drops every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn debug(&self, _message: &str) {}
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
    fn error(&self, _message: &str) {}
}

/// Forwards to `tracing`, prefixing each message.
///
/// `debug` and `info` are only emitted when the logger is enabled (the
/// user's `debug` option); `warn` and `error` always go through.
#[derive(Debug, Clone, Copy)]
pub struct DebugLogger {
    enabled: bool,
}

impl DebugLogger {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Logger for DebugLogger {
    fn debug(&self, message: &str) {
        if self.enabled {
            tracing::debug!(target: "ntm", "{LOG_PREFIX}: {message}");
        }
    }

    fn info(&self, message: &str) {
        if self.enabled {
            tracing::info!(target: "ntm", "{LOG_PREFIX}: {message}");
        }
    }

    fn warn(&self, message: &str) {
        tracing::warn!(target: "ntm", "{LOG_PREFIX}: {message}");
    }

    fn error(&self, message: &str) {
        tracing::error!(target: "ntm", "{LOG_PREFIX}: {message}");
    }
}

/// Build the shared logger for a given `debug` setting.
pub fn create_logger(enabled: bool) -> Arc<dyn Logger> {
    Arc::new(DebugLogger::new(enabled))
}

/// The default, silent logger.
pub fn noop() -> Arc<dyn Logger> {
    Arc::new(NoopLogger)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noop_logger_accepts_everything() {
        let logger = noop();
        logger.debug("d");
        logger.info("i");
        logger.warn("w");
        logger.error("e");
    }

    #[test]
    fn debug_logger_without_subscriber_does_not_panic() {
        let logger = create_logger(true);
        logger.info("transpiled: /x.js");
        logger.warn("careful");
    }
}
