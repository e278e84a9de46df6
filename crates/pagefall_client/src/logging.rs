//! BevyLogger: simulation logger → bevy `LogPlugin` (tracing)
//!
//! Ставится до `App::new()`, заменяя ConsoleLogger, чтобы сообщения симуляции
//! шли в тот же вывод, что и логи Bevy.

use bevy::log::{debug, error, info, warn};
use pagefall_simulation::{logger, LogLevel, LogPrinter};

pub struct BevyLogger;

impl LogPrinter for BevyLogger {
    fn log(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Debug => debug!(target: "pagefall", "{}", message),
            LogLevel::Info => info!(target: "pagefall", "{}", message),
            LogLevel::Warning => warn!(target: "pagefall", "{}", message),
            LogLevel::Error => error!(target: "pagefall", "{}", message),
        }
    }
}

pub fn install() {
    logger::set_logger(Box::new(BevyLogger));
}
