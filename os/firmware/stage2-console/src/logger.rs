use crate::console_print;
use log::{LevelFilter, Log, Metadata, Record, SetLoggerError};

/// `log` backend printing to the firmware console.
///
/// Records share the console with the boot messages, so firmware builds only
/// install it on request.
pub struct ConsoleLogger {
    max_level: LevelFilter,
}

impl ConsoleLogger {
    #[must_use]
    pub const fn new(max_level: LevelFilter) -> Self {
        Self { max_level }
    }

    /// Call this once during early init, before anything logs.
    #[allow(static_mut_refs, clippy::missing_errors_doc)]
    pub fn init(self) -> Result<(), SetLoggerError> {
        static mut LOGGER: Option<ConsoleLogger> = None;

        let max_level = self.max_level;

        // SAFETY: stage-2 runs on a single thread without interrupts, so
        // nothing can observe LOGGER or race the racy setter.
        unsafe {
            let logger: &'static ConsoleLogger = LOGGER.insert(self);
            log::set_logger_racy(logger)?;
        }
        log::set_max_level(max_level);
        Ok(())
    }
}

impl Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        // Format: "[LEVEL] target: message\r\n"
        console_print!(
            "[{}] {}: {}\r\n",
            record.level(),
            record.target(),
            record.args()
        );
    }

    fn flush(&self) {
        // mcPrint is unbuffered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn level_filtering() {
        let logger = ConsoleLogger::new(LevelFilter::Info);
        let warn = Metadata::builder().level(Level::Warn).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&warn));
        assert!(!logger.enabled(&debug));
    }
}
