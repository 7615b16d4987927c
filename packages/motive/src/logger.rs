//! Console logger for the [`log`] facade.
//!
//! Controllers report per-tick diagnostics at trace level and caught sensor faults at error
//! level. This logger prints those records to standard error, prefixed with the level, the time
//! since the logger was installed and the record's target:
//!
//! ```text
//! TRACE [1s 250ms] motive_control::loops::bang_bang - Bang-bang -A: measurement 90, setpoint 100, error 10
//! ERROR [1s 255ms] motive_control::controller - Controller output unavailable, coasting at zero correction: sensor is disconnected
//! ```
//!
//! Install it once at program start with [`init`].

use std::{
    io::{self, Write},
    sync::OnceLock,
    time::{Duration, Instant},
};

use humantime::{FormattedDuration, format_duration};
use log::{LevelFilter, Metadata, Record, SetLoggerError};

/// Logger writing formatted records to standard error.
#[derive(Debug)]
pub struct ConsoleLogger {
    start: Instant,
}

impl ConsoleLogger {
    fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    fn uptime(&self) -> FormattedDuration {
        // Sub-millisecond precision only adds noise at control-loop rates.
        let elapsed = self.start.elapsed();
        format_duration(Duration::from_millis(
            u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
        ))
    }
}

impl log::Log for ConsoleLogger {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record<'_>) {
        if self.enabled(record.metadata()) {
            let mut stderr = io::stderr().lock();
            drop(writeln!(
                stderr,
                "{} [{}] {} - {}",
                record.level(),
                self.uptime(),
                record.target(),
                record.args()
            ));
        }
    }

    fn flush(&self) {
        drop(io::stderr().flush());
    }
}

static LOGGER: OnceLock<ConsoleLogger> = OnceLock::new();

/// Installs the console logger as the global logger.
///
/// Records above `level` are discarded. Use [`LevelFilter::Trace`] to see every controller
/// decision, or [`LevelFilter::Error`] to only see caught faults.
///
/// # Errors
///
/// Returns [`SetLoggerError`] if a global logger has already been installed.
///
/// # Examples
///
/// ```
/// use log::LevelFilter;
///
/// motive::logger::init(LevelFilter::Debug)?;
/// log::info!("controllers online");
/// # Ok::<(), log::SetLoggerError>(())
/// ```
pub fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
    let logger = LOGGER.get_or_init(ConsoleLogger::new);
    log::set_logger(logger).map(|()| log::set_max_level(level))
}
