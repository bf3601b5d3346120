//! Logging facilities.
//!
//! The macros take a [`SimulationContext`](crate::SimulationContext) and prefix each message with the current round,
//! the level and the component name, e.g. `[12 INFO  scheduler] ...`.

use atty::Stream;
use colored::{Color, ColoredString, Colorize};
use log::Level;

/// Applies the color to the string if stderr (log) goes to console.
pub fn get_colored(s: &str, color: Color) -> ColoredString {
    if atty::is(Stream::Stderr) {
        s.color(color)
    } else {
        s.normal()
    }
}

/// Returns the level name padded to a fixed width and colored by severity.
pub fn level_label(level: Level) -> ColoredString {
    let color = match level {
        Level::Error => Color::Red,
        Level::Warn => Color::Yellow,
        Level::Info => Color::Green,
        Level::Debug => Color::Blue,
        Level::Trace => Color::Cyan,
    };
    get_colored(&format!("{:<5}", level.as_str()), color)
}

/// Logs a message at the specified level on behalf of the context component.
///
/// Used by the level-specific macros below.
#[doc(hidden)]
#[macro_export]
macro_rules! log_with_level {
    ($level:expr, $ctx:expr, $msg:expr) => (
        log::log!(
            target: $ctx.name(),
            $level,
            "[{} {} {}] {}",
            $ctx.time(), $crate::log::level_label($level), $ctx.name(), $msg
        )
    );
    ($level:expr, $ctx:expr, $format:expr, $($arg:tt)+) => (
        log::log!(
            target: $ctx.name(),
            $level,
            concat!("[{} {} {}] ", $format),
            $ctx.time(), $crate::log::level_label($level), $ctx.name(), $($arg)+
        )
    );
}

/// Logs a message at the info level.
///
/// # Examples
///
/// ```rust
/// use std::io::Write;
/// use env_logger::Builder;
/// use dslab_batch::{log_info, SimulationContext};
///
/// Builder::from_default_env()
///     .format(|buf, record| writeln!(buf, "{}", record.args()))
///     .init();
///
/// let ctx = SimulationContext::new("scheduler");
/// log_info!(ctx, "placed {} jobs", 10);
/// ```
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_with_level!(log::Level::Info, $ctx, $($arg)+));
}

/// Logs a message at the debug level.
///
/// See [`log_info!`](crate::log_info!).
#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_with_level!(log::Level::Debug, $ctx, $($arg)+));
}

/// Logs a message at the trace level.
///
/// See [`log_info!`](crate::log_info!).
#[macro_export]
macro_rules! log_trace {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_with_level!(log::Level::Trace, $ctx, $($arg)+));
}

/// Logs a message at the warn level.
///
/// See [`log_info!`](crate::log_info!).
#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_with_level!(log::Level::Warn, $ctx, $($arg)+));
}

/// Logs a message at the error level.
///
/// See [`log_info!`](crate::log_info!).
#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $($arg:tt)+) => ($crate::log_with_level!(log::Level::Error, $ctx, $($arg)+));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_label_width() {
        for level in [Level::Error, Level::Warn, Level::Info, Level::Debug, Level::Trace] {
            assert_eq!(level_label(level).chars().count(), 5);
        }
    }
}
