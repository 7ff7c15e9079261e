//! Bounded diagnostic log shared by the firmware and the simulator.
//!
//! The cycle controller appends one line per history shift. The simulator
//! renders the newest line in its status strip, the firmware forwards lines to
//! `defmt`.
//!
//! # Example
//!
//! ```ignore
//! let mut log = DiagnosticLog::new();
//! log.push("sensor: BME280");
//! log.record(format_args!("#{} {}hPa {}", 3, 1013, "IN RANGE"));
//!
//! assert_eq!(log.latest(), Some("#3 1013hPa IN RANGE"));
//! ```

use core::fmt::{self, Write};

use heapless::{Deque, String};

// =============================================================================
// Configuration
// =============================================================================

/// Maximum number of lines kept in the ring buffer.
pub const LOG_BUFFER_SIZE: usize = 6;

/// Maximum characters per line (longer lines are truncated).
pub const LOG_LINE_LENGTH: usize = 40;

/// One log line.
pub type LogLine = String<LOG_LINE_LENGTH>;

// =============================================================================
// Ring Buffer
// =============================================================================

/// Ring buffer of the last [`LOG_BUFFER_SIZE`] diagnostic lines.
#[derive(Clone, Debug, Default)]
pub struct DiagnosticLog {
    lines: Deque<LogLine, LOG_BUFFER_SIZE>,
}

impl DiagnosticLog {
    pub const fn new() -> Self { Self { lines: Deque::new() } }

    /// Append a line, dropping the oldest one when full.
    pub fn push(
        &mut self,
        msg: &str,
    ) {
        let mut line = LogLine::new();
        for c in msg.chars() {
            if line.push(c).is_err() {
                break;
            }
        }
        self.push_line(line);
    }

    /// Format and append a line, truncating output that does not fit.
    pub fn record(
        &mut self,
        args: fmt::Arguments<'_>,
    ) {
        let mut line = Truncating(LogLine::new());
        let _ = line.write_fmt(args);
        self.push_line(line.0);
    }

    /// Newest line, if any.
    pub fn latest(&self) -> Option<&str> { self.lines.back().map(|line| line.as_str()) }

    /// Iterate over lines, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &str> { self.lines.iter().map(|line| line.as_str()) }

    #[inline]
    pub fn len(&self) -> usize { self.lines.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.lines.is_empty() }

    fn push_line(
        &mut self,
        line: LogLine,
    ) {
        if self.lines.is_full() {
            self.lines.pop_front();
        }
        self.lines.push_back(line).ok();
    }
}

/// Writer that keeps as many characters as fit and drops the rest.
struct Truncating(LogLine);

impl Write for Truncating {
    fn write_str(
        &mut self,
        s: &str,
    ) -> fmt::Result {
        for c in s.chars() {
            if self.0.push(c).is_err() {
                break;
            }
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================
