//! Time formatting for plan and workout output.

use std::fmt;

use jiff::{tz::TimeZone, Timestamp};

/// Formats a `Timestamp` as `YYYY-MM-DD HH:MM:SS TZ`.
///
/// Renders in the system time zone unless [`in_zone`](Self::in_zone) picks
/// another one.
pub struct LocalDateTime<'a> {
    timestamp: &'a Timestamp,
    zone: TimeZone,
}

impl<'a> LocalDateTime<'a> {
    pub fn new(timestamp: &'a Timestamp) -> Self {
        Self {
            timestamp,
            zone: TimeZone::system(),
        }
    }

    /// Render in `zone` instead of the system time zone.
    pub fn in_zone(mut self, zone: TimeZone) -> Self {
        self.zone = zone;
        self
    }
}

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.timestamp
                .to_zoned(self.zone.clone())
                .strftime("%Y-%m-%d %H:%M:%S %Z")
        )
    }
}

/// Length of a training session given in whole minutes.
///
/// ```rust
/// use liftlog_core::display::SessionLength;
///
/// assert_eq!(SessionLength(45).to_string(), "45 min");
/// assert_eq!(SessionLength(90).to_string(), "1 h 30 min");
/// assert_eq!(SessionLength(120).to_string(), "2 h");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SessionLength(pub u32);

impl fmt::Display for SessionLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.0 / 60, self.0 % 60) {
            (0, minutes) => write!(f, "{minutes} min"),
            (hours, 0) => write!(f, "{hours} h"),
            (hours, minutes) => write!(f, "{hours} h {minutes} min"),
        }
    }
}
