//! Time source for message timestamps and persisted records.

use chrono::{DateTime, FixedOffset, Local};

/// Source of the current time.
///
/// Messages and datastore records embed the submission time; tests inject a
/// [`FixedClock`] so the output is reproducible.
pub trait Clock: Send + Sync {
    /// The current local time.
    fn now(&self) -> DateTime<FixedOffset>;

    /// The current time as milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }
}

/// Wall clock in the host's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// A clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl FixedClock {
    /// Parse an RFC 3339 timestamp, e.g. `2024-03-05T14:07:09+06:00`.
    pub fn parse(rfc3339: &str) -> Result<Self, chrono::ParseError> {
        DateTime::parse_from_rfc3339(rfc3339).map(Self)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Render a time the way a US-English browser's `toLocaleString` does,
/// e.g. `3/5/2024, 2:07:09 PM`.
pub fn display_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::parse("2024-03-05T14:07:09+06:00").unwrap();
        assert_eq!(clock.now_millis(), 1_709_626_029_000);
    }

    #[test]
    fn test_display_timestamp() {
        let clock = FixedClock::parse("2024-03-05T14:07:09+06:00").unwrap();
        assert_eq!(display_timestamp(&clock.now()), "3/5/2024, 2:07:09 PM");

        let morning = FixedClock::parse("2024-12-25T00:30:00+00:00").unwrap();
        assert_eq!(display_timestamp(&morning.now()), "12/25/2024, 12:30:00 AM");
    }
}
