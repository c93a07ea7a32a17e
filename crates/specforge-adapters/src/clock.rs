//! Clock adapters for backup file stamps.

use chrono::{DateTime, Local, TimeZone};

use specforge_core::application::ports::Clock;

const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn backup_stamp(&self) -> String {
        stamp(&Local::now())
    }
}

/// Always returns the same instant. For reproducible output in tests.
#[derive(Debug, Clone)]
pub struct FixedClock(String);

impl FixedClock {
    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self
    where
        Tz::Offset: std::fmt::Display,
    {
        Self(stamp(instant))
    }
}

impl Clock for FixedClock {
    fn backup_stamp(&self) -> String {
        self.0.clone()
    }
}

fn stamp<Tz: TimeZone>(instant: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.format(STAMP_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn stamp_is_sortable_and_filename_safe() {
        let instant = Utc.with_ymd_and_hms(2026, 3, 7, 9, 5, 1).unwrap();
        assert_eq!(FixedClock::at(&instant).backup_stamp(), "20260307_090501");
    }

    #[test]
    fn system_clock_uses_the_same_shape() {
        let stamp = SystemClock::new().backup_stamp();
        assert_eq!(stamp.len(), 15);
        assert_eq!(stamp.as_bytes()[8], b'_');
    }
}
