use chrono::{NaiveTime, Timelike};

const CLOCK_FORMATS: [&str; 2] = ["%H:%M", "%H:%M:%S"];

/// Daily opening window in local wall-clock time.
///
/// The window never wraps past midnight: a close time earlier than the open
/// time yields a window that contains no instant at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl ScheduleWindow {
    /// Returns `None` when either bound is missing or malformed.
    pub fn parse(open_time: Option<&str>, close_time: Option<&str>) -> Option<Self> {
        let open = parse_clock(open_time?)?;
        let close = parse_clock(close_time?)?;
        Some(Self { open, close })
    }

    /// Inclusive on both ends, compared at minute resolution.
    pub fn contains(&self, now_local: NaiveTime) -> bool {
        let now = truncate_to_minute(now_local);
        self.open <= now && now <= self.close
    }

    pub fn wraps_midnight(&self) -> bool {
        self.close < self.open
    }
}

pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let raw = raw.trim();
    CLOCK_FORMATS
        .iter()
        .find_map(|format| NaiveTime::parse_from_str(raw, format).ok())
        .map(truncate_to_minute)
}

/// Fails closed: a missing or unparseable schedule reports the business closed.
pub fn is_open_by_schedule(
    open_time: Option<&str>,
    close_time: Option<&str>,
    now_local: NaiveTime,
) -> bool {
    ScheduleWindow::parse(open_time, close_time)
        .map(|window| window.contains(now_local))
        .unwrap_or(false)
}

fn truncate_to_minute(time: NaiveTime) -> NaiveTime {
    NaiveTime::from_hms_opt(time.hour(), time.minute(), 0).unwrap_or(time)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn open_inside_the_window() {
        assert!(is_open_by_schedule(Some("09:00"), Some("20:00"), at(10, 0)));
    }

    #[test]
    fn closed_after_the_window() {
        assert!(!is_open_by_schedule(Some("09:00"), Some("20:00"), at(21, 0)));
        assert!(!is_open_by_schedule(Some("09:00"), Some("20:00"), at(20, 1)));
    }

    #[test]
    fn closed_before_the_window() {
        assert!(!is_open_by_schedule(Some("09:00"), Some("20:00"), at(8, 59)));
    }

    #[test]
    fn both_bounds_are_inclusive() {
        assert!(is_open_by_schedule(Some("09:00"), Some("20:00"), at(9, 0)));
        assert!(is_open_by_schedule(Some("09:00"), Some("20:00"), at(20, 0)));
        let late_in_closing_minute = NaiveTime::from_hms_opt(20, 0, 59).unwrap();
        assert!(is_open_by_schedule(
            Some("09:00"),
            Some("20:00"),
            late_in_closing_minute
        ));
    }

    #[test]
    fn missing_or_malformed_schedule_fails_closed() {
        let now = at(12, 0);
        assert!(!is_open_by_schedule(None, Some("20:00"), now));
        assert!(!is_open_by_schedule(Some("09:00"), None, now));
        assert!(!is_open_by_schedule(None, None, now));
        assert!(!is_open_by_schedule(Some("nine"), Some("20:00"), now));
        assert!(!is_open_by_schedule(Some("09:00"), Some("25:00"), now));
        assert!(!is_open_by_schedule(Some(""), Some(""), now));
    }

    #[test]
    fn overnight_window_is_never_open() {
        let window = ScheduleWindow::parse(Some("22:00"), Some("06:00")).unwrap();
        assert!(window.wraps_midnight());
        for hour in 0..24 {
            assert!(!window.contains(at(hour, 0)), "hour {hour} should be closed");
        }
    }

    #[test]
    fn seconds_and_whitespace_are_accepted() {
        assert_eq!(parse_clock(" 09:30:15 "), Some(at(9, 30)));
        assert_eq!(parse_clock("7:05"), Some(at(7, 5)));
    }
}
