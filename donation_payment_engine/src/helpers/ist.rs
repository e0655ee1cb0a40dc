//! Indian Standard Time handling.
//!
//! The organisation reports in IST, so donation timestamps are recorded in the fixed +05:30 civil
//! offset rather than wall-clock UTC. IST has no daylight saving, which is what makes a fixed
//! offset correct here.

use chrono::{DateTime, FixedOffset, Utc};

const IST_OFFSET_SECONDS: i32 = 5 * 3600 + 30 * 60;

/// The IST (UTC+05:30) offset.
pub fn ist() -> FixedOffset {
    // The offset is a compile-time constant well inside the valid range
    FixedOffset::east_opt(IST_OFFSET_SECONDS).unwrap()
}

/// The current instant, expressed in IST.
pub fn ist_now() -> DateTime<FixedOffset> {
    Utc::now().with_timezone(&ist())
}

/// Render a timestamp as the `dd-mm-yyyy` display date used on the dashboard, converting to IST
/// first if needed.
pub fn format_ist_date(timestamp: &DateTime<FixedOffset>) -> String {
    timestamp.with_timezone(&ist()).format("%d-%m-%Y").to_string()
}

#[cfg(test)]
mod test {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn ist_is_five_thirty_ahead() {
        let utc = Utc.with_ymd_and_hms(2025, 3, 31, 20, 0, 0).unwrap();
        let in_ist = utc.with_timezone(&ist());
        // 20:00 UTC on the 31st is 01:30 IST on the 1st
        assert_eq!(format_ist_date(&in_ist), "01-04-2025");
    }

    #[test]
    fn display_date_is_stable_for_ist_inputs() {
        let ts = ist().with_ymd_and_hms(2025, 8, 15, 9, 30, 0).unwrap();
        assert_eq!(format_ist_date(&ts), "15-08-2025");
    }
}
