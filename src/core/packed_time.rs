//! # Packed Timestamp Codec
//!
//! Compact calendar encoding for the absolute times messages report.
//!
//! ## Wire Format
//! One 32-bit word, low bit to high:
//!
//! ```text
//! bits  0..6   minute        (0-59)
//! bits  6..11  hour          (0-23)
//! bits 11..14  weekday       (0 = Sunday)
//! bits 14..20  day of month  (0-based)
//! bits 20..24  month         (0-based)
//! bits 24..29  year - 2000
//! ```
//!
//! Resolution is one minute; seconds truncate on pack. Inputs outside the
//! representable window (2000-01-01 .. 2031-12-31 23:59 UTC) clamp to its
//! edges.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Timelike, Utc};

/// First packable instant, 2000-01-01 00:00:00 UTC
const MIN_UNIX: i64 = 946_684_800;

/// Last packable instant, 2031-12-31 23:59:00 UTC
const MAX_UNIX: i64 = 1_956_527_940;

const BASE_YEAR: i32 = 2000;

/// Pack a Unix timestamp into the 32-bit calendar word
pub fn pack_time(unix_secs: i64) -> u32 {
    let clamped = unix_secs.clamp(MIN_UNIX, MAX_UNIX);
    // Clamped input is always representable.
    let dt = DateTime::<Utc>::from_timestamp(clamped, 0).unwrap_or(DateTime::UNIX_EPOCH);

    let minute = dt.minute();
    let hour = dt.hour();
    let weekday = dt.weekday().num_days_from_sunday();
    let day = dt.day0();
    let month = dt.month0();
    let year = (dt.year() - BASE_YEAR) as u32;

    minute | hour << 6 | weekday << 11 | day << 14 | month << 20 | year << 24
}

/// Unpack the 32-bit calendar word back into a Unix timestamp.
///
/// The weekday bits are redundant with the date and are ignored. Calendar
/// fields outside their valid ranges clamp to the nearest valid value, so an
/// arbitrary word always yields some timestamp rather than a panic.
pub fn unpack_time(wire: u32) -> i64 {
    let minute = (wire & 0x3F).min(59);
    let hour = (wire >> 6 & 0x1F).min(23);
    let month = (wire >> 20 & 0xF).min(11);
    let year = BASE_YEAR + (wire >> 24 & 0x1F) as i32;

    let mut day = (wire >> 14 & 0x3F) + 1;
    while day > 1 && NaiveDate::from_ymd_opt(year, month + 1, day).is_none() {
        day -= 1;
    }

    match Utc.with_ymd_and_hms(year, month + 1, day, hour, minute, 0) {
        chrono::LocalResult::Single(dt) => dt.timestamp(),
        _ => MIN_UNIX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymdhm(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> i64 {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap()
            .timestamp()
    }

    #[test]
    fn known_layout() {
        // 2012-08-30 14:05 UTC, a Thursday.
        let t = ymdhm(2012, 8, 30, 14, 5);
        let wire = pack_time(t);
        assert_eq!(wire & 0x3F, 5);
        assert_eq!(wire >> 6 & 0x1F, 14);
        assert_eq!(wire >> 11 & 0x7, 4);
        assert_eq!(wire >> 14 & 0x3F, 29);
        assert_eq!(wire >> 20 & 0xF, 7);
        assert_eq!(wire >> 24 & 0x1F, 12);
    }

    #[test]
    fn roundtrip_at_minute_resolution() {
        let samples = [
            ymdhm(2000, 1, 1, 0, 0),
            ymdhm(2004, 2, 29, 12, 30),
            ymdhm(2010, 12, 31, 23, 59),
            ymdhm(2020, 6, 15, 7, 42),
            ymdhm(2026, 8, 6, 18, 1),
            ymdhm(2031, 12, 31, 23, 59),
        ];
        for t in samples {
            assert_eq!(unpack_time(pack_time(t)), t);
        }
    }

    #[test]
    fn seconds_truncate() {
        let base = ymdhm(2015, 3, 10, 9, 15);
        assert_eq!(unpack_time(pack_time(base + 59)), base);
    }

    #[test]
    fn out_of_window_clamps() {
        assert_eq!(unpack_time(pack_time(0)), MIN_UNIX);
        assert_eq!(unpack_time(pack_time(i64::MAX)), MAX_UNIX);
        assert_eq!(unpack_time(pack_time(i64::MIN)), MIN_UNIX);
    }

    #[test]
    fn hostile_word_clamps_instead_of_panicking() {
        // Month 15, day 63, hour 31, minute 63 are all out of range.
        let _ = unpack_time(u32::MAX);
        // Day 31 in a 30-day month clamps to the month's last day.
        let wire = 30u32 << 14 | 3 << 20 | 5 << 24; // 2005-04-31 00:00
        assert_eq!(unpack_time(wire), ymdhm(2005, 4, 30, 0, 0));
    }
}
