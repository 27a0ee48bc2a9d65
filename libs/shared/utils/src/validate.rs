//! Named validators shared by the booking and schedule cells. Kept as plain
//! predicates so admission logic can call them and tests can hit them
//! directly.

use chrono::NaiveTime;

/// Coarse email shape check: non-empty and contains an `@`.
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && email.contains('@')
}

/// Strict `HH:MM` check: exactly five characters, two-digit 0-23 hour,
/// two-digit 0-59 minute.
pub fn is_valid_hhmm(time: &str) -> bool {
    let bytes = time.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    if ![0, 1, 3, 4].iter().all(|&i| bytes[i].is_ascii_digit()) {
        return false;
    }
    let hour = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minute = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hour <= 23 && minute <= 59
}

/// Parse a validated `HH:MM` string. Callers run `is_valid_hhmm` first;
/// anything else comes back as None.
pub fn parse_hhmm(time: &str) -> Option<NaiveTime> {
    if !is_valid_hhmm(time) {
        return None;
    }
    NaiveTime::parse_from_str(time, "%H:%M").ok()
}

/// Minutes since midnight for a civil time-of-day.
pub fn minutes_since_midnight(time: NaiveTime) -> i32 {
    use chrono::Timelike;
    (time.hour() * 60 + time.minute()) as i32
}
