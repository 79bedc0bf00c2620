pub const SECONDS_PER_DAY: i64 = 86_400;

/// Day bucket of a unix timestamp (UTC days since epoch)
pub fn day_index(unix_timestamp: i64) -> i64 {
    unix_timestamp.div_euclid(SECONDS_PER_DAY)
}

/// Streak after checking in on `today`.
///
/// A check-in on the day right after the previous one extends the streak;
/// any gap restarts it at 1. Returns `None` when the customer already
/// checked in on `today` (or the clock reads earlier than the last
/// check-in).
pub fn next_streak(current_days: u32, last_check_in_day: i64, today: i64) -> Option<u32> {
    if current_days == 0 {
        return Some(1);
    }

    if today <= last_check_in_day {
        return None;
    }

    if last_check_in_day.checked_add(1) == Some(today) {
        Some(current_days.saturating_add(1))
    } else {
        Some(1)
    }
}
