use chrono::NaiveTime;

/// Length of the forward-looking sync window, starting today.
pub const DEFAULT_SYNC_DAYS: i64 = 365;

/// Longest sync window a config may ask for.
pub const MAX_SYNC_DAYS: i64 = 3660;

/// End time given to a same-day timed entry that has no end time.
pub const END_OF_DAY: NaiveTime = match NaiveTime::from_hms_opt(23, 59, 59) {
    Some(time) => time,
    None => panic!("invalid end of day"),
};
