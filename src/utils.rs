use r2r::builtin_interfaces::msg::Time;

const BILLION: i64 = 1_000_000_000;

/// Valid while the seconds fit in an `i32` (about ±68 years around the epoch); beyond that `sec` wraps.
pub fn time_from_nanosec(t: i64) -> Time {
    Time {
        sec: t.div_euclid(BILLION) as i32,
        nanosec: t.rem_euclid(BILLION) as u32,
    }
}

pub fn time_as_ns_i64(t: &Time) -> i64 {
    t.sec as i64 * BILLION + t.nanosec as i64
}

/// Where `stamp` lies between `start` and `end`: 0 at `start`, 1 at `end`.
/// Stamps outside the range give values outside `[0, 1]`. Equal `start` and `end` give 0.
pub fn stamp_fraction(start: &Time, end: &Time, stamp: &Time) -> f64 {
    let total = time_as_ns_i64(end) - time_as_ns_i64(start);
    if total == 0 {
        return 0.0;
    }
    (time_as_ns_i64(stamp) - time_as_ns_i64(start)) as f64 / total as f64
}
