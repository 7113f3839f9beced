//! Deadline countdown computation.
//!
//! # Responsibility
//! - Turn a deadline and a caller-supplied `now` into a countdown.
//! - Render countdowns as `"{days}d {hours}h {minutes}m"` or `"Expired"`.
//!
//! # Invariants
//! - Pure: the current instant is always an argument, never read here.
//! - `deadline <= now` is expired, including a zero remainder.
//! - Sub-minute remainders are truncated, never rounded.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt::{Display, Formatter};

/// Marker rendered for deadlines that have been reached.
pub const EXPIRED_LABEL: &str = "Expired";

const SECONDS_PER_DAY: i64 = 86_400;
const SECONDS_PER_HOUR: i64 = 3_600;
const SECONDS_PER_MINUTE: i64 = 60;

/// Remaining time until a deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Countdown {
    Expired,
    Remaining { days: i64, hours: i64, minutes: i64 },
}

impl Countdown {
    /// Computes the countdown from `now` to `deadline`.
    pub fn between(deadline: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if deadline <= now {
            return Self::Expired;
        }

        // `num_seconds` truncates toward zero, which drops the sub-second part.
        let total_seconds = (deadline - now).num_seconds();
        Self::Remaining {
            days: total_seconds / SECONDS_PER_DAY,
            hours: (total_seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
            minutes: (total_seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
        }
    }

    pub fn is_expired(self) -> bool {
        matches!(self, Self::Expired)
    }
}

impl Display for Countdown {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expired => f.write_str(EXPIRED_LABEL),
            Self::Remaining {
                days,
                hours,
                minutes,
            } => write!(f, "{days}d {hours}h {minutes}m"),
        }
    }
}

/// Returns the display string for the time left until `deadline`.
pub fn remaining_time(deadline: DateTime<Utc>, now: DateTime<Utc>) -> String {
    Countdown::between(deadline, now).to_string()
}

#[cfg(test)]
mod tests {
    use super::{remaining_time, Countdown, EXPIRED_LABEL};
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn zero_and_negative_remainders_are_expired() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(remaining_time(now, now), EXPIRED_LABEL);
        assert_eq!(remaining_time(now - Duration::minutes(1), now), EXPIRED_LABEL);
    }

    #[test]
    fn decomposes_days_hours_minutes_and_truncates_seconds() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let deadline = now + Duration::seconds(2 * 86_400 + 3 * 3_600 + 4 * 60 + 59);
        assert_eq!(remaining_time(deadline, now), "2d 3h 4m");
    }

    #[test]
    fn sub_second_remainder_is_not_expired() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let deadline = now + Duration::milliseconds(500);
        let countdown = Countdown::between(deadline, now);
        assert!(!countdown.is_expired());
        assert_eq!(countdown.to_string(), "0d 0h 0m");
    }
}
