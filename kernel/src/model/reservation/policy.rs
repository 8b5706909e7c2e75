use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};

pub const MIN_DURATION_MINUTES: i64 = 60;
pub const MAX_DURATION_MINUTES: i64 = 240;
pub const MIN_LEAD_DAYS: i64 = 1;
pub const MAX_LEAD_DAYS: i64 = 15;
pub const OPENING_MINUTE: i64 = 7 * 60;
pub const CLOSING_MINUTE: i64 = 17 * 60;

/// Reasons a proposed slot fails admission. The messages are surfaced to
/// the caller verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TimeRuleViolation {
    #[error("reservations must last at least 1 hour")]
    DurationTooShort,
    #[error("reservations cannot last longer than 4 hours")]
    DurationTooLong,
    #[error("the requested date is in the past")]
    PastDate,
    #[error("the requested start time has already passed")]
    PastStartTime,
    #[error("reservations require at least 1 day of advance notice")]
    InsufficientLeadTime,
    #[error("reservations cannot be made more than 15 days in advance")]
    ExcessiveLeadTime,
    #[error("reservations must fall within business hours (07:00-17:00)")]
    OutsideBusinessHours,
}

fn minute_of_day(t: NaiveTime) -> i64 {
    i64::from(t.hour()) * 60 + i64::from(t.minute())
}

/// Temporal admission check for a proposed slot. All comparisons are
/// wall-clock in the single institutional timezone; `now` is the caller's
/// local clock. Rules run in a fixed order and the first failure wins.
///
/// The same-day start-time rule and the minimum lead-time rule are
/// deliberately independent gates; together they make same-day booking
/// impossible through either path.
pub fn validate(
    date: NaiveDate,
    start: NaiveTime,
    end: NaiveTime,
    now: NaiveDateTime,
) -> Result<(), TimeRuleViolation> {
    let duration = minute_of_day(end) - minute_of_day(start);
    if duration < MIN_DURATION_MINUTES {
        return Err(TimeRuleViolation::DurationTooShort);
    }
    if duration > MAX_DURATION_MINUTES {
        return Err(TimeRuleViolation::DurationTooLong);
    }

    let today = now.date();
    if date < today {
        return Err(TimeRuleViolation::PastDate);
    }
    if date == today && minute_of_day(start) < minute_of_day(now.time()) {
        return Err(TimeRuleViolation::PastStartTime);
    }

    let lead_days = (date - today).num_days();
    if lead_days < MIN_LEAD_DAYS {
        return Err(TimeRuleViolation::InsufficientLeadTime);
    }
    if lead_days > MAX_LEAD_DAYS {
        return Err(TimeRuleViolation::ExcessiveLeadTime);
    }

    if minute_of_day(start) < OPENING_MINUTE || minute_of_day(end) > CLOSING_MINUTE {
        return Err(TimeRuleViolation::OutsideBusinessHours);
    }

    Ok(())
}
