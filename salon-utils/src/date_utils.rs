use std::fmt::{Display, Formatter};
use std::sync::Arc;
use thiserror::*;

use time::{
    Date, Duration, Time, Weekday,
    format_description::BorrowedFormatItem,
    macros::{format_description, time},
};

#[derive(Debug, Error)]
pub enum SalonDateUtilsError {
    #[error("Cannot format: {0}")]
    FormatError(#[from] time::error::Format),

    #[error("Cannot parse '{0}': {1}")]
    ParseError(Arc<str>, time::error::Parse),
}

/// Number of calendar days offered for booking, starting with today.
pub const BOOKING_WINDOW_DAYS: i64 = 30;
pub const SLOT_MINUTES: i64 = 30;
pub const FIRST_SLOT: Time = time!(9:00);
pub const LAST_SLOT: Time = time!(17:30);

/// Wire format of a booking date, e.g. `2025-03-10`.
pub const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");
/// Wire format of a booking slot, e.g. `14:00`.
pub const TIME_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[hour]:[minute]");

#[derive(Debug, PartialEq, Eq, Clone, Copy, PartialOrd, Ord)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl From<Weekday> for DayOfWeek {
    fn from(weekday: Weekday) -> Self {
        match weekday {
            Weekday::Monday => Self::Monday,
            Weekday::Tuesday => Self::Tuesday,
            Weekday::Wednesday => Self::Wednesday,
            Weekday::Thursday => Self::Thursday,
            Weekday::Friday => Self::Friday,
            Weekday::Saturday => Self::Saturday,
            Weekday::Sunday => Self::Sunday,
        }
    }
}

impl Display for DayOfWeek {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                DayOfWeek::Monday => "Monday",
                DayOfWeek::Tuesday => "Tuesday",
                DayOfWeek::Wednesday => "Wednesday",
                DayOfWeek::Thursday => "Thursday",
                DayOfWeek::Friday => "Friday",
                DayOfWeek::Saturday => "Saturday",
                DayOfWeek::Sunday => "Sunday",
            }
        )
    }
}

/// The bookable calendar days: today and the following 29 days.
pub fn booking_dates(today: Date) -> Arc<[Date]> {
    (0..BOOKING_WINDOW_DAYS)
        .filter_map(|offset| today.checked_add(Duration::days(offset)))
        .collect()
}

/// The bookable half-hour slots from 09:00 through 17:30.
pub fn booking_time_slots() -> Arc<[Time]> {
    let mut slots = Vec::with_capacity(18);
    let mut slot = FIRST_SLOT;
    while slot <= LAST_SLOT {
        slots.push(slot);
        slot += Duration::minutes(SLOT_MINUTES);
    }
    slots.into()
}

pub fn is_within_booking_window(today: Date, date: Date) -> bool {
    let offset = (date - today).whole_days();
    (0..BOOKING_WINDOW_DAYS).contains(&offset)
}

pub fn is_booking_slot(time: Time) -> bool {
    (FIRST_SLOT..=LAST_SLOT).contains(&time)
        && i64::from(time.minute()) % SLOT_MINUTES == 0
        && time.second() == 0
        && time.nanosecond() == 0
}

pub fn format_date(date: Date) -> Result<String, SalonDateUtilsError> {
    Ok(date.format(DATE_FORMAT)?)
}

pub fn format_time(time: Time) -> Result<String, SalonDateUtilsError> {
    Ok(time.format(TIME_FORMAT)?)
}

pub fn parse_date(value: &str) -> Result<Date, SalonDateUtilsError> {
    Date::parse(value, DATE_FORMAT)
        .map_err(|err| SalonDateUtilsError::ParseError(value.into(), err))
}

pub fn parse_time(value: &str) -> Result<Time, SalonDateUtilsError> {
    Time::parse(value, TIME_FORMAT)
        .map_err(|err| SalonDateUtilsError::ParseError(value.into(), err))
}
