use service::clock::ClockService;
use time::{OffsetDateTime, UtcOffset};

/// Clock in the fixed UTC offset the shops operate in.
pub struct ClockServiceImpl {
    offset: UtcOffset,
}

impl ClockServiceImpl {
    pub fn new(offset: UtcOffset) -> Self {
        Self { offset }
    }

    /// Falls back to UTC for offsets outside ±25 hours.
    pub fn from_hours(hours: i8) -> Self {
        Self::new(UtcOffset::from_hms(hours, 0, 0).unwrap_or(UtcOffset::UTC))
    }
}

impl ClockService for ClockServiceImpl {
    fn date_now(&self) -> time::Date {
        OffsetDateTime::now_utc().to_offset(self.offset).date()
    }
}
