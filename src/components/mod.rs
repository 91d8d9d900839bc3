use crate::config::Settings;
use crate::error::DayResult;
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod google_calendar;

pub use google_calendar::{CalendarEvent, CalendarInfo, GoogleCalendarHandle};

/// Where views and commands get calendar data from
#[async_trait]
pub trait CalendarSource: Send + Sync {
    /// Merged, sorted events of one local day; `None` means today
    async fn fetch_day_events(&self, date: Option<NaiveDate>) -> DayResult<Vec<CalendarEvent>>;

    /// Calendars the user can choose from
    async fn list_calendars(&self) -> DayResult<Vec<CalendarInfo>>;

    /// Push changed settings; later requests use them
    async fn update_settings(&self, settings: Settings) -> DayResult<()>;
}
