mod actor;
pub mod client;
mod handle;
pub mod models;
pub mod time;
pub mod token;

pub use client::GoogleCalendarClient;
pub use handle::GoogleCalendarHandle;
pub use models::{CalendarEvent, CalendarInfo, EventDateTime};

use crate::components::CalendarSource;
use crate::error::Error;
use crate::notices::NoticeSink;
use chrono::NaiveDate;
use tracing::warn;

/// Fetch one day's events, turning any failure into a notice and `None`
pub async fn get_calendar_events<S>(
    source: &S,
    date: Option<NaiveDate>,
    notices: &dyn NoticeSink,
) -> Option<Vec<CalendarEvent>>
where
    S: CalendarSource + ?Sized,
{
    match source.fetch_day_events(date).await {
        Ok(events) => Some(events),
        Err(e) => {
            warn!("Failed to fetch calendar events: {}", e);
            notices.notice(&events_notice(&e));
            None
        }
    }
}

/// Calendars for the discovery list; failures yield an empty list after a notice
pub async fn get_available_calendars<S>(source: &S, notices: &dyn NoticeSink) -> Vec<CalendarInfo>
where
    S: CalendarSource + ?Sized,
{
    match source.list_calendars().await {
        Ok(calendars) => calendars,
        Err(e) => {
            warn!("Failed to fetch calendars: {}", e);
            notices.notice(&calendars_notice(&e));
            Vec::new()
        }
    }
}

/// Notice text for a failed event fetch
pub fn events_notice(error: &Error) -> String {
    match error {
        Error::Configuration(_) => t!("notice_credentials_missing").to_string(),
        Error::Authentication(_) => t!("notice_invalid_grant").to_string(),
        other => t!("notice_fetch_events_failed", error = failure_message(other)).to_string(),
    }
}

/// Notice text for a failed calendar discovery
pub fn calendars_notice(error: &Error) -> String {
    match error {
        Error::Configuration(_) => t!("notice_credentials_missing").to_string(),
        Error::Authentication(_) => t!("notice_invalid_grant").to_string(),
        other => t!("notice_fetch_calendars_failed", error = failure_message(other)).to_string(),
    }
}

fn failure_message(error: &Error) -> String {
    match error {
        Error::RemoteFetch(message) => message.clone(),
        other => other.to_string(),
    }
}
