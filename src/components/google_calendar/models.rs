use crate::config::PRIMARY_CALENDAR_ID;
use serde::{Deserialize, Serialize};

/// Start or end of an event as sent by the API.
/// Timed events carry `dateTime`, all-day events carry `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}

impl EventDateTime {
    pub fn timed(date_time: &str) -> Self {
        Self {
            date_time: Some(date_time.to_string()),
            ..Default::default()
        }
    }

    pub fn all_day(date: &str) -> Self {
        Self {
            date: Some(date.to_string()),
            ..Default::default()
        }
    }
}

/// Calendar event, tagged with the calendar it came from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Option<String>,
    pub summary: Option<String>,
    pub start: Option<EventDateTime>,
    pub end: Option<EventDateTime>,
    pub hangout_link: Option<String>,
    /// Display name of the source calendar, or its raw id when unknown
    #[serde(default)]
    pub calendar_name: String,
}

impl CalendarEvent {
    /// Key used to order merged events: timed start, else all-day date, else empty
    pub fn sort_key(&self) -> &str {
        self.start
            .as_ref()
            .and_then(|start| start.date_time.as_deref().or(start.date.as_deref()))
            .unwrap_or("")
    }

    pub fn start_date_time(&self) -> Option<&str> {
        self.start.as_ref().and_then(|s| s.date_time.as_deref())
    }

    pub fn end_date_time(&self) -> Option<&str> {
        self.end.as_ref().and_then(|e| e.date_time.as_deref())
    }

    /// Both ends carry a time of day
    pub fn is_timed(&self) -> bool {
        self.start_date_time().is_some() && self.end_date_time().is_some()
    }

    pub fn is_from_primary(&self) -> bool {
        self.calendar_name == PRIMARY_CALENDAR_ID
    }
}

/// A calendar the user can pick
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarInfo {
    pub id: String,
    /// Display name
    pub summary: String,
    pub primary: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventsResponse {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalendarListResponse {
    #[serde(default)]
    pub items: Vec<CalendarListEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CalendarListEntry {
    pub id: Option<String>,
    pub summary: Option<String>,
    pub primary: Option<bool>,
}

impl From<CalendarListEntry> for CalendarInfo {
    fn from(entry: CalendarListEntry) -> Self {
        Self {
            id: entry.id.unwrap_or_default(),
            summary: entry.summary.unwrap_or_default(),
            primary: entry.primary.unwrap_or(false),
        }
    }
}
