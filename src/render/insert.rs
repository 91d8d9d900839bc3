use super::format::time_range;
use crate::components::CalendarEvent;
use chrono::{NaiveDate, TimeZone};
use std::fmt::Display;

/// Markdown block with the day's events, ready to insert into a note.
/// Events without a start are skipped.
pub fn format_events_markdown<Tz>(events: &[CalendarEvent], date: NaiveDate, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    if events.is_empty() {
        return format!("{}\n", t!("insert_no_events"));
    }

    let mut output = format!(
        "{}\n\n",
        t!("insert_heading", date = date.format("%a %b %d %Y").to_string())
    );

    for event in events.iter().filter(|e| e.start.is_some()) {
        let summary = match event.summary.as_deref() {
            Some(summary) if !summary.is_empty() => summary.to_string(),
            _ => t!("calendar_untitled").to_string(),
        };

        output.push_str(&format!("- **{}**: {}", time_range(event, tz), summary));
        if let Some(link) = &event.hangout_link {
            output.push_str(&format!(" [{}]({})", t!("insert_join_meeting"), link));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::EventDateTime;
    use chrono::Utc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn sample() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent {
                summary: Some("Offsite".into()),
                start: Some(EventDateTime::all_day("2026-10-14")),
                end: Some(EventDateTime::all_day("2026-10-15")),
                ..Default::default()
            },
            CalendarEvent {
                summary: Some("Standup".into()),
                start: Some(EventDateTime::timed("2026-10-14T09:00:00Z")),
                end: Some(EventDateTime::timed("2026-10-14T09:15:00Z")),
                hangout_link: Some("https://meet.google.com/abc-defg-hij".into()),
                ..Default::default()
            },
            CalendarEvent {
                id: Some("startless".into()),
                summary: Some("Ghost".into()),
                ..Default::default()
            },
            CalendarEvent {
                start: Some(EventDateTime::timed("2026-10-14T15:00:00Z")),
                end: Some(EventDateTime::timed("2026-10-14T16:00:00Z")),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn renders_heading_and_one_line_per_event() {
        let text = format_events_markdown(&sample(), day(), &Utc);
        assert_eq!(
            text,
            "## Wed Oct 14 2026 Events\n\n\
             - **All-day**: Offsite\n\
             - **09:00-09:15**: Standup [Join Meeting](https://meet.google.com/abc-defg-hij)\n\
             - **15:00-16:00**: Untitled\n"
        );
        assert!(!text.contains("Ghost"));
    }

    #[test]
    fn no_events_gives_fallback_line() {
        assert_eq!(format_events_markdown(&[], day(), &Utc), "No events today.\n");
    }

    #[test]
    fn formatting_is_idempotent() {
        let events = sample();
        assert_eq!(
            format_events_markdown(&events, day(), &Utc),
            format_events_markdown(&events, day(), &Utc)
        );
    }
}
