use crate::components::google_calendar::time::parse_date_time;
use crate::components::CalendarEvent;
use chrono::TimeZone;
use std::fmt::Display;

const MS_PER_HOUR: i64 = 60 * 60 * 1000;
const MS_PER_MINUTE: i64 = 60 * 1000;

/// `{h}h {m}m`, or `{m}m` under an hour. Both parts are floored.
pub fn format_duration(delta_ms: i64) -> String {
    let hours = delta_ms.div_euclid(MS_PER_HOUR);
    let minutes = (delta_ms % MS_PER_HOUR).div_euclid(MS_PER_MINUTE);
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// `HH:MM` of an RFC 3339 timestamp in the given zone
pub fn clock_time<Tz>(value: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_date_time(value, tz) {
        Some(dt) => dt.format("%H:%M").to_string(),
        None => t!("calendar_unknown_time").to_string(),
    }
}

/// `HH:MM-HH:MM` for timed events, `All-day` otherwise
pub fn time_range<Tz>(event: &CalendarEvent, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match (event.start_date_time(), event.end_date_time()) {
        (Some(start), Some(end)) => format!("{}-{}", clock_time(start, tz), clock_time(end, tz)),
        _ => t!("calendar_all_day").to_string(),
    }
}

/// Duration between start and end of a timed event
pub fn event_duration(event: &CalendarEvent) -> Option<String> {
    let start = chrono::DateTime::parse_from_rfc3339(event.start_date_time()?).ok()?;
    let end = chrono::DateTime::parse_from_rfc3339(event.end_date_time()?).ok()?;
    Some(format_duration((end - start).num_milliseconds()))
}

/// Day-view time cell: `HH:MM (duration)` for timed events, `All-day` otherwise
pub fn time_cell<Tz>(event: &CalendarEvent, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match (event.start_date_time(), event.is_timed()) {
        (Some(start), true) => {
            let time = clock_time(start, tz);
            match event_duration(event) {
                Some(duration) => format!("{} ({})", time, duration),
                None => time,
            }
        }
        _ => t!("calendar_all_day").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::EventDateTime;
    use chrono::Utc;

    fn timed(start: &str, end: &str) -> CalendarEvent {
        CalendarEvent {
            start: Some(EventDateTime::timed(start)),
            end: Some(EventDateTime::timed(end)),
            ..Default::default()
        }
    }

    #[test]
    fn durations_floor_hours_and_minutes() {
        assert_eq!(format_duration(90 * MS_PER_MINUTE), "1h 30m");
        assert_eq!(format_duration(45 * MS_PER_MINUTE), "45m");
        assert_eq!(format_duration(2 * MS_PER_HOUR), "2h 0m");
        assert_eq!(format_duration(59 * MS_PER_MINUTE + 59_999), "59m");
        assert_eq!(format_duration(0), "0m");
    }

    #[test]
    fn timed_cell_shows_start_and_duration() {
        let event = timed("2026-10-14T09:00:00Z", "2026-10-14T10:30:00Z");
        assert_eq!(time_cell(&event, &Utc), "09:00 (1h 30m)");

        let short = timed("2026-10-14T13:15:00Z", "2026-10-14T14:00:00Z");
        assert_eq!(time_cell(&short, &Utc), "13:15 (45m)");
    }

    #[test]
    fn all_day_cell_has_no_duration() {
        let event = CalendarEvent {
            start: Some(EventDateTime::all_day("2026-10-14")),
            end: Some(EventDateTime::all_day("2026-10-15")),
            ..Default::default()
        };
        assert_eq!(time_cell(&event, &Utc), "All-day");
        assert_eq!(time_range(&event, &Utc), "All-day");
        assert_eq!(event_duration(&event), None);
    }

    #[test]
    fn start_without_end_time_counts_as_all_day() {
        let event = CalendarEvent {
            start: Some(EventDateTime::timed("2026-10-14T09:00:00Z")),
            ..Default::default()
        };
        assert_eq!(time_range(&event, &Utc), "All-day");
        assert_eq!(time_cell(&event, &Utc), "All-day");
    }

    #[test]
    fn range_is_rendered_in_the_display_zone() {
        let helsinki: chrono_tz::Tz = "Europe/Helsinki".parse().unwrap();
        let event = timed("2026-10-14T06:00:00Z", "2026-10-14T07:05:00Z");
        assert_eq!(time_range(&event, &helsinki), "09:00-10:05");
    }
}
