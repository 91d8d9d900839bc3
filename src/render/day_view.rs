use super::format::time_cell;
use crate::components::google_calendar::events_notice;
use crate::components::google_calendar::time::today_in;
use crate::components::{CalendarEvent, CalendarSource};
use crate::config::Settings;
use crate::error::DayResult;
use crate::notices::NoticeSink;
use chrono::{Days, Local, NaiveDate, TimeZone};
use std::fmt::Display;
use tracing::{debug, warn};

pub const MEETING_GLYPH: &str = "🎥";

/// One table row of the day view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayRow {
    pub time: String,
    pub summary: String,
    pub meeting_link: Option<String>,
    /// Source calendar name, set only for non-primary calendars
    pub calendar_source: Option<String>,
}

impl DayRow {
    fn from_event<Tz>(event: &CalendarEvent, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        let calendar_source = if event.calendar_name.is_empty() || event.is_from_primary() {
            None
        } else {
            Some(event.calendar_name.clone())
        };

        Self {
            time: time_cell(event, tz),
            summary: event.summary.clone().unwrap_or_default(),
            meeting_link: event.hangout_link.clone(),
            calendar_source,
        }
    }

    /// Title cell: meeting glyph, summary and source suffix
    pub fn title(&self) -> String {
        let mut title = String::new();
        if self.meeting_link.is_some() {
            title.push_str(MEETING_GLYPH);
            title.push(' ');
        }
        title.push_str(&self.summary);
        if let Some(source) = &self.calendar_source {
            title.push_str(&format!(" • {}", source));
        }
        title
    }
}

/// What the view currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState {
    Loading,
    Loaded(Vec<DayRow>),
    /// The fetch succeeded with zero events
    Empty,
    /// The fetch failed
    Error,
}

/// User controls of the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Previous,
    Next,
    Today,
    Refresh,
}

/// Day-view panel: a date cursor plus the state of the last load.
///
/// Only one load runs at a time. While it is in flight the view is busy and
/// navigation is ignored rather than queued.
#[derive(Debug, Clone)]
pub struct DayView<Tz: TimeZone = Local> {
    cursor: NaiveDate,
    busy: bool,
    state: ViewState,
    tz: Tz,
}

impl DayView<Local> {
    /// View on today's date in the local zone
    pub fn new() -> Self {
        Self::with_zone(Local)
    }
}

impl Default for DayView<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz> DayView<Tz>
where
    Tz: TimeZone + Send + Sync,
    Tz::Offset: Display + Send + Sync,
{
    pub fn with_zone(tz: Tz) -> Self {
        let cursor = today_in(&tz);
        Self::starting_at(cursor, tz)
    }

    pub fn starting_at(cursor: NaiveDate, tz: Tz) -> Self {
        Self {
            cursor,
            busy: false,
            state: ViewState::Loading,
            tz,
        }
    }

    pub fn cursor(&self) -> NaiveDate {
        self.cursor
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    /// Move the cursor. Returns false, changing nothing, while a load is in flight.
    pub fn navigate(&mut self, navigation: Navigation) -> bool {
        if self.busy {
            debug!("Ignoring {:?} while loading", navigation);
            return false;
        }

        let target = match navigation {
            Navigation::Previous => self.cursor.checked_sub_days(Days::new(1)),
            Navigation::Next => self.cursor.checked_add_days(Days::new(1)),
            Navigation::Today => Some(today_in(&self.tz)),
            Navigation::Refresh => Some(self.cursor),
        };
        // Stepping past the calendar's range keeps the cursor where it is
        if let Some(target) = target {
            self.cursor = target;
        }
        true
    }

    /// Enter the loading state and return the date to fetch
    pub fn begin_load(&mut self) -> NaiveDate {
        self.busy = true;
        self.state = ViewState::Loading;
        self.cursor
    }

    /// Leave the loading state with the outcome of the fetch
    pub fn finish_load(&mut self, result: &DayResult<Vec<CalendarEvent>>) {
        self.state = match result {
            Ok(events) if events.is_empty() => ViewState::Empty,
            Ok(events) => ViewState::Loaded(
                events
                    .iter()
                    .filter(|e| e.start.is_some())
                    .map(|e| DayRow::from_event(e, &self.tz))
                    .collect(),
            ),
            Err(e) => {
                warn!("Day view load failed: {}", e);
                ViewState::Error
            }
        };
        self.busy = false;
    }

    /// Finish a load and raise a notice if it failed
    pub fn complete_load(&mut self, result: &DayResult<Vec<CalendarEvent>>, notices: &dyn NoticeSink) {
        if let Err(e) = result {
            notices.notice(&events_notice(e));
        }
        self.finish_load(result);
    }

    /// Load the cursor's day from `source`. Failures also raise a notice.
    pub async fn render<S>(&mut self, source: &S, notices: &dyn NoticeSink)
    where
        S: CalendarSource + ?Sized,
    {
        let date = self.begin_load();
        let result = source.fetch_day_events(Some(date)).await;
        self.complete_load(&result, notices);
    }

    /// Apply a navigation control and reload if it was accepted
    pub async fn handle<S>(&mut self, navigation: Navigation, source: &S, notices: &dyn NoticeSink) -> bool
    where
        S: CalendarSource + ?Sized,
    {
        if !self.navigate(navigation) {
            return false;
        }
        self.render(source, notices).await;
        true
    }

    /// Push new settings to the source and reload
    pub async fn update_settings<S>(
        &mut self,
        settings: Settings,
        source: &S,
        notices: &dyn NoticeSink,
    ) -> DayResult<()>
    where
        S: CalendarSource + ?Sized,
    {
        source.update_settings(settings).await?;
        self.render(source, notices).await;
        Ok(())
    }

    /// Text rendering of the panel
    pub fn paint(&self) -> String {
        let mut out = format!(
            "{}\n< {} >\n{}\n\n",
            t!("view_title"),
            self.cursor.format("%a %b %d %Y"),
            t!("view_controls")
        );

        match &self.state {
            ViewState::Loading => out.push_str(&format!("{}\n", t!("view_loading"))),
            ViewState::Empty => out.push_str(&format!("{}\n", t!("view_nothing_today"))),
            ViewState::Error => out.push_str(&format!("{}\n", t!("view_error"))),
            ViewState::Loaded(rows) => {
                let width = rows
                    .iter()
                    .map(|row| row.time.chars().count())
                    .max()
                    .unwrap_or(0);
                for row in rows {
                    let padding = width - row.time.chars().count();
                    out.push_str(&format!(
                        "{}{}  {}\n",
                        row.time,
                        " ".repeat(padding),
                        row.title()
                    ));
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::google_calendar::EventDateTime;
    use crate::error::remote_error;
    use chrono::Utc;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 14).unwrap()
    }

    fn events() -> Vec<CalendarEvent> {
        vec![
            CalendarEvent {
                summary: Some("Offsite".into()),
                start: Some(EventDateTime::all_day("2026-10-14")),
                end: Some(EventDateTime::all_day("2026-10-15")),
                calendar_name: "Team".into(),
                ..Default::default()
            },
            CalendarEvent {
                summary: Some("Design review".into()),
                start: Some(EventDateTime::timed("2026-10-14T09:00:00Z")),
                end: Some(EventDateTime::timed("2026-10-14T10:30:00Z")),
                hangout_link: Some("https://meet.google.com/x".into()),
                calendar_name: "primary".into(),
                ..Default::default()
            },
            CalendarEvent {
                summary: Some("No start".into()),
                calendar_name: "primary".into(),
                ..Default::default()
            },
        ]
    }

    #[test]
    fn loaded_rows_skip_events_without_start() {
        let mut view = DayView::starting_at(day(), Utc);
        view.begin_load();
        view.finish_load(&Ok(events()));

        let ViewState::Loaded(rows) = view.state() else {
            panic!("expected loaded state, got {:?}", view.state());
        };
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].time, "All-day");
        assert_eq!(rows[0].title(), "Offsite • Team");
        assert_eq!(rows[1].time, "09:00 (1h 30m)");
        assert_eq!(rows[1].title(), "🎥 Design review");
    }

    #[test]
    fn empty_and_failed_loads_are_distinct() {
        let mut view = DayView::starting_at(day(), Utc);

        view.begin_load();
        view.finish_load(&Ok(Vec::new()));
        assert_eq!(view.state(), &ViewState::Empty);
        assert!(view.paint().contains("Nothing today!"));

        view.begin_load();
        view.finish_load(&Err(remote_error("HTTP 500")));
        assert_eq!(view.state(), &ViewState::Error);
        assert!(view.paint().contains("Error loading calendar events"));
        assert!(!view.is_busy());
    }

    #[test]
    fn navigation_is_ignored_while_busy() {
        let mut view = DayView::starting_at(day(), Utc);

        let date = view.begin_load();
        assert_eq!(date, day());
        assert!(view.is_busy());
        assert!(view.paint().contains("Loading..."));

        assert!(!view.navigate(Navigation::Next));
        assert!(!view.navigate(Navigation::Previous));
        assert_eq!(view.cursor(), day());

        view.finish_load(&Ok(Vec::new()));
        assert!(view.navigate(Navigation::Next));
        assert_eq!(view.cursor(), day().succ_opt().unwrap());
        assert!(view.navigate(Navigation::Previous));
        assert!(view.navigate(Navigation::Previous));
        assert_eq!(view.cursor(), day().pred_opt().unwrap());
    }

    #[test]
    fn stepping_past_the_date_range_keeps_the_cursor() {
        let mut view = DayView::starting_at(NaiveDate::MAX, Utc);
        assert!(view.navigate(Navigation::Next));
        assert_eq!(view.cursor(), NaiveDate::MAX);

        let mut view = DayView::starting_at(NaiveDate::MIN, Utc);
        assert!(view.navigate(Navigation::Previous));
        assert_eq!(view.cursor(), NaiveDate::MIN);
        assert!(view.navigate(Navigation::Next));
        assert_eq!(view.cursor(), NaiveDate::MIN.succ_opt().unwrap());
    }

    #[test]
    fn failed_completion_raises_one_notice() {
        let notices = crate::notices::MemoryNotices::new();
        let mut view = DayView::starting_at(day(), Utc);

        view.begin_load();
        view.complete_load(&Err(remote_error("HTTP 500")), &notices);
        assert_eq!(view.state(), &ViewState::Error);
        assert_eq!(
            notices.messages(),
            vec!["Error fetching Google Calendar events: HTTP 500".to_string()]
        );

        view.begin_load();
        view.complete_load(&Ok(Vec::new()), &notices);
        assert_eq!(view.state(), &ViewState::Empty);
        assert_eq!(notices.messages().len(), 1);
    }

    #[test]
    fn today_resets_the_cursor() {
        let mut view = DayView::starting_at(day(), Utc);
        assert!(view.navigate(Navigation::Today));
        assert_eq!(view.cursor(), today_in(&Utc));
    }

    #[test]
    fn paint_aligns_time_column() {
        let mut view = DayView::starting_at(day(), Utc);
        view.begin_load();
        view.finish_load(&Ok(events()));

        let painted = view.paint();
        assert!(painted.contains("< Wed Oct 14 2026 >"));
        assert!(painted.contains("All-day         Offsite • Team\n"));
        assert!(painted.contains("09:00 (1h 30m)  🎥 Design review\n"));
    }
}
