use dayglance::components::google_calendar::get_available_calendars;
use dayglance::components::{CalendarInfo, GoogleCalendarHandle};
use dayglance::config::{Config, Settings};
use dayglance::error::DayResult;
use dayglance::notices::TerminalNotices;
use tracing::info;

/// Discover calendars and show which ones are included
pub async fn list(config: &Config) -> DayResult<()> {
    let handle = GoogleCalendarHandle::from_config(config);
    let calendars = get_available_calendars(&handle, &TerminalNotices).await;

    println!("{}", t!("calendars_hint"));
    println!("{}", discovery_listing(&calendars, &config.settings));

    handle.shutdown().await
}

/// Include a calendar in future fetches
pub fn enable(config: &mut Config, calendar_id: &str) -> DayResult<()> {
    if config.settings.enable_calendar(calendar_id) {
        config.save_settings()?;
        info!("Enabled calendar {}", calendar_id);
        println!("{}", t!("calendars_enabled", id = calendar_id));
    } else {
        println!("{}", t!("calendars_unchanged", id = calendar_id));
    }
    Ok(())
}

/// Stop including a calendar
pub fn disable(config: &mut Config, calendar_id: &str) -> DayResult<()> {
    if config.settings.disable_calendar(calendar_id) {
        config.save_settings()?;
        info!("Disabled calendar {}", calendar_id);
        println!("{}", t!("calendars_disabled", id = calendar_id));
    } else {
        println!("{}", t!("calendars_unchanged", id = calendar_id));
    }
    Ok(())
}

/// One line per non-primary calendar with its selection state
fn discovery_listing(calendars: &[CalendarInfo], settings: &Settings) -> String {
    let lines: Vec<String> = calendars
        .iter()
        .filter(|c| !c.primary)
        .map(|c| {
            let mark = if settings.is_selected(&c.id) { "x" } else { " " };
            format!("[{}] {}  ({})", mark, c.summary, c.id)
        })
        .collect();

    if lines.is_empty() {
        t!("calendars_none").to_string()
    } else {
        lines.join("\n")
    }
}
