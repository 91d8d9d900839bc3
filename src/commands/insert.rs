use dayglance::components::google_calendar::time::today_in;
use dayglance::components::google_calendar::get_calendar_events;
use dayglance::components::GoogleCalendarHandle;
use dayglance::config::Config;
use dayglance::error::DayResult;
use dayglance::notices::TerminalNotices;
use dayglance::render::format_events_markdown;
use chrono::{Local, NaiveDate};
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Fetch the day's events and insert them as markdown
pub async fn run(config: &Config, into: Option<PathBuf>, date: Option<NaiveDate>) -> DayResult<()> {
    let handle = GoogleCalendarHandle::from_config(config);
    let date = date.unwrap_or_else(|| today_in(&Local));

    // A failed fetch has already raised a notice and inserts the fallback line
    let events = get_calendar_events(&handle, Some(date), &TerminalNotices)
        .await
        .unwrap_or_default();
    let text = format_events_markdown(&events, date, &Local);

    match into {
        Some(path) => {
            append_to_note(&path, &text)?;
            info!("Inserted {} events into {}", events.len(), path.display());
            eprintln!("{}", t!("insert_appended", path = path.display().to_string()));
        }
        None => print!("{}", text),
    }

    handle.shutdown().await
}

/// Append `text` to a note, starting on a fresh line
pub fn append_to_note(path: &Path, text: &str) -> DayResult<()> {
    let needs_newline = match fs::read_to_string(path) {
        Ok(existing) => !existing.is_empty() && !existing.ends_with('\n'),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(e.into()),
    };

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    if needs_newline {
        file.write_all(b"\n")?;
    }
    file.write_all(text.as_bytes())?;

    Ok(())
}
