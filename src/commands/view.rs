use crate::shutdown::wait_for_signal;
use chrono::{Local, NaiveDate};
use dayglance::components::{CalendarSource, GoogleCalendarHandle};
use dayglance::config::Config;
use dayglance::error::DayResult;
use dayglance::notices::{NoticeSink, TerminalNotices};
use dayglance::render::{DayView, Navigation};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info, warn};

/// A line typed into the day view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewCommand {
    Navigate(Navigation),
    ReloadSettings,
    Quit,
}

fn parse_command(input: &str) -> Option<ViewCommand> {
    match input.trim().to_lowercase().as_str() {
        "p" | "prev" | "<" => Some(ViewCommand::Navigate(Navigation::Previous)),
        "n" | "next" | ">" => Some(ViewCommand::Navigate(Navigation::Next)),
        "t" | "today" => Some(ViewCommand::Navigate(Navigation::Today)),
        "r" | "refresh" | "" => Some(ViewCommand::Navigate(Navigation::Refresh)),
        "s" | "settings" => Some(ViewCommand::ReloadSettings),
        "q" | "quit" | "exit" => Some(ViewCommand::Quit),
        _ => None,
    }
}

/// Run the interactive day view until the user quits or the process is signalled
pub async fn run(config: &mut Config, date: Option<NaiveDate>) -> DayResult<()> {
    let handle = GoogleCalendarHandle::from_config(config);
    let notices = TerminalNotices;
    let mut view = match date {
        Some(date) => DayView::starting_at(date, Local),
        None => DayView::new(),
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let shutdown = wait_for_signal();
    tokio::pin!(shutdown);

    info!("Day view opened on {}", view.cursor());

    'render: loop {
        let date = view.begin_load();
        print!("{}", view.paint());

        // Lines typed while the load is in flight are dropped
        let fetch = handle.fetch_day_events(Some(date));
        tokio::pin!(fetch);
        let result = loop {
            tokio::select! {
                result = &mut fetch => break result,
                line = lines.next_line() => match line? {
                    Some(input) => debug!("Ignoring {:?} while loading", input),
                    None => break 'render,
                },
                signal = &mut shutdown => {
                    signal?;
                    break 'render;
                }
            }
        };

        view.complete_load(&result, &notices);
        println!();
        print!("{}", view.paint());

        loop {
            let line = tokio::select! {
                line = lines.next_line() => line?,
                signal = &mut shutdown => {
                    signal?;
                    None
                }
            };
            let Some(input) = line else {
                break 'render;
            };

            match parse_command(&input) {
                Some(ViewCommand::Navigate(navigation)) => {
                    if view.navigate(navigation) {
                        continue 'render;
                    }
                }
                Some(ViewCommand::ReloadSettings) => {
                    reload_settings(config, &handle, &notices).await?;
                    continue 'render;
                }
                Some(ViewCommand::Quit) => break 'render,
                None => println!("{}", t!("view_controls")),
            }
        }
    }

    info!("Day view closed");
    handle.shutdown().await
}

/// Re-read the settings file and push it to `source`.
/// An unreadable file raises a notice and the previous settings stay in use.
async fn reload_settings<S>(config: &mut Config, source: &S, notices: &dyn NoticeSink) -> DayResult<()>
where
    S: CalendarSource + ?Sized,
{
    match config.reload_settings() {
        Ok(settings) => source.update_settings(settings.clone()).await,
        Err(e) => {
            warn!("Failed to reload settings: {}", e);
            notices.notice(&t!("notice_settings_reload_failed", error = e.to_string()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use dayglance::components::{CalendarEvent, CalendarInfo};
    use dayglance::config::{GoogleEndpoints, Settings};
    use dayglance::notices::MemoryNotices;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingSource {
        pushed: Mutex<Vec<Settings>>,
    }

    #[async_trait]
    impl CalendarSource for RecordingSource {
        async fn fetch_day_events(&self, _date: Option<NaiveDate>) -> DayResult<Vec<CalendarEvent>> {
            Ok(Vec::new())
        }

        async fn list_calendars(&self) -> DayResult<Vec<CalendarInfo>> {
            Ok(Vec::new())
        }

        async fn update_settings(&self, settings: Settings) -> DayResult<()> {
            self.pushed.lock().unwrap().push(settings);
            Ok(())
        }
    }

    fn config_at(path: std::path::PathBuf) -> Config {
        Config {
            settings_path: path,
            locale: "en".into(),
            endpoints: GoogleEndpoints::default(),
            settings: Settings {
                client_id: "client".into(),
                client_secret: "secret".into(),
                refresh_token: "refresh".into(),
                calendar_ids: Vec::new(),
            },
        }
    }

    #[tokio::test]
    async fn malformed_settings_file_keeps_previous_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "client_id = [unterminated").unwrap();

        let mut config = config_at(path);
        let previous = config.settings.clone();
        let source = RecordingSource::default();
        let notices = MemoryNotices::new();

        reload_settings(&mut config, &source, &notices).await.unwrap();

        assert_eq!(config.settings, previous);
        assert!(source.pushed.lock().unwrap().is_empty());
        let messages = notices.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].starts_with("Error reading settings:"));
    }

    #[tokio::test]
    async fn reloaded_settings_are_pushed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        let mut on_disk = Settings::default();
        on_disk.enable_calendar("team@group.calendar.google.com");
        on_disk.write_to(&path).unwrap();

        let mut config = config_at(path);
        let source = RecordingSource::default();
        let notices = MemoryNotices::new();

        reload_settings(&mut config, &source, &notices).await.unwrap();

        let pushed = source.pushed.lock().unwrap().clone();
        assert_eq!(pushed.len(), 1);
        assert_eq!(
            pushed[0].calendar_ids,
            vec!["team@group.calendar.google.com".to_string()]
        );
        assert!(notices.messages().is_empty());
    }

    #[test]
    fn parses_view_commands() {
        assert_eq!(
            parse_command(" N "),
            Some(ViewCommand::Navigate(Navigation::Next))
        );
        assert_eq!(
            parse_command("<"),
            Some(ViewCommand::Navigate(Navigation::Previous))
        );
        assert_eq!(
            parse_command(""),
            Some(ViewCommand::Navigate(Navigation::Refresh))
        );
        assert_eq!(parse_command("s"), Some(ViewCommand::ReloadSettings));
        assert_eq!(parse_command("quit"), Some(ViewCommand::Quit));
        assert_eq!(parse_command("tomorrow"), None);
    }
}
