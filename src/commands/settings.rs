use dayglance::config::{Config, Settings};
use dayglance::error::{DayResult, Error};
use dayglance::notices::{NoticeSink, TerminalNotices};

/// Settings with secrets masked
pub fn summary(settings: &Settings) -> String {
    let calendars = if settings.calendar_ids.is_empty() {
        t!("settings_primary_only").to_string()
    } else {
        settings.calendar_ids.join(", ")
    };

    t!(
        "settings_show",
        client_id = settings.client_id.clone(),
        client_secret = settings.masked_client_secret(),
        refresh_token = settings.masked_refresh_token(),
        calendars = calendars
    )
    .to_string()
}

pub fn set_client_id(config: &mut Config, value: &str) -> DayResult<()> {
    let result = config.settings.set_client_id(value);
    save_or_notify(config, result)
}

pub fn set_client_secret(config: &mut Config, value: &str) -> DayResult<()> {
    let result = config.settings.set_client_secret(value);
    save_or_notify(config, result)
}

pub fn set_refresh_token(config: &mut Config, value: &str) -> DayResult<()> {
    config.settings.set_refresh_token(value);
    save_or_notify(config, Ok(()))
}

/// Rejected values only raise a notice; nothing is saved
fn save_or_notify(config: &Config, result: DayResult<()>) -> DayResult<()> {
    match result {
        Ok(()) => {
            config.save_settings()?;
            println!("{}", t!("settings_saved"));
            Ok(())
        }
        Err(Error::Configuration(message)) => {
            TerminalNotices.notice(&message);
            Ok(())
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_masks_secrets() {
        let settings = Settings {
            client_id: "abc.apps.googleusercontent.com".into(),
            client_secret: "very-secret".into(),
            refresh_token: String::new(),
            calendar_ids: vec!["team".into(), "holidays".into()],
        };

        let text = summary(&settings);
        assert!(text.contains("Client ID: abc.apps.googleusercontent.com"));
        assert!(text.contains("Client Secret: ••••••••••••••••"));
        assert!(!text.contains("very-secret"));
        assert!(text.contains("Calendars: team, holidays"));
    }

    #[test]
    fn empty_selection_reads_as_primary() {
        assert!(summary(&Settings::default()).contains("primary (default)"));
    }
}
