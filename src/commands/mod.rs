use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use dayglance::config::Config;
use dayglance::error::DayResult;
use std::path::PathBuf;

pub mod calendars;
pub mod insert;
pub mod settings;
pub mod view;

/// Google Calendar events for your notes
#[derive(Debug, Parser)]
#[command(name = "dayglance", version, about)]
pub struct Cli {
    /// Settings file (defaults to config/settings.toml)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Insert the day's events as markdown
    Insert {
        /// Append to this note instead of printing
        #[arg(long)]
        into: Option<PathBuf>,
        /// Day to insert (YYYY-MM-DD), today by default
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Interactive day view
    View {
        /// Day to open (YYYY-MM-DD), today by default
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Discover calendars and choose which ones to include
    Calendars {
        #[command(subcommand)]
        action: Option<CalendarAction>,
    },
    /// Show or change credentials
    Settings {
        #[command(subcommand)]
        action: Option<SettingsAction>,
    },
}

#[derive(Debug, Subcommand)]
pub enum CalendarAction {
    /// List available calendars and whether they are included
    List,
    /// Include a calendar
    Enable { id: String },
    /// Stop including a calendar
    Disable { id: String },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the current settings with secrets masked
    Show,
    SetClientId { value: String },
    SetClientSecret { value: String },
    SetRefreshToken { value: String },
}

/// Dispatch a parsed command
pub async fn run(command: Command, mut config: Config) -> DayResult<()> {
    match command {
        Command::Insert { into, date } => insert::run(&config, into, date).await,
        Command::View { date } => view::run(&mut config, date).await,
        Command::Calendars { action } => match action.unwrap_or(CalendarAction::List) {
            CalendarAction::List => calendars::list(&config).await,
            CalendarAction::Enable { id } => calendars::enable(&mut config, &id),
            CalendarAction::Disable { id } => calendars::disable(&mut config, &id),
        },
        Command::Settings { action } => match action.unwrap_or(SettingsAction::Show) {
            SettingsAction::Show => {
                println!("{}", settings::summary(&config.settings));
                Ok(())
            }
            SettingsAction::SetClientId { value } => settings::set_client_id(&mut config, &value),
            SettingsAction::SetClientSecret { value } => {
                settings::set_client_secret(&mut config, &value)
            }
            SettingsAction::SetRefreshToken { value } => {
                settings::set_refresh_token(&mut config, &value)
            }
        },
    }
}
