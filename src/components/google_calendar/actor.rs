use super::client::GoogleCalendarClient;
use super::models::{CalendarEvent, CalendarInfo};
use crate::config::Settings;
use crate::error::{other_error, DayResult};
use chrono::NaiveDate;
use tokio::sync::{mpsc, oneshot};
use tracing::info;

/// The Google Calendar actor that processes messages one at a time
pub struct GoogleCalendarActor {
    settings: Settings,
    client: GoogleCalendarClient,
    command_rx: mpsc::Receiver<GoogleCalendarCommand>,
}

/// Commands that can be sent to the Google Calendar actor
pub enum GoogleCalendarCommand {
    FetchDayEvents(Option<NaiveDate>, oneshot::Sender<DayResult<Vec<CalendarEvent>>>),
    ListCalendars(oneshot::Sender<DayResult<Vec<CalendarInfo>>>),
    UpdateSettings(Settings),
    Shutdown,
}

/// Handle for communicating with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarActorHandle {
    command_tx: mpsc::Sender<GoogleCalendarCommand>,
}

impl GoogleCalendarActorHandle {
    /// Events for one day across the selected calendars
    pub async fn fetch_day_events(&self, date: Option<NaiveDate>) -> DayResult<Vec<CalendarEvent>> {
        let (response_tx, response_rx) = oneshot::channel();
        self.send(GoogleCalendarCommand::FetchDayEvents(date, response_tx))
            .await?;

        response_rx
            .await
            .map_err(|_| other_error("Response channel closed"))?
    }

    /// Calendars available to the user
    pub async fn list_calendars(&self) -> DayResult<Vec<CalendarInfo>> {
        let (response_tx, response_rx) = oneshot::channel();
        self.send(GoogleCalendarCommand::ListCalendars(response_tx))
            .await?;

        response_rx
            .await
            .map_err(|_| other_error("Response channel closed"))?
    }

    /// Replace the settings used for subsequent requests
    pub async fn update_settings(&self, settings: Settings) -> DayResult<()> {
        self.send(GoogleCalendarCommand::UpdateSettings(settings)).await
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DayResult<()> {
        let _ = self.command_tx.send(GoogleCalendarCommand::Shutdown).await;
        Ok(())
    }

    async fn send(&self, command: GoogleCalendarCommand) -> DayResult<()> {
        self.command_tx
            .send(command)
            .await
            .map_err(|e| other_error(&format!("Actor mailbox error: {}", e)))
    }
}

impl GoogleCalendarActor {
    /// Create a new actor and return its handle
    pub fn new(settings: Settings, client: GoogleCalendarClient) -> (Self, GoogleCalendarActorHandle) {
        let (command_tx, command_rx) = mpsc::channel(32);

        let actor = Self {
            settings,
            client,
            command_rx,
        };

        let handle = GoogleCalendarActorHandle { command_tx };

        (actor, handle)
    }

    /// Start the actor's processing loop
    pub async fn run(&mut self) {
        info!("Google Calendar actor started");

        while let Some(cmd) = self.command_rx.recv().await {
            match cmd {
                GoogleCalendarCommand::FetchDayEvents(date, response_tx) => {
                    let result = self.client.fetch_day_events(&self.settings, date).await;
                    let _ = response_tx.send(result);
                }
                GoogleCalendarCommand::ListCalendars(response_tx) => {
                    let result = self.client.list_calendars(&self.settings).await;
                    let _ = response_tx.send(result);
                }
                GoogleCalendarCommand::UpdateSettings(settings) => {
                    info!(
                        "Settings updated, {} calendars selected",
                        settings.calendar_ids.len()
                    );
                    if settings != self.settings {
                        self.client.token_manager().invalidate().await;
                    }
                    self.settings = settings;
                }
                GoogleCalendarCommand::Shutdown => {
                    info!("Google Calendar actor shutting down");
                    break;
                }
            }
        }

        info!("Google Calendar actor shut down");
    }
}
