use super::actor::{GoogleCalendarActor, GoogleCalendarActorHandle};
use super::client::GoogleCalendarClient;
use super::models::{CalendarEvent, CalendarInfo};
use crate::components::CalendarSource;
use crate::config::{Config, GoogleEndpoints, Settings};
use crate::error::DayResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// Handle for interacting with the Google Calendar actor
#[derive(Clone)]
pub struct GoogleCalendarHandle {
    actor_handle: GoogleCalendarActorHandle,
    _actor_task: Arc<JoinHandle<()>>,
}

impl GoogleCalendarHandle {
    /// Create a new GoogleCalendarHandle and spawn the actor
    pub fn new(settings: Settings, endpoints: &GoogleEndpoints) -> Self {
        let client = GoogleCalendarClient::new(endpoints);

        // Create the actor and get its handle
        let (mut actor, handle) = GoogleCalendarActor::new(settings, client);

        // Spawn a task to run the actor
        let actor_task = tokio::spawn(async move {
            actor.run().await;
        });

        Self {
            actor_handle: handle,
            _actor_task: Arc::new(actor_task),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.settings.clone(), &config.endpoints)
    }

    /// Shutdown the actor
    pub async fn shutdown(&self) -> DayResult<()> {
        self.actor_handle.shutdown().await
    }
}

#[async_trait]
impl CalendarSource for GoogleCalendarHandle {
    async fn fetch_day_events(&self, date: Option<NaiveDate>) -> DayResult<Vec<CalendarEvent>> {
        self.actor_handle.fetch_day_events(date).await
    }

    async fn list_calendars(&self) -> DayResult<Vec<CalendarInfo>> {
        self.actor_handle.list_calendars().await
    }

    async fn update_settings(&self, settings: Settings) -> DayResult<()> {
        self.actor_handle.update_settings(settings).await
    }
}
