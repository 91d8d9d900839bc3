use super::models::{CalendarEvent, CalendarInfo, CalendarListEntry, CalendarListResponse, EventsResponse};
use super::time::{day_window, today_in, DayWindow};
use super::token::TokenManager;
use crate::config::{GoogleEndpoints, Settings};
use crate::error::{remote_error, DayResult};
use chrono::{Local, NaiveDate};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use tracing::{debug, info};
use url::Url;

/// REST client for the Google Calendar v3 API
#[derive(Clone)]
pub struct GoogleCalendarClient {
    client: Client,
    api_base: String,
    token_manager: TokenManager,
}

impl GoogleCalendarClient {
    pub fn new(endpoints: &GoogleEndpoints) -> Self {
        let client = Client::new();
        Self {
            token_manager: TokenManager::new(client.clone(), endpoints.token_url.clone()),
            api_base: endpoints.api_base.clone(),
            client,
        }
    }

    pub fn token_manager(&self) -> &TokenManager {
        &self.token_manager
    }

    /// List the user's calendars
    pub async fn list_calendars(&self, settings: &Settings) -> DayResult<Vec<CalendarInfo>> {
        let access_token = self.token_manager.access_token(settings).await?;
        let entries = self.calendar_list(&access_token).await?;
        Ok(entries.into_iter().map(CalendarInfo::from).collect())
    }

    /// Events of one local day across all selected calendars, merged and sorted.
    /// `date` defaults to today.
    pub async fn fetch_day_events(
        &self,
        settings: &Settings,
        date: Option<NaiveDate>,
    ) -> DayResult<Vec<CalendarEvent>> {
        let date = date.unwrap_or_else(|| today_in(&Local));
        let window = day_window(&Local, date)?;
        self.fetch_window_events(settings, &window).await
    }

    /// Events starting inside `window` across all selected calendars
    pub async fn fetch_window_events(
        &self,
        settings: &Settings,
        window: &DayWindow,
    ) -> DayResult<Vec<CalendarEvent>> {
        let access_token = self.token_manager.access_token(settings).await?;

        // Display names, fetched once per aggregation
        let calendar_names: HashMap<String, String> = self
            .calendar_list(&access_token)
            .await?
            .into_iter()
            .filter_map(|entry| Some((entry.id?, entry.summary?)))
            .filter(|(_, summary)| !summary.is_empty())
            .collect();

        let mut batches = Vec::new();
        for calendar_id in settings.effective_calendar_ids() {
            let events = self.list_events(&access_token, &calendar_id, window).await?;
            let calendar_name = calendar_names
                .get(&calendar_id)
                .cloned()
                .unwrap_or_else(|| calendar_id.clone());
            debug!("Fetched {} events from {}", events.len(), calendar_id);
            batches.push((calendar_name, events));
        }

        let merged = merge_events(batches);
        info!("Fetched {} events for {}", merged.len(), window.time_min());
        Ok(merged)
    }

    async fn calendar_list(&self, access_token: &str) -> DayResult<Vec<CalendarListEntry>> {
        let url = self.url(&["users", "me", "calendarList"])?;
        let response: CalendarListResponse = self.get_json(url, access_token).await?;
        Ok(response.items)
    }

    async fn list_events(
        &self,
        access_token: &str,
        calendar_id: &str,
        window: &DayWindow,
    ) -> DayResult<Vec<CalendarEvent>> {
        let mut url = self.url(&["calendars", calendar_id, "events"])?;
        url.query_pairs_mut()
            .append_pair("timeMin", &window.time_min())
            .append_pair("timeMax", &window.time_max())
            .append_pair("singleEvents", "true")
            .append_pair("orderBy", "startTime");

        let response: EventsResponse = self.get_json(url, access_token).await?;
        Ok(response.items)
    }

    fn url(&self, segments: &[&str]) -> DayResult<Url> {
        let mut url = Url::parse(&self.api_base)
            .map_err(|e| remote_error(&format!("Failed to parse URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| remote_error(&format!("Invalid API base: {}", self.api_base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url, access_token: &str) -> DayResult<T> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| remote_error(&format!("Failed to fetch events: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error response".to_string());
            return Err(remote_error(&format!("HTTP {} - {}", status, error_body)));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| remote_error(&format!("Failed to parse response: {}", e)))
    }
}

/// Tag each batch with its calendar name, concatenate in calendar order and
/// sort by start. The sort is stable, so ties keep their calendar order.
pub fn merge_events(batches: Vec<(String, Vec<CalendarEvent>)>) -> Vec<CalendarEvent> {
    let mut merged: Vec<CalendarEvent> = batches
        .into_iter()
        .flat_map(|(calendar_name, events)| {
            events.into_iter().map(move |mut event| {
                event.calendar_name = calendar_name.clone();
                event
            })
        })
        .collect();

    merged.sort_by(|a, b| a.sort_key().cmp(b.sort_key()));
    merged
}
