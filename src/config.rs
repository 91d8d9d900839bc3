use crate::error::{config_error, DayResult};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Default location of the settings file, relative to the working directory
pub const DEFAULT_SETTINGS_PATH: &str = "config/settings.toml";
/// Locale used when `DAYGLANCE_LOCALE` is not set
pub const DEFAULT_LOCALE: &str = "en";
/// Calendar queried when no calendars are selected
pub const PRIMARY_CALENDAR_ID: &str = "primary";
/// Placeholder shown instead of stored secrets
pub const SECRET_MASK: &str = "••••••••••••••••";

pub const GOOGLE_API_BASE: &str = "https://www.googleapis.com/calendar/v3";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const GOOGLE_AUTH_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";

/// Credentials and calendar selection, persisted as TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Google Calendar API client ID
    pub client_id: String,
    /// Google Calendar API client secret
    pub client_secret: String,
    /// Long-lived OAuth refresh token
    pub refresh_token: String,
    /// Secondary calendars to include, in selection order
    pub calendar_ids: Vec<String>,
}

impl Settings {
    /// True when every credential field is non-empty
    pub fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty() && !self.refresh_token.is_empty()
    }

    /// Calendars to query; falls back to the primary calendar
    pub fn effective_calendar_ids(&self) -> Vec<String> {
        if self.calendar_ids.is_empty() {
            vec![PRIMARY_CALENDAR_ID.to_string()]
        } else {
            self.calendar_ids.clone()
        }
    }

    pub fn set_client_id(&mut self, value: &str) -> DayResult<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(config_error(&t!("settings_client_id_empty")));
        }
        self.client_id = value.to_string();
        Ok(())
    }

    pub fn set_client_secret(&mut self, value: &str) -> DayResult<()> {
        let value = value.trim();
        if value.is_empty() {
            return Err(config_error(&t!("settings_client_secret_empty")));
        }
        self.client_secret = value.to_string();
        Ok(())
    }

    /// Stored as given
    pub fn set_refresh_token(&mut self, value: &str) {
        self.refresh_token = value.to_string();
    }

    pub fn is_selected(&self, calendar_id: &str) -> bool {
        self.calendar_ids.iter().any(|id| id == calendar_id)
    }

    /// Add a calendar to the selection. Returns false if it was already there.
    pub fn enable_calendar(&mut self, calendar_id: &str) -> bool {
        if self.is_selected(calendar_id) {
            return false;
        }
        self.calendar_ids.push(calendar_id.to_string());
        true
    }

    /// Remove a calendar from the selection. Returns false if it was not selected.
    pub fn disable_calendar(&mut self, calendar_id: &str) -> bool {
        let before = self.calendar_ids.len();
        self.calendar_ids.retain(|id| id != calendar_id);
        before != self.calendar_ids.len()
    }

    pub fn masked_client_secret(&self) -> &str {
        mask(&self.client_secret)
    }

    pub fn masked_refresh_token(&self) -> &str {
        mask(&self.refresh_token)
    }

    /// Read settings from a TOML file. A missing file yields the defaults.
    pub fn read_from(path: &Path) -> DayResult<Self> {
        match fs::read_to_string(path) {
            Ok(content) => Ok(toml::from_str(&content)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings to a TOML file, creating the parent directory if needed
    pub fn write_to(&self, path: &Path) -> DayResult<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let toml_str = toml::to_string(self)?;
        fs::write(path, toml_str)?;

        Ok(())
    }

    /// Override credentials with non-empty environment variables
    fn apply_env_overrides(&mut self) {
        if let Some(value) = non_empty_env("GOOGLE_CLIENT_ID") {
            self.client_id = value;
        }
        if let Some(value) = non_empty_env("GOOGLE_CLIENT_SECRET") {
            self.client_secret = value;
        }
        if let Some(value) = non_empty_env("GOOGLE_REFRESH_TOKEN") {
            self.refresh_token = value;
        }
    }
}

fn mask(value: &str) -> &str {
    if value.is_empty() {
        ""
    } else {
        SECRET_MASK
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Google endpoints; overridable so tests can point at a mock server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleEndpoints {
    pub api_base: String,
    pub token_url: String,
    pub auth_url: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            api_base: GOOGLE_API_BASE.to_string(),
            token_url: GOOGLE_TOKEN_URL.to_string(),
            auth_url: GOOGLE_AUTH_URL.to_string(),
        }
    }
}

impl GoogleEndpoints {
    /// Endpoints rooted at a single base URL, as served by a mock server
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            api_base: format!("{}/calendar/v3", base),
            token_url: format!("{}/token", base),
            auth_url: format!("{}/auth", base),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Where the settings are persisted
    pub settings_path: PathBuf,
    /// Locale for user-facing text
    pub locale: String,
    pub endpoints: GoogleEndpoints,
    pub settings: Settings,
}

impl Config {
    /// Load configuration from environment and the settings file
    pub fn load(settings_path: Option<PathBuf>) -> DayResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let settings_path = settings_path
            .or_else(|| non_empty_env("DAYGLANCE_SETTINGS").map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS_PATH));

        let locale = non_empty_env("DAYGLANCE_LOCALE").unwrap_or_else(|| DEFAULT_LOCALE.to_string());

        let mut endpoints = GoogleEndpoints::default();
        if let Some(api_base) = non_empty_env("GOOGLE_API_BASE") {
            endpoints.api_base = api_base;
        }
        if let Some(token_url) = non_empty_env("GOOGLE_TOKEN_URL") {
            endpoints.token_url = token_url;
        }

        let mut settings = Settings::read_from(&settings_path)?;
        settings.apply_env_overrides();

        Ok(Config {
            settings_path,
            locale,
            endpoints,
            settings,
        })
    }

    /// Persist the current settings
    pub fn save_settings(&self) -> DayResult<()> {
        self.settings.write_to(&self.settings_path)
    }

    /// Re-read the settings file, for example after another process changed it
    pub fn reload_settings(&mut self) -> DayResult<&Settings> {
        let mut settings = Settings::read_from(&self.settings_path)?;
        settings.apply_env_overrides();
        self.settings = settings;
        Ok(&self.settings)
    }
}
