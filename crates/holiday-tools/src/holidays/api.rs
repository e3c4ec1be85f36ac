use super::error::FetchError;
use super::query::HolidayQuery;
use async_trait::async_trait;
use holiday_core::config::{CalendarConfig, DEFAULT_CALENDAR_URL};
use holiday_core::Error as CoreError;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Source of raw holiday data. One call is one outbound request.
#[async_trait]
pub trait HolidayApi: Send + Sync {
    /// Returns the body of a 2xx response.
    async fn fetch(&self, query: &HolidayQuery) -> Result<String, FetchError>;
}

/// Calendarific `GET /api/v2/holidays`.
pub struct CalendarificClient {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl CalendarificClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self, CoreError> {
        Self::with_base_url(api_key, DEFAULT_CALENDAR_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self, CoreError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CoreError::invalid_input("calendar.base_url", e.to_string()))?;

        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, CoreError> {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CoreError::Config(format!("Failed to build HTTP client: {}", e)))?;
        Ok(self)
    }

    pub fn from_config(config: &CalendarConfig) -> Result<Self, CoreError> {
        let api_key = config
            .api_key
            .clone()
            .ok_or_else(|| CoreError::missing_config("calendar.api_key (or CALENDARIFIC_API_KEY)"))?;

        let client = Self::with_base_url(api_key, &config.base_url)?;
        match config.timeout_secs {
            Some(secs) => client.with_timeout(Duration::from_secs(secs)),
            None => Ok(client),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl HolidayApi for CalendarificClient {
    async fn fetch(&self, query: &HolidayQuery) -> Result<String, FetchError> {
        debug!(country = %query.country, year = query.year, "Requesting holidays");

        let year = query.year.to_string();
        let response = self
            .client
            .get(self.base_url.clone())
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("country", query.country.as_str()),
                ("year", year.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.to_string()));
        }

        Ok(response.text().await?)
    }
}
