use super::api::{CalendarificClient, HolidayApi};
use super::error::LookupError;
use super::listing::HolidayListing;
use super::query::HolidayQuery;
use holiday_core::config::{CalendarConfig, DEFAULT_MAX_YEAR};
use holiday_core::{Clock, Error as CoreError, SystemClock};
use std::sync::Arc;
use tracing::{debug, warn};

/// Turns `"CC[,YYYY]"` into a rendered holiday list, or into an error
/// sentence. No retries and no caching: every lookup that passes input
/// validation makes exactly one API call.
pub struct HolidayLookup {
    api: Arc<dyn HolidayApi>,
    clock: Arc<dyn Clock>,
    max_year: i32,
}

impl HolidayLookup {
    pub fn new(api: Arc<dyn HolidayApi>) -> Self {
        Self {
            api,
            clock: Arc::new(SystemClock),
            max_year: DEFAULT_MAX_YEAR,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_max_year(mut self, max_year: i32) -> Self {
        self.max_year = max_year;
        self
    }

    pub fn from_config(config: &CalendarConfig) -> Result<Self, CoreError> {
        let client = CalendarificClient::from_config(config)?;
        Ok(Self::new(Arc::new(client)).with_max_year(config.max_year))
    }

    pub fn max_year(&self) -> i32 {
        self.max_year
    }

    pub fn parse_query(&self, input: &str) -> Result<HolidayQuery, LookupError> {
        let query = HolidayQuery::parse(input, self.clock.as_ref())?;
        if query.year > self.max_year {
            return Err(LookupError::YearOutOfRange {
                year: query.year,
                max_year: self.max_year,
            });
        }
        Ok(query)
    }

    pub async fn listing(&self, input: &str) -> Result<HolidayListing, LookupError> {
        let query = self.parse_query(input)?;
        let body = self.api.fetch(&query).await?;
        let listing = HolidayListing::from_response_body(&body, &query)?;

        debug!(
            country = %listing.country,
            year = listing.year,
            holidays = listing.len(),
            "Holiday lookup completed"
        );

        Ok(listing)
    }

    /// Never fails: errors come back as their message text.
    pub async fn lookup(&self, input: &str) -> String {
        match self.listing(input).await {
            Ok(listing) => listing.render(),
            Err(e) => {
                warn!(input = input, error = %e, "Holiday lookup failed");
                e.to_string()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod mock {
    use super::*;
    use crate::holidays::error::FetchError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Replays one canned result and records every query it receives.
    pub struct MockApi {
        response: Result<String, FetchError>,
        pub calls: Mutex<Vec<HolidayQuery>>,
    }

    impl MockApi {
        pub fn ok(body: &str) -> Self {
            Self {
                response: Ok(body.to_string()),
                calls: Mutex::new(vec![]),
            }
        }

        pub fn failing(err: FetchError) -> Self {
            Self {
                response: Err(err),
                calls: Mutex::new(vec![]),
            }
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl HolidayApi for MockApi {
        async fn fetch(&self, query: &HolidayQuery) -> Result<String, FetchError> {
            self.calls.lock().unwrap().push(query.clone());
            self.response.clone()
        }
    }

    pub const CHRISTMAS: &str = r#"{"meta":{"code":200},"response":{"holidays":[{"name":"Christmas","date":{"iso":"2024-12-25"}}]}}"#;
}
