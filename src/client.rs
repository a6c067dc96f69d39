//! This module provides sources of public holidays: a client to the public holiday API, and a mocked source

use std::collections::HashMap;
use std::error::Error;
use std::sync::Mutex;

use async_trait::async_trait;
use url::Url;

use crate::config;
use crate::holiday::{parse_holidays, Holiday};
use crate::mock_behaviour::MockBehaviour;
use crate::traits::HolidaySource;


/// A holiday source that fetches its data from the public holiday API
pub struct HolidayClient {
    api_url: Url,
    country_code: String,
    http: reqwest::Client,
}

impl HolidayClient {
    /// Create a client for the API URL and country set in the [`config`](crate::config). This does not start a connection
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let api_url = config::read_setting(&config::HOLIDAY_API_URL);
        let country_code = config::read_setting(&config::HOLIDAY_COUNTRY_CODE);
        Self::with_endpoint(api_url, country_code)
    }

    /// Create a client for a custom API URL and country. This does not start a connection
    pub fn with_endpoint<S: AsRef<str>, T: ToString>(api_url: S, country_code: T) -> Result<Self, Box<dyn Error>> {
        let api_url = Url::parse(api_url.as_ref())?;
        if api_url.cannot_be_a_base() {
            return Err(format!("Invalid holiday API URL {}", api_url).into());
        }

        Ok(Self{
            api_url,
            country_code: country_code.to_string(),
            http: reqwest::Client::new(),
        })
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// The URL that lists the holidays of a given year
    pub fn url_for_year(&self, year: i32) -> Result<Url, Box<dyn Error>> {
        let mut url = self.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| format!("Invalid holiday API URL {}", self.api_url))?
            .pop_if_empty()
            .push(&year.to_string())
            .push(&self.country_code);
        Ok(url)
    }
}

#[async_trait]
impl HolidaySource for HolidayClient {
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<Holiday>, Box<dyn Error>> {
        let url = self.url_for_year(year)?;
        log::debug!("Fetching holidays for {} from {}", year, url);

        let res = self.http
            .get(url.as_str())
            .send()
            .await?;
        if res.status().is_success() == false {
            return Err(format!("Unable to fetch holidays from {}: HTTP {}", url, res.status()).into());
        }
        let text = res.text().await?;

        let holidays = parse_holidays(&text)?;
        log::info!("Fetched {} holidays for {} ({})", holidays.len(), year, self.country_code);
        Ok(holidays)
    }
}


/// A holiday source that serves in-memory holidays, and can be told to fail
#[derive(Debug, Default)]
pub struct MockHolidaySource {
    holidays: HashMap<i32, Vec<Holiday>>,
    mock_behaviour: Mutex<MockBehaviour>,
}

impl MockHolidaySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behaviour(behaviour: MockBehaviour) -> Self {
        Self { holidays: HashMap::new(), mock_behaviour: Mutex::new(behaviour) }
    }

    /// Serve this holiday for its year. Holidays with an invalid date are served for no year
    pub fn add_holiday(&mut self, holiday: Holiday) {
        match holiday.date.parse::<crate::DayId>() {
            Ok(day) => self.holidays.entry(day.year()).or_default().push(holiday),
            Err(err) => log::warn!("Not serving holiday {:?}: {}", holiday.name, err),
        }
    }
}

#[async_trait]
impl HolidaySource for MockHolidaySource {
    async fn fetch_holidays(&self, year: i32) -> Result<Vec<Holiday>, Box<dyn Error>> {
        self.mock_behaviour
            .lock()
            .map_err(|_| "Mock behaviour lock is poisoned")?
            .can_fetch_holidays()?;
        Ok(self.holidays.get(&year).cloned().unwrap_or_default())
    }
}
