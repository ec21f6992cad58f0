//! Open-Meteo forecast and air-quality clients. Same vendor, two hosts,
//! so each client carries its own base URL.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::{AirQualityProvider, WeatherProvider, get_json};
use crate::model::{AirQuality, WeatherSnapshot};

const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,apparent_temperature,\
                              is_day,precipitation,rain,weather_code,cloud_cover,\
                              wind_speed_10m,wind_direction_10m,wind_gusts_10m,\
                              surface_pressure,visibility,uv_index";

const DAILY_FIELDS: &str = "weather_code,temperature_2m_max,temperature_2m_min,\
                            precipitation_sum,wind_speed_10m_max,uv_index_max,\
                            sunrise,sunset,daylight_duration";

const POLLUTANT_FIELDS: &str =
    "pm10,pm2_5,carbon_monoxide,nitrogen_dioxide,ozone,european_aqi,us_aqi";

#[derive(Debug, Clone)]
pub struct OpenMeteoForecast {
    base_url: String,
    forecast_days: u8,
    http: Client,
}

impl OpenMeteoForecast {
    pub fn new(base_url: String, forecast_days: u8, http: Client) -> Self {
        Self { base_url, forecast_days, http }
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoForecast {
    async fn forecast(&self, lat: f64, lon: f64, timezone: &str) -> Result<WeatherSnapshot> {
        let url = format!("{}/v1/forecast", self.base_url);

        let req = self
            .http
            .get(url)
            .query(&[("latitude", lat), ("longitude", lon)])
            .query(&[
                ("current", CURRENT_FIELDS),
                ("daily", DAILY_FIELDS),
                ("timezone", timezone),
            ])
            .query(&[("forecast_days", u16::from(self.forecast_days))]);

        get_json(req, "Open-Meteo forecast").await
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoAirQuality {
    base_url: String,
    http: Client,
}

impl OpenMeteoAirQuality {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[async_trait]
impl AirQualityProvider for OpenMeteoAirQuality {
    async fn current(&self, lat: f64, lon: f64) -> Result<AirQuality> {
        let url = format!("{}/v1/air-quality", self.base_url);

        let req = self
            .http
            .get(url)
            .query(&[("latitude", lat), ("longitude", lon)])
            .query(&[("current", POLLUTANT_FIELDS)]);

        get_json(req, "Open-Meteo air quality").await
    }
}
