//! The aggregation pipeline behind `GET /api/all`.
//!
//! Strictly sequential up to geolocation (each step feeds the next), then a
//! concurrent fan-out to weather, air quality and country, awaited together.
//! All-or-nothing: a failure anywhere fails the whole request; partial
//! dashboards are never produced.

use reqwest::Client;

use crate::{
    config::Config,
    error::AggregateError,
    ip,
    model::{Dashboard, IpInfo},
    upstream::{
        AirQualityProvider, CountryProvider, GeoProvider, IpEchoProvider, WeatherProvider,
        ipapi::IpApiClient, ipify::IpifyClient,
        openmeteo::{OpenMeteoAirQuality, OpenMeteoForecast},
        restcountries::RestCountriesClient,
    },
};

pub struct Aggregator {
    ip_echo: Box<dyn IpEchoProvider>,
    geo: Box<dyn GeoProvider>,
    weather: Box<dyn WeatherProvider>,
    air_quality: Box<dyn AirQualityProvider>,
    country: Box<dyn CountryProvider>,
    fallback_ip: String,
}

impl Aggregator {
    pub fn new(
        ip_echo: Box<dyn IpEchoProvider>,
        geo: Box<dyn GeoProvider>,
        weather: Box<dyn WeatherProvider>,
        air_quality: Box<dyn AirQualityProvider>,
        country: Box<dyn CountryProvider>,
        fallback_ip: String,
    ) -> Self {
        Self { ip_echo, geo, weather, air_quality, country, fallback_ip }
    }

    /// Wire up the real upstream clients, sharing one HTTP connection pool.
    pub fn from_config(config: &Config) -> Self {
        let http = Client::new();
        let up = &config.upstreams;

        Self::new(
            Box::new(IpifyClient::new(up.ip_echo_url.clone(), http.clone())),
            Box::new(IpApiClient::new(up.geo_url.clone(), http.clone())),
            Box::new(OpenMeteoForecast::new(
                up.weather_url.clone(),
                up.forecast_days,
                http.clone(),
            )),
            Box::new(OpenMeteoAirQuality::new(up.air_quality_url.clone(), http.clone())),
            Box::new(RestCountriesClient::new(up.country_url.clone(), http)),
            up.fallback_ip.clone(),
        )
    }

    /// Produce one dashboard for a request carrying the given client headers.
    pub async fn dashboard(
        &self,
        forwarded_for: Option<&str>,
        real_ip: Option<&str>,
    ) -> Result<Dashboard, AggregateError> {
        let header_ip = ip::client_ip(forwarded_for, real_ip, &self.fallback_ip);

        let ip = if ip::needs_public_lookup(header_ip) {
            tracing::debug!(%header_ip, "address not geolocatable, asking IP echo service");
            self.ip_echo.public_ip().await?
        } else {
            header_ip.to_string()
        };

        let geo = self.geo.locate(&ip).await?;
        if !geo.is_success() {
            let message = geo.message.unwrap_or_else(|| "unknown reason".to_string());
            tracing::warn!(%ip, %message, "geolocation rejected");
            return Err(AggregateError::GeolocationRejected { message });
        }

        tracing::debug!(city = %geo.city, country = %geo.country_code, "geolocation resolved");

        // Fan out keyed by exactly the fields geolocation returned.
        let (weather, air_quality, country) = tokio::try_join!(
            self.weather.forecast(geo.lat, geo.lon, &geo.timezone),
            self.air_quality.current(geo.lat, geo.lon),
            self.country.profile(&geo.country_code),
        )?;

        Ok(Dashboard { ip: IpInfo { ip }, geo, weather, air_quality, country })
    }
}
