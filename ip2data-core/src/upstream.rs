//! Clients for the third-party services the dashboard aggregates.
//!
//! One trait per upstream concern so the aggregator can be exercised with
//! scripted fakes; the `reqwest`-backed implementations live in the
//! submodules and take their base URL from [`crate::config::UpstreamConfig`].

use anyhow::{Context, Result, anyhow};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::model::{AirQuality, CountryProfile, GeoLocation, WeatherSnapshot};
use async_trait::async_trait;

pub mod ipapi;
pub mod ipify;
pub mod openmeteo;
pub mod restcountries;

/// Echoes the caller's public IP; consulted only when the request headers
/// expose a private or loopback address.
#[async_trait]
pub trait IpEchoProvider: Send + Sync + Debug {
    async fn public_ip(&self) -> Result<String>;
}

/// Maps an IP to city/region/coordinates/timezone/ISP info.
///
/// Implementations return the decoded record even when its `status` is not
/// "success"; judging that status is the aggregator's job, so the rejection
/// message stays distinguishable from transport failures.
#[async_trait]
pub trait GeoProvider: Send + Sync + Debug {
    async fn locate(&self, ip: &str) -> Result<GeoLocation>;
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn forecast(&self, lat: f64, lon: f64, timezone: &str) -> Result<WeatherSnapshot>;
}

#[async_trait]
pub trait AirQualityProvider: Send + Sync + Debug {
    async fn current(&self, lat: f64, lon: f64) -> Result<AirQuality>;
}

#[async_trait]
pub trait CountryProvider: Send + Sync + Debug {
    async fn profile(&self, country_code: &str) -> Result<CountryProfile>;
}

/// Send a prepared GET, check the status and decode the JSON body.
/// `what` names the upstream in every error message.
pub(crate) async fn get_json<T: DeserializeOwned>(
    req: reqwest::RequestBuilder,
    what: &str,
) -> Result<T> {
    let res = req
        .send()
        .await
        .with_context(|| format!("Failed to send request to {what}"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {what} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "{what} request failed with status {status}: {}",
            truncate_body(&body),
        ));
    }

    serde_json::from_str(&body).with_context(|| format!("Failed to parse {what} JSON"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_bodies_intact() {
        assert_eq!(truncate_body("oops"), "oops");
    }

    #[test]
    fn truncate_caps_long_bodies() {
        let long = "x".repeat(500);
        let out = truncate_body(&long);
        assert_eq!(out.len(), 203);
        assert!(out.ends_with("..."));
    }
}
