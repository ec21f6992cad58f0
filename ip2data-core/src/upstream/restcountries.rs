use anyhow::{Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{CountryProvider, get_json};
use crate::model::CountryProfile;

const COUNTRY_FIELDS: &str =
    "name,capital,population,area,currencies,languages,flags,timezones,region,subregion";

#[derive(Debug, Clone)]
pub struct RestCountriesClient {
    base_url: String,
    http: Client,
}

impl RestCountriesClient {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

/// REST Countries answers `/alpha/{code}` with a bare object for some codes
/// and a one-element array for others; both shapes must collapse to one
/// profile.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CountryResponse {
    One(Box<CountryProfile>),
    Many(Vec<CountryProfile>),
}

fn normalize(res: CountryResponse) -> Result<CountryProfile> {
    match res {
        CountryResponse::One(profile) => Ok(*profile),
        CountryResponse::Many(mut list) => {
            if list.is_empty() {
                return Err(anyhow!("REST Countries returned an empty list"));
            }
            Ok(list.swap_remove(0))
        }
    }
}

#[async_trait]
impl CountryProvider for RestCountriesClient {
    async fn profile(&self, country_code: &str) -> Result<CountryProfile> {
        let url = format!("{}/v3.1/alpha/{country_code}", self.base_url);

        let req = self.http.get(url).query(&[("fields", COUNTRY_FIELDS)]);

        let parsed: CountryResponse = get_json(req, "REST Countries").await?;
        normalize(parsed)
    }
}
