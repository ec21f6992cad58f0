use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;

use super::{GeoProvider, get_json};
use crate::model::GeoLocation;

/// Field list requested from ip-api.com; `status` and `message` ride along
/// so rejections carry the upstream's own explanation.
const GEO_FIELDS: &str = "status,message,country,countryCode,region,regionName,\
                          city,zip,lat,lon,timezone,isp,org,as,query";

#[derive(Debug, Clone)]
pub struct IpApiClient {
    base_url: String,
    http: Client,
}

impl IpApiClient {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[async_trait]
impl GeoProvider for IpApiClient {
    async fn locate(&self, ip: &str) -> Result<GeoLocation> {
        let url = format!("{}/json/{ip}", self.base_url);

        let req = self.http.get(url).query(&[("fields", GEO_FIELDS)]);

        get_json(req, "ip-api").await
    }
}
