use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::{IpEchoProvider, get_json};

/// ipify.org client: one endpoint, one field, no key.
#[derive(Debug, Clone)]
pub struct IpifyClient {
    base_url: String,
    http: Client,
}

impl IpifyClient {
    pub fn new(base_url: String, http: Client) -> Self {
        Self { base_url, http }
    }
}

#[derive(Debug, Deserialize)]
struct IpifyResponse {
    ip: String,
}

#[async_trait]
impl IpEchoProvider for IpifyClient {
    async fn public_ip(&self) -> Result<String> {
        let req = self.http.get(&self.base_url).query(&[("format", "json")]);

        let parsed: IpifyResponse = get_json(req, "ipify").await?;
        Ok(parsed.ip)
    }
}
