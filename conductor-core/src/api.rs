//! HTTP client for the Conductor backend.
//!
//! The backend itself (graph retrieval, intent parsing, reply generation)
//! is an external collaborator; this module only speaks its wire contract.

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::Debug;

use crate::model::{
    BusInfo, ChatRequest, ChatResponse, LocationUpdateRequest, LocationUpdateResponse,
    SessionStartRequest, SessionStartResponse, Stop,
};

/// Result of a chat call: a reply, or the server no longer knows the session.
#[derive(Debug)]
pub enum ChatOutcome {
    Reply(ChatResponse),
    Expired,
}

#[async_trait]
pub trait ConductorBackend: Send + Sync + Debug {
    async fn start_session(&self, coords: Option<(f64, f64)>) -> Result<SessionStartResponse>;

    async fn chat(&self, session_id: &str, message: &str) -> Result<ChatOutcome>;

    async fn update_location(&self, session_id: &str, lat: f64, lng: f64) -> Result<Vec<Stop>>;

    /// Best-effort map enrichment; `None` covers every failure mode.
    async fn bus_info(&self, number: &str) -> Option<BusInfo>;
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: String,
    http: Client,
}

impl HttpBackend {
    pub fn new(base_url: String) -> Self {
        Self { base_url, http: Client::new() }
    }
}

#[async_trait]
impl ConductorBackend for HttpBackend {
    async fn start_session(&self, coords: Option<(f64, f64)>) -> Result<SessionStartResponse> {
        let (latitude, longitude) = match coords {
            Some((lat, lng)) => (Some(lat), Some(lng)),
            None => (None, None),
        };

        let req = self
            .http
            .post(format!("{}/api/session/start", self.base_url))
            .json(&SessionStartRequest { latitude, longitude });

        post_json(req, "session start").await
    }

    async fn chat(&self, session_id: &str, message: &str) -> Result<ChatOutcome> {
        let res = self
            .http
            .post(format!("{}/api/chat", self.base_url))
            .json(&ChatRequest {
                session_id: session_id.to_string(),
                message: message.to_string(),
            })
            .send()
            .await
            .context("Failed to send chat request")?;

        // Not-found is the session-expiry signal, not a transport failure.
        if res.status() == StatusCode::NOT_FOUND {
            return Ok(ChatOutcome::Expired);
        }

        let status = res.status();
        let body = res.text().await.context("Failed to read chat response body")?;

        if !status.is_success() {
            return Err(anyhow!("Chat request failed with status {status}"));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).context("Failed to parse chat JSON")?;
        Ok(ChatOutcome::Reply(parsed))
    }

    async fn update_location(&self, session_id: &str, lat: f64, lng: f64) -> Result<Vec<Stop>> {
        let req = self
            .http
            .post(format!("{}/api/session/location", self.base_url))
            .json(&LocationUpdateRequest {
                session_id: session_id.to_string(),
                latitude: lat,
                longitude: lng,
            });

        let parsed: LocationUpdateResponse = post_json(req, "location update").await?;
        Ok(parsed.nearest_stops)
    }

    async fn bus_info(&self, number: &str) -> Option<BusInfo> {
        let res = self
            .http
            .get(format!("{}/api/bus/{number}", self.base_url))
            .send()
            .await
            .ok()?;

        if !res.status().is_success() {
            return None;
        }

        res.json().await.ok()
    }
}

/// Send a prepared POST, check the status and decode the JSON body.
async fn post_json<T: DeserializeOwned>(req: reqwest::RequestBuilder, what: &str) -> Result<T> {
    let res = req
        .send()
        .await
        .with_context(|| format!("Failed to send {what} request"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read {what} response body"))?;

    if !status.is_success() {
        return Err(anyhow!("{what} request failed with status {status}"));
    }

    serde_json::from_str(&body).with_context(|| format!("Failed to parse {what} JSON"))
}
