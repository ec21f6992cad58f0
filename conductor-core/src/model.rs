//! Wire shapes of the Conductor backend API.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct SessionStartRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionStartResponse {
    pub session_id: String,
    pub greeting: String,
    #[serde(default)]
    pub nearest_stops: Vec<Stop>,
}

/// A bus stop near the user, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Stop {
    #[serde(default)]
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "distanceMeters", default)]
    pub distance_meters: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub session_id: String,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default)]
    pub intent: Option<String>,
    #[serde(default)]
    pub routes: Vec<RoutePoint>,
}

/// Loosely-shaped route entry attached to a chat reply. Bus-info answers
/// carry coordinates; route-find answers carry bus numbers (one leg or two).
#[derive(Debug, Clone, Deserialize)]
pub struct RoutePoint {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(rename = "busNumber", default)]
    pub bus_number: Option<String>,
    #[serde(rename = "bus1Number", default)]
    pub bus1_number: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationUpdateRequest {
    pub session_id: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationUpdateResponse {
    #[serde(default)]
    pub nearest_stops: Vec<Stop>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusInfo {
    #[serde(default)]
    pub stops: Vec<BusStop>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BusStop {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "stopName", default)]
    pub stop_name: String,
}
