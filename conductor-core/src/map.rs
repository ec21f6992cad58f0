//! Map state: user position and stop markers.
//!
//! This is the data half of the map widget; drawing it is the frontend's
//! concern. The chat client keeps this in sync with session starts, chat
//! replies carrying route data, and location updates.

use crate::model::{BusStop, Stop};

#[derive(Debug, Clone, PartialEq)]
pub struct StopMarker {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub distance_meters: Option<f64>,
}

impl From<&Stop> for StopMarker {
    fn from(stop: &Stop) -> Self {
        Self {
            name: stop.name.clone(),
            latitude: stop.latitude,
            longitude: stop.longitude,
            distance_meters: stop.distance_meters,
        }
    }
}

impl From<&BusStop> for StopMarker {
    fn from(stop: &BusStop) -> Self {
        Self {
            name: stop.stop_name.clone(),
            latitude: stop.latitude,
            longitude: stop.longitude,
            distance_meters: None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapView {
    user: Option<(f64, f64)>,
    markers: Vec<StopMarker>,
}

impl MapView {
    pub fn set_user_location(&mut self, lat: f64, lng: f64) {
        self.user = Some((lat, lng));
    }

    pub fn user_location(&self) -> Option<(f64, f64)> {
        self.user
    }

    /// Replace the stop overlay. An empty set leaves the current overlay
    /// alone, mirroring how the map ignores empty route data.
    pub fn show_stops(&mut self, markers: Vec<StopMarker>) {
        if markers.is_empty() {
            return;
        }
        self.markers = markers;
    }

    pub fn markers(&self) -> &[StopMarker] {
        &self.markers
    }

    /// South-west / north-east corners covering all markers and the user
    /// position, for fitting the viewport.
    pub fn bounds(&self) -> Option<((f64, f64), (f64, f64))> {
        let mut points: Vec<(f64, f64)> =
            self.markers.iter().map(|m| (m.latitude, m.longitude)).collect();
        if let Some(user) = self.user {
            points.push(user);
        }

        let first = *points.first()?;
        let mut min = first;
        let mut max = first;
        for (lat, lng) in points {
            min = (min.0.min(lat), min.1.min(lng));
            max = (max.0.max(lat), max.1.max(lng));
        }
        Some((min, max))
    }
}
