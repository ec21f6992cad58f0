//! The chat/session state machine.
//!
//! One session at a time: `NoSession` until [`Conductor::start`] succeeds,
//! then `Active(session_id)`. A chat call answered with the expiry signal is
//! recovered by exactly one silent session restart plus one replay of the
//! same message; a second expiry is surfaced as a transport-class error.
//! Transport failures never change session state.

use crate::{
    api::{ChatOutcome, ConductorBackend},
    error::ConductorError,
    map::{MapView, StopMarker},
    model::{ChatResponse, Stop},
};
use anyhow::anyhow;

/// Suggestion chips offered after the greeting.
pub const SUGGESTIONS: [&str; 3] =
    ["Yaxınlıqda dayanacaq var?", "65 nömrəli avtobus", "28 Maya necə gedim?"];

const ROUTE_FIND_INTENT: &str = "route_find";

pub struct Conductor {
    backend: Box<dyn ConductorBackend>,
    session_id: Option<String>,
    latitude: Option<f64>,
    longitude: Option<f64>,
    nearest_stops: Vec<Stop>,
    map: MapView,
}

impl Conductor {
    pub fn new(backend: Box<dyn ConductorBackend>) -> Self {
        Self {
            backend,
            session_id: None,
            latitude: None,
            longitude: None,
            nearest_stops: Vec::new(),
            map: MapView::default(),
        }
    }

    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    pub fn nearest_stops(&self) -> &[Stop] {
        &self.nearest_stops
    }

    pub fn map(&self) -> &MapView {
        &self.map
    }

    fn coords(&self) -> Option<(f64, f64)> {
        self.latitude.zip(self.longitude)
    }

    /// Start (or restart) a session; returns the server greeting.
    pub async fn start(&mut self, coords: Option<(f64, f64)>) -> Result<String, ConductorError> {
        if let Some((lat, lng)) = coords {
            self.latitude = Some(lat);
            self.longitude = Some(lng);
            self.map.set_user_location(lat, lng);
        }

        let res = self.backend.start_session(self.coords()).await?;

        self.session_id = Some(res.session_id);
        self.nearest_stops = res.nearest_stops;
        self.map.show_stops(self.nearest_stops.iter().map(StopMarker::from).collect());

        Ok(res.greeting)
    }

    /// Post one user message and return the reply, keeping the map in sync
    /// with any route data it carries.
    pub async fn send(&mut self, message: &str) -> Result<ChatResponse, ConductorError> {
        let session_id = self.session_id.clone().ok_or(ConductorError::NoSession)?;

        let reply = match self.backend.chat(&session_id, message).await? {
            ChatOutcome::Reply(reply) => reply,
            ChatOutcome::Expired => {
                // One silent restart with the last known coordinates, then
                // one resend of the unchanged message. Never a second loop.
                tracing::debug!("session expired, restarting and replaying once");
                let coords = self.coords();
                self.start(coords).await?;

                let replay_id = self.session_id.clone().ok_or(ConductorError::NoSession)?;
                match self.backend.chat(&replay_id, message).await? {
                    ChatOutcome::Reply(reply) => reply,
                    ChatOutcome::Expired => {
                        return Err(ConductorError::Transport(anyhow!(
                            "session expired again after replay"
                        )));
                    }
                }
            }
        };

        self.apply_route_data(&reply).await;

        Ok(reply)
    }

    /// Record a fresh device location, recenter the map and — when a session
    /// is active — push the coordinates to the server and refresh the
    /// nearest-stops overlay.
    pub async fn update_location(&mut self, lat: f64, lng: f64) -> Result<(), ConductorError> {
        self.latitude = Some(lat);
        self.longitude = Some(lng);
        self.map.set_user_location(lat, lng);

        if let Some(session_id) = self.session_id.clone() {
            let stops = self.backend.update_location(&session_id, lat, lng).await?;
            self.nearest_stops = stops;
            self.map.show_stops(self.nearest_stops.iter().map(StopMarker::from).collect());
        }

        Ok(())
    }

    /// Sync the map with route data from a reply. When the reply found a
    /// route for a specific bus, fetch that bus's stop list purely to enrich
    /// the map; this lookup is cosmetic and its failure is ignored.
    async fn apply_route_data(&mut self, reply: &ChatResponse) {
        if reply.routes.is_empty() {
            return;
        }

        let points: Vec<StopMarker> = reply
            .routes
            .iter()
            .filter_map(|route| {
                let (lat, lng) = route.latitude.zip(route.longitude)?;
                Some(StopMarker {
                    name: route.name.clone().unwrap_or_default(),
                    latitude: lat,
                    longitude: lng,
                    distance_meters: None,
                })
            })
            .collect();
        self.map.show_stops(points);

        if reply.intent.as_deref() != Some(ROUTE_FIND_INTENT) {
            return;
        }

        let first = &reply.routes[0];
        let Some(number) = first.bus_number.as_deref().or(first.bus1_number.as_deref()) else {
            return;
        };

        if let Some(info) = self.backend.bus_info(number).await {
            self.map.show_stops(info.stops.iter().map(StopMarker::from).collect());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BusInfo, BusStop, SessionStartResponse};
    use anyhow::Result;
    use async_trait::async_trait;
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    /// Backend fake with a scripted queue of chat outcomes and call records.
    #[derive(Debug, Clone, Default)]
    struct ScriptedBackend {
        chat_script: Arc<Mutex<VecDeque<ChatOutcome>>>,
        chat_calls: Arc<Mutex<Vec<(String, String)>>>,
        start_calls: Arc<Mutex<Vec<Option<(f64, f64)>>>>,
        location_calls: Arc<Mutex<Vec<(String, f64, f64)>>>,
        bus_calls: Arc<Mutex<Vec<String>>>,
        bus_stops: Arc<Mutex<Option<Vec<BusStop>>>>,
        stops_on_start: Arc<Mutex<Vec<Stop>>>,
    }

    impl ScriptedBackend {
        fn script_chat(&self, outcomes: Vec<ChatOutcome>) {
            *self.chat_script.lock().unwrap() = outcomes.into();
        }

        fn reply(text: &str) -> ChatOutcome {
            ChatOutcome::Reply(ChatResponse {
                reply: text.to_string(),
                intent: None,
                routes: Vec::new(),
            })
        }
    }

    #[async_trait]
    impl ConductorBackend for ScriptedBackend {
        async fn start_session(&self, coords: Option<(f64, f64)>) -> Result<SessionStartResponse> {
            let mut calls = self.start_calls.lock().unwrap();
            calls.push(coords);
            Ok(SessionStartResponse {
                session_id: format!("s{}", calls.len()),
                greeting: "Salam!".to_string(),
                nearest_stops: self.stops_on_start.lock().unwrap().clone(),
            })
        }

        async fn chat(&self, session_id: &str, message: &str) -> Result<ChatOutcome> {
            self.chat_calls.lock().unwrap().push((session_id.to_string(), message.to_string()));
            Ok(self
                .chat_script
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Self::reply("ok")))
        }

        async fn update_location(&self, session_id: &str, lat: f64, lng: f64) -> Result<Vec<Stop>> {
            self.location_calls.lock().unwrap().push((session_id.to_string(), lat, lng));
            Ok(vec![Stop {
                name: "İçərişəhər".to_string(),
                latitude: lat + 0.001,
                longitude: lng + 0.001,
                distance_meters: Some(120.0),
            }])
        }

        async fn bus_info(&self, number: &str) -> Option<BusInfo> {
            self.bus_calls.lock().unwrap().push(number.to_string());
            self.bus_stops.lock().unwrap().clone().map(|stops| BusInfo { stops })
        }
    }

    fn conductor(backend: &ScriptedBackend) -> Conductor {
        Conductor::new(Box::new(backend.clone()))
    }

    #[tokio::test]
    async fn sending_without_a_session_is_rejected() {
        let backend = ScriptedBackend::default();
        let mut conductor = conductor(&backend);

        let err = conductor.send("salam").await.unwrap_err();
        assert!(matches!(err, ConductorError::NoSession));
        assert!(backend.chat_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn start_stores_session_and_syncs_the_map() {
        let backend = ScriptedBackend::default();
        *backend.stops_on_start.lock().unwrap() = vec![Stop {
            name: "28 May".to_string(),
            latitude: 40.3791,
            longitude: 49.8468,
            distance_meters: Some(80.0),
        }];
        let mut conductor = conductor(&backend);

        let greeting = conductor.start(Some((40.4093, 49.8671))).await.expect("start");

        assert_eq!(greeting, "Salam!");
        assert_eq!(conductor.session_id(), Some("s1"));
        assert_eq!(conductor.map().user_location(), Some((40.4093, 49.8671)));
        assert_eq!(conductor.map().markers().len(), 1);
        assert_eq!(
            backend.start_calls.lock().unwrap().as_slice(),
            [Some((40.4093, 49.8671))]
        );
    }

    #[tokio::test]
    async fn expiry_triggers_exactly_one_restart_and_one_replay() {
        let backend = ScriptedBackend::default();
        backend.script_chat(vec![ChatOutcome::Expired, ScriptedBackend::reply("cavab")]);
        let mut conductor = conductor(&backend);
        conductor.start(Some((40.4093, 49.8671))).await.expect("start");

        let reply = conductor.send("65 nömrəli avtobus").await.expect("replay should succeed");

        assert_eq!(reply.reply, "cavab");
        // Initial start plus exactly one silent restart, replaying the last
        // known coordinates.
        assert_eq!(
            backend.start_calls.lock().unwrap().as_slice(),
            [Some((40.4093, 49.8671)), Some((40.4093, 49.8671))]
        );
        // The message text is unchanged between the two chat calls.
        assert_eq!(
            backend.chat_calls.lock().unwrap().as_slice(),
            [
                ("s1".to_string(), "65 nömrəli avtobus".to_string()),
                ("s2".to_string(), "65 nömrəli avtobus".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn a_second_expiry_fails_without_another_replay() {
        let backend = ScriptedBackend::default();
        backend.script_chat(vec![ChatOutcome::Expired, ChatOutcome::Expired]);
        let mut conductor = conductor(&backend);
        conductor.start(None).await.expect("start");

        let err = conductor.send("salam").await.unwrap_err();

        assert!(matches!(err, ConductorError::Transport(_)));
        assert_eq!(backend.chat_calls.lock().unwrap().len(), 2);
        assert_eq!(backend.start_calls.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn route_replies_update_the_map() {
        let backend = ScriptedBackend::default();
        backend.script_chat(vec![ChatOutcome::Reply(
            serde_json::from_str(
                r#"{"reply":"Bu dayanacaqlar yaxındır","routes":[
                    {"name":"Nizami","latitude":40.3725,"longitude":49.8533},
                    {"name":"Sahil","latitude":40.3717,"longitude":49.8442}]}"#,
            )
            .expect("reply json"),
        )]);
        let mut conductor = conductor(&backend);
        conductor.start(None).await.expect("start");

        conductor.send("Yaxınlıqda dayanacaq var?").await.expect("send");

        let names: Vec<&str> = conductor.map().markers().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Nizami", "Sahil"]);
        assert!(backend.bus_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn route_find_enriches_the_map_from_bus_info() {
        let backend = ScriptedBackend::default();
        *backend.bus_stops.lock().unwrap() = Some(vec![
            BusStop { latitude: 40.40, longitude: 49.85, stop_name: "Gənclik".to_string() },
            BusStop { latitude: 40.41, longitude: 49.86, stop_name: "Nərimanov".to_string() },
        ]);
        backend.script_chat(vec![ChatOutcome::Reply(
            serde_json::from_str(
                r#"{"reply":"65 ilə gedin","intent":"route_find",
                    "routes":[{"busNumber":"65"}]}"#,
            )
            .expect("reply json"),
        )]);
        let mut conductor = conductor(&backend);
        conductor.start(None).await.expect("start");

        conductor.send("28 Maya necə gedim?").await.expect("send");

        assert_eq!(backend.bus_calls.lock().unwrap().as_slice(), ["65"]);
        let names: Vec<&str> = conductor.map().markers().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["Gənclik", "Nərimanov"]);
    }

    #[tokio::test]
    async fn failed_bus_enrichment_is_silent() {
        let backend = ScriptedBackend::default();
        // bus_stops stays None: every bus_info call fails.
        backend.script_chat(vec![ChatOutcome::Reply(
            serde_json::from_str(
                r#"{"reply":"65 ilə gedin","intent":"route_find",
                    "routes":[{"busNumber":"65"}]}"#,
            )
            .expect("reply json"),
        )]);
        let mut conductor = conductor(&backend);
        conductor.start(None).await.expect("start");

        let reply = conductor.send("28 Maya necə gedim?").await.expect("reply must survive");

        assert_eq!(reply.reply, "65 ilə gedin");
        assert_eq!(backend.bus_calls.lock().unwrap().as_slice(), ["65"]);
        assert!(conductor.map().markers().is_empty());
    }

    #[tokio::test]
    async fn location_update_without_a_session_stays_local() {
        let backend = ScriptedBackend::default();
        let mut conductor = conductor(&backend);

        conductor.update_location(40.40, 49.85).await.expect("local update");

        assert_eq!(conductor.map().user_location(), Some((40.40, 49.85)));
        assert!(backend.location_calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn location_update_with_a_session_refreshes_the_overlay() {
        let backend = ScriptedBackend::default();
        let mut conductor = conductor(&backend);
        conductor.start(None).await.expect("start");

        conductor.update_location(40.40, 49.85).await.expect("update");

        assert_eq!(
            backend.location_calls.lock().unwrap().as_slice(),
            [("s1".to_string(), 40.40, 49.85)]
        );
        assert_eq!(conductor.nearest_stops().len(), 1);
        assert_eq!(conductor.map().markers()[0].name, "İçərişəhər");
    }
}
