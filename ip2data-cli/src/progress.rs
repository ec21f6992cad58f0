//! Cosmetic staged-progress state machine.
//!
//! One real request is in flight; the user sees progress through a fixed
//! label sequence advanced by a timer the caller owns. The labels do not
//! track real progress. The contract that matters: once the request
//! settles, ticks must stop moving the display.

pub const LOAD_STAGES: [&str; 5] = [
    "Detecting your IP address...",
    "Fetching geolocation data...",
    "Loading weather & air quality...",
    "Gathering country information...",
    "Building your dashboard...",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Done,
    Failed(String),
}

#[derive(Debug)]
pub struct StageController {
    index: usize,
    state: LoadState,
}

impl StageController {
    pub fn new() -> Self {
        Self { index: 0, state: LoadState::Loading }
    }

    pub fn label(&self) -> &'static str {
        LOAD_STAGES[self.index]
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    /// Advance one stage, capped at the last label. No-op once settled.
    pub fn tick(&mut self) {
        if self.state == LoadState::Loading {
            self.index = (self.index + 1).min(LOAD_STAGES.len() - 1);
        }
    }

    /// The request succeeded: force the final label and stop advancing.
    pub fn finish(&mut self) {
        self.index = LOAD_STAGES.len() - 1;
        self.state = LoadState::Done;
    }

    /// The request failed: capture the message and stop advancing.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.state = LoadState::Failed(message.into());
    }
}

impl Default for StageController {
    fn default() -> Self {
        Self::new()
    }
}
