use anyhow::Result;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};

use crate::command_interpreter::{self, CommandResult};
use crate::destination_resolver::DestinationResolver;
use crate::narration;
use crate::route_synthesizer::{RouteResult, RouteSynthesizer};
use crate::utils::Coordinate;

// Coimbatore. Only a seed until the first location fix arrives.
pub const DEFAULT_POSITION: Coordinate = Coordinate::new(11.0168, 76.9558);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Display, AsRefStr)]
pub enum SessionState {
    Idle,
    Listening,
    Speaking,
    // the listening capability is missing, voice input stays disabled
    Error,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum EngineEvent {
    RouteReady {
        destination: String,
        coordinates: Coordinate,
        route: RouteResult,
    },
    TriggerEmergency,
    PromptRetry {
        message: String,
    },
}

/// What the caller should do with its listening capability after a toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListeningAction {
    Start,
    Stop,
    Unavailable,
}

pub struct NavigationSession {
    current_position: Coordinate,
    destination: Option<String>,
    state: SessionState,
    status: String,
    resolver: DestinationResolver,
    synthesizer: RouteSynthesizer,
}

impl NavigationSession {
    pub fn new() -> Self {
        Self::with_parts(DEFAULT_POSITION, DestinationResolver::new(), RouteSynthesizer::new())
    }

    pub fn with_parts(
        position: Coordinate,
        resolver: DestinationResolver,
        synthesizer: RouteSynthesizer,
    ) -> Self {
        NavigationSession {
            current_position: position,
            destination: None,
            state: SessionState::Idle,
            status: String::new(),
            resolver,
            synthesizer,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_position(&self) -> Coordinate {
        self.current_position
    }

    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    fn set_status(&mut self, message: String) {
        info!("Status: {message}");
        self.status = message;
    }

    pub fn handle_utterance(&mut self, text: &str) -> EngineEvent {
        match command_interpreter::interpret(text) {
            CommandResult::Navigate { destination } => self.route_to(destination),
            CommandResult::Emergency => {
                warn!("emergency requested by voice command");
                EngineEvent::TriggerEmergency
            }
            CommandResult::Rejected => {
                debug!("rejected command: {text:?}");
                EngineEvent::PromptRetry {
                    message: narration::RETRY_PROMPT.to_string(),
                }
            }
        }
    }

    // Typed destinations skip the command phrases and are used as-is.
    pub fn request_route(&mut self, destination: &str) -> EngineEvent {
        if destination.trim().is_empty() {
            return EngineEvent::PromptRetry {
                message: narration::EMPTY_DESTINATION_PROMPT.to_string(),
            };
        }
        self.route_to(destination.to_string())
    }

    fn route_to(&mut self, destination: String) -> EngineEvent {
        self.set_status(narration::calculating_route_to(&destination));
        let origin = self.current_position;
        let coordinates = self.resolver.resolve(&destination, &origin);
        let route = self.synthesizer.synthesize(&origin, &coordinates, &destination);
        info!(
            "route to {destination:?} ({:?}): {:.0} m, {:.0} s",
            DestinationResolver::known_place(&destination),
            route.total_distance_meters,
            route.total_duration_seconds
        );
        self.destination = Some(destination.clone());
        EngineEvent::RouteReady {
            destination,
            coordinates,
            route,
        }
    }

    pub fn set_current_position(&mut self, coordinate: Coordinate) {
        self.current_position = coordinate;
    }

    // A failed fix keeps whatever position we already had.
    pub fn on_location_result(&mut self, result: Result<Coordinate>) -> &str {
        match result {
            Ok(coordinate) => {
                self.set_current_position(coordinate);
                self.set_status(narration::STATUS_LOCATION_FOUND.to_string());
            }
            Err(e) => {
                info!("location unavailable: {e}");
                self.set_status(narration::STATUS_DEFAULT_LOCATION.to_string());
            }
        }
        &self.status
    }

    pub fn toggle_listening(&mut self, available: bool) -> ListeningAction {
        if !available {
            self.state = SessionState::Error;
            return ListeningAction::Unavailable;
        }
        match self.state {
            SessionState::Listening => ListeningAction::Stop,
            _ => ListeningAction::Start,
        }
    }

    pub fn on_listening_started(&mut self) {
        if self.state == SessionState::Listening {
            return;
        }
        self.state = SessionState::Listening;
        self.set_status(narration::STATUS_LISTENING.to_string());
    }

    pub fn on_transcript(&mut self, transcript: &str) -> EngineEvent {
        let transcript = transcript.trim();
        self.state = SessionState::Idle;
        self.set_status(narration::you_said(transcript));
        self.handle_utterance(transcript)
    }

    pub fn on_listening_ended(&mut self) {
        if self.state == SessionState::Listening {
            self.state = SessionState::Idle;
        }
    }

    pub fn on_listening_error(&mut self, code: &str) {
        if self.state == SessionState::Listening {
            self.state = SessionState::Idle;
        }
        self.set_status(narration::voice_error(code));
    }

    pub fn on_speech_started(&mut self) {
        if self.state == SessionState::Idle {
            self.state = SessionState::Speaking;
        }
    }

    pub fn on_speech_finished(&mut self) {
        if self.state == SessionState::Speaking {
            self.state = SessionState::Idle;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_names() {
        assert_eq!(SessionState::Listening.to_string(), "Listening");
        assert_eq!(SessionState::Error.as_ref(), "Error");
    }

    #[test]
    fn event_json_is_tagged() {
        let json = serde_json::to_value(EngineEvent::PromptRetry {
            message: "again".to_string(),
        })
        .unwrap();
        assert_eq!(json["type"], "promptRetry");
        assert_eq!(json["message"], "again");
        let json = serde_json::to_value(EngineEvent::TriggerEmergency).unwrap();
        assert_eq!(json["type"], "triggerEmergency");
    }
}
