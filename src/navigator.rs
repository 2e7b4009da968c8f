use strum_macros::Display;

use crate::capabilities::{
    AlertTransport, CameraOption, ListeningCapability, LocationCapability, MapRenderer,
    SpeechOutput, VoiceSettings,
};
use crate::emergency::EmergencyPayload;
use crate::narration;
use crate::navigation_session::{EngineEvent, ListeningAction, NavigationSession, SessionState};

/// Problems surfaced to the user. None of them stops the navigator.
#[derive(Clone, Debug, PartialEq, Eq, Display)]
pub enum Issue {
    InterpretationRejected,
    ListeningUnavailable,
    ListeningError(String),
    LocationUnavailable,
    AlertTransportFailure,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AlertOutcome {
    Sent,
    Failed,
}

// Zoom used to show the user's own position after a location fix.
const POSITION_ZOOM: i32 = 15;

/// Binds a `NavigationSession` to the platform capabilities: engine events
/// become map updates and spoken text.
pub struct Navigator {
    session: NavigationSession,
    speech: Box<dyn SpeechOutput>,
    map: Box<dyn MapRenderer>,
    alerts: Box<dyn AlertTransport>,
    listening: Option<Box<dyn ListeningCapability>>,
    last_issue: Option<Issue>,
}

impl Navigator {
    pub fn new(
        session: NavigationSession,
        speech: Box<dyn SpeechOutput>,
        map: Box<dyn MapRenderer>,
        alerts: Box<dyn AlertTransport>,
        listening: Option<Box<dyn ListeningCapability>>,
    ) -> Self {
        Navigator {
            session,
            speech,
            map,
            alerts,
            listening,
            last_issue: None,
        }
    }

    pub fn session(&self) -> &NavigationSession {
        &self.session
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn status(&self) -> &str {
        self.session.status()
    }

    pub fn last_issue(&self) -> Option<&Issue> {
        self.last_issue.as_ref()
    }

    pub fn set_voice(&mut self, voice: &VoiceSettings) {
        self.speech.configure(voice);
    }

    pub fn start(&mut self) {
        self.speak(narration::GREETING);
    }

    pub fn locate(&mut self, location: &dyn LocationCapability) {
        let fix = location.current_position();
        let found = fix.is_ok();
        self.session.on_location_result(fix);
        if found {
            self.map.show_current_position(self.session.current_position());
        } else {
            self.last_issue = Some(Issue::LocationUnavailable);
        }
    }

    pub fn toggle_listening(&mut self) {
        let action = self.session.toggle_listening(self.listening.is_some());
        if let Some(listening) = self.listening.as_mut() {
            match action {
                ListeningAction::Start => return listening.start(),
                ListeningAction::Stop => return listening.stop(),
                ListeningAction::Unavailable => (),
            }
        }
        self.last_issue = Some(Issue::ListeningUnavailable);
        self.speak(narration::LISTENING_UNAVAILABLE);
    }

    pub fn on_listening_started(&mut self) {
        self.session.on_listening_started();
    }

    pub fn on_listening_ended(&mut self) {
        self.session.on_listening_ended();
    }

    pub fn on_listening_error(&mut self, code: &str) {
        self.last_issue = Some(Issue::ListeningError(code.to_string()));
        self.session.on_listening_error(code);
    }

    // Reported by the platform speech engine, `speak` itself never blocks.
    pub fn on_speech_started(&mut self) {
        self.session.on_speech_started();
    }

    pub fn on_speech_finished(&mut self) {
        self.session.on_speech_finished();
    }

    pub fn on_transcript(&mut self, transcript: &str) -> EngineEvent {
        let event = self.session.on_transcript(transcript);
        self.dispatch(&event);
        event
    }

    /// Text typed into the destination field.
    pub fn submit_destination(&mut self, destination: &str) -> EngineEvent {
        let event = self.session.request_route(destination);
        self.dispatch(&event);
        event
    }

    pub fn trigger_emergency(&mut self) -> AlertOutcome {
        self.speak(narration::EMERGENCY_ACTIVATED);
        let payload = EmergencyPayload::for_now(self.session.current_position());
        match self.alerts.send_emergency(&payload) {
            Ok(()) => {
                self.speak(narration::EMERGENCY_SENT);
                AlertOutcome::Sent
            }
            Err(e) => {
                warn!("emergency alert failed: {e:#}");
                self.last_issue = Some(Issue::AlertTransportFailure);
                self.speak(narration::EMERGENCY_FAILED);
                AlertOutcome::Failed
            }
        }
    }

    fn dispatch(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::RouteReady {
                destination,
                coordinates,
                route,
            } => {
                self.speak(&narration::getting_route_to(destination));
                let camera = CameraOption::fit(&route.geometry)
                    .unwrap_or_else(|| CameraOption::centered_on(*coordinates, POSITION_ZOOM));
                self.map
                    .show_route(&route.geometry, *coordinates, destination, camera);
                if let Some(summary) = narration::route_summary(destination, route) {
                    self.speak(&summary);
                }
            }
            EngineEvent::TriggerEmergency => {
                self.trigger_emergency();
            }
            EngineEvent::PromptRetry { message } => {
                self.last_issue = Some(Issue::InterpretationRejected);
                self.speak(message);
            }
        }
    }

    // A new utterance always replaces the one still being spoken.
    fn speak(&mut self, text: &str) {
        self.speech.cancel();
        self.speech.speak(text);
    }
}
