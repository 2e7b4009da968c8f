pub mod test_utils;

use assert_float_eq::*;
use test_utils::*;
use voice_nav_core::narration;
use voice_nav_core::navigation_session::{
    EngineEvent, ListeningAction, NavigationSession, SessionState, DEFAULT_POSITION,
};
use voice_nav_core::Coordinate;

#[test]
fn navigate_to_hospital_end_to_end() {
    let mut session = NavigationSession::new();
    assert_eq!(session.current_position(), DEFAULT_POSITION);

    match session.handle_utterance("Navigate to hospital") {
        EngineEvent::RouteReady {
            destination,
            coordinates,
            route,
        } => {
            assert_eq!(destination, "hospital");
            assert_coordinate_near(&coordinates, &Coordinate::new(11.0138, 76.9608));
            assert_eq!(route.geometry.first(), Some(&DEFAULT_POSITION));
            assert_eq!(route.geometry.last(), Some(&coordinates));
            assert_float_absolute_eq!(
                route.total_duration_seconds,
                route.total_distance_meters / 1.4,
                1e-9
            );
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert_eq!(session.destination(), Some("hospital"));
    assert_eq!(session.status(), "Calculating route to hospital...");
}

#[test]
fn emergency_and_retry_events() {
    let mut session = seeded_session();
    assert_eq!(session.handle_utterance("EMERGENCY"), EngineEvent::TriggerEmergency);
    assert_eq!(
        session.handle_utterance("x"),
        EngineEvent::PromptRetry {
            message: narration::RETRY_PROMPT.to_string()
        }
    );
    assert_eq!(session.destination(), None);
}

#[test]
fn routes_start_from_latest_position() {
    let mut session = seeded_session();
    let paris = Coordinate::new(48.8566, 2.3522);
    session.set_current_position(paris);
    match session.handle_utterance("take me to the mall") {
        EngineEvent::RouteReady { coordinates, route, .. } => {
            assert_coordinate_near(&coordinates, &paris.offset(0.004, 0.002));
            assert_eq!(route.start(), Some(&paris));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn typed_destination() {
    let mut session = seeded_session();
    assert_eq!(
        session.request_route("   "),
        EngineEvent::PromptRetry {
            message: narration::EMPTY_DESTINATION_PROMPT.to_string()
        }
    );
    // typed text is not interpreted as a command
    match session.request_route("Emergency pharmacy") {
        EngineEvent::RouteReady { destination, coordinates, .. } => {
            assert_eq!(destination, "Emergency pharmacy");
            assert_coordinate_near(&coordinates, &DEFAULT_POSITION.offset(-0.004, -0.001));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn location_fix() {
    let mut session = seeded_session();
    let status = session.on_location_result(Err(anyhow::anyhow!("timeout")));
    assert_eq!(status, narration::STATUS_DEFAULT_LOCATION);
    assert_eq!(session.current_position(), DEFAULT_POSITION);

    let here = Coordinate::new(12.9716, 77.5946);
    let status = session.on_location_result(Ok(here));
    assert_eq!(status, narration::STATUS_LOCATION_FOUND);
    assert_eq!(session.current_position(), here);

    // a later failure keeps the last fix
    session.on_location_result(Err(anyhow::anyhow!("denied")));
    assert_eq!(session.current_position(), here);
}

#[test]
fn listening_cycle() {
    let mut session = seeded_session();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.toggle_listening(true), ListeningAction::Start);

    session.on_listening_started();
    assert_eq!(session.state(), SessionState::Listening);
    assert_eq!(session.status(), narration::STATUS_LISTENING);
    assert_eq!(session.toggle_listening(true), ListeningAction::Stop);

    // a second start while listening changes nothing
    session.on_listening_started();
    assert_eq!(session.state(), SessionState::Listening);

    let event = session.on_transcript("  take me to the bank ");
    assert!(matches!(event, EngineEvent::RouteReady { .. }));
    assert_eq!(session.state(), SessionState::Idle);

    session.on_listening_ended();
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn listening_error_returns_to_idle() {
    let mut session = seeded_session();
    session.on_listening_started();
    session.on_listening_error("no-speech");
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.status(), "Voice error: no-speech");
}

#[test]
fn listening_stopped_explicitly() {
    let mut session = seeded_session();
    session.on_listening_started();
    session.on_listening_ended();
    assert_eq!(session.state(), SessionState::Idle);
}

#[test]
fn missing_capability_disables_voice() {
    let mut session = seeded_session();
    assert_eq!(session.toggle_listening(false), ListeningAction::Unavailable);
    assert_eq!(session.state(), SessionState::Error);
    // typed input keeps working
    assert!(matches!(
        session.request_route("school"),
        EngineEvent::RouteReady { .. }
    ));
}

#[test]
fn speaking_does_not_block_listening() {
    let mut session = seeded_session();
    session.on_speech_started();
    assert_eq!(session.state(), SessionState::Speaking);
    assert_eq!(session.toggle_listening(true), ListeningAction::Start);
    session.on_listening_started();
    assert_eq!(session.state(), SessionState::Listening);
    // speech finishing while listening leaves listening alone
    session.on_speech_finished();
    assert_eq!(session.state(), SessionState::Listening);
}
