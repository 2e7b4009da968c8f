#![allow(dead_code)]

use anyhow::{bail, Result};
use std::cell::RefCell;
use std::rc::Rc;
use voice_nav_core::capabilities::{
    AlertTransport, CameraOption, ListeningCapability, LocationCapability, MapRenderer,
    SpeechOutput, VoiceSettings,
};
use voice_nav_core::destination_resolver::DestinationResolver;
use voice_nav_core::emergency::EmergencyPayload;
use voice_nav_core::navigation_session::{NavigationSession, DEFAULT_POSITION};
use voice_nav_core::route_synthesizer::RouteSynthesizer;
use voice_nav_core::Coordinate;

pub const COIMBATORE: Coordinate = Coordinate::new(11.0168, 76.9558);

pub fn seeded_session() -> NavigationSession {
    NavigationSession::with_parts(
        DEFAULT_POSITION,
        DestinationResolver::with_seed(2024),
        RouteSynthesizer::new(),
    )
}

pub fn assert_coordinate_near(actual: &Coordinate, expected: &Coordinate) {
    assert!(
        (actual.lat - expected.lat).abs() < 1e-9 && (actual.lng - expected.lng).abs() < 1e-9,
        "expected {expected:?}, got {actual:?}"
    );
}

#[derive(Default, Clone)]
pub struct RecordingSpeech {
    pub spoken: Rc<RefCell<Vec<String>>>,
    pub cancelled: Rc<RefCell<usize>>,
    pub voice: Rc<RefCell<Option<VoiceSettings>>>,
}

impl SpeechOutput for RecordingSpeech {
    fn speak(&mut self, text: &str) {
        self.spoken.borrow_mut().push(text.to_string());
    }

    fn cancel(&mut self) {
        *self.cancelled.borrow_mut() += 1;
    }

    fn configure(&mut self, voice: &VoiceSettings) {
        *self.voice.borrow_mut() = Some(*voice);
    }
}

#[derive(Clone, Debug)]
pub struct ShownRoute {
    pub polyline: Vec<Coordinate>,
    pub marker: Coordinate,
    pub label: String,
    pub camera: CameraOption,
}

#[derive(Default, Clone)]
pub struct RecordingMap {
    pub routes: Rc<RefCell<Vec<ShownRoute>>>,
    pub positions: Rc<RefCell<Vec<Coordinate>>>,
}

impl MapRenderer for RecordingMap {
    fn show_route(
        &mut self,
        polyline: &[Coordinate],
        marker: Coordinate,
        label: &str,
        camera: CameraOption,
    ) {
        self.routes.borrow_mut().push(ShownRoute {
            polyline: polyline.to_vec(),
            marker,
            label: label.to_string(),
            camera,
        });
    }

    fn show_current_position(&mut self, position: Coordinate) {
        self.positions.borrow_mut().push(position);
    }
}

#[derive(Default, Clone)]
pub struct RecordingAlerts {
    pub fail: bool,
    pub sent: Rc<RefCell<Vec<EmergencyPayload>>>,
}

impl AlertTransport for RecordingAlerts {
    fn send_emergency(&self, payload: &EmergencyPayload) -> Result<()> {
        if self.fail {
            bail!("connection refused");
        }
        self.sent.borrow_mut().push(payload.clone());
        Ok(())
    }
}

#[derive(Default, Clone)]
pub struct RecordingListening {
    pub calls: Rc<RefCell<Vec<&'static str>>>,
}

impl ListeningCapability for RecordingListening {
    fn start(&mut self) {
        self.calls.borrow_mut().push("start");
    }

    fn stop(&mut self) {
        self.calls.borrow_mut().push("stop");
    }
}

pub struct FixedLocation(pub Option<Coordinate>);

impl LocationCapability for FixedLocation {
    fn current_position(&self) -> Result<Coordinate> {
        self.0.ok_or_else(|| anyhow::anyhow!("timeout"))
    }
}
