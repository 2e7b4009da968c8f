//! Seams to the platform: voice capture, speech output, geolocation, the
//! emergency backend and the map view. The engine never implements these, it
//! only calls them.
use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::emergency::EmergencyPayload;
use crate::utils::{lng_lat_to_tile_x_y, Coordinate};

pub trait ListeningCapability {
    fn start(&mut self);
    fn stop(&mut self);
}

/// `speak` must cancel whatever is still being spoken before starting. The
/// platform reports when audio actually starts and stops through
/// `Navigator::on_speech_started` / `on_speech_finished`.
pub trait SpeechOutput {
    fn speak(&mut self, text: &str);
    fn cancel(&mut self);

    fn configure(&mut self, _voice: &VoiceSettings) {}
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoiceSettings {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        // a bit slower than normal, directions are easier to follow
        VoiceSettings {
            rate: 0.9,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// One-shot location fix.
pub trait LocationCapability {
    fn current_position(&self) -> Result<Coordinate>;
}

pub trait AlertTransport {
    fn send_emergency(&self, payload: &EmergencyPayload) -> Result<()>;
}

pub trait MapRenderer {
    fn show_route(
        &mut self,
        polyline: &[Coordinate],
        marker: Coordinate,
        label: &str,
        camera: CameraOption,
    );

    fn show_current_position(&mut self, _position: Coordinate) {}
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CameraOption {
    pub zoom: i32,
    pub lng: f64,
    pub lat: f64,
}

const MAX_ZOOM: i32 = 18;
const MIN_ZOOM: i32 = 2;

impl CameraOption {
    pub fn centered_on(position: Coordinate, zoom: i32) -> Self {
        CameraOption {
            zoom,
            lng: position.lng,
            lat: position.lat,
        }
    }

    /// Centers on the bounding box of `points` and picks the closest zoom at
    /// which the box still spans at most two tiles per axis, leaving some
    /// padding around the route.
    pub fn fit(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_lat, mut max_lat) = (first.lat, first.lat);
        let (mut min_lng, mut max_lng) = (first.lng, first.lng);
        for p in points {
            min_lat = min_lat.min(p.lat);
            max_lat = max_lat.max(p.lat);
            min_lng = min_lng.min(p.lng);
            max_lng = max_lng.max(p.lng);
        }

        let zoom = (MIN_ZOOM..=MAX_ZOOM)
            .rev()
            .find(|zoom| {
                let (left, top) = lng_lat_to_tile_x_y(min_lng, max_lat, *zoom);
                let (right, bottom) = lng_lat_to_tile_x_y(max_lng, min_lat, *zoom);
                right - left <= 1 && bottom - top <= 1
            })
            .unwrap_or(MIN_ZOOM);

        Some(CameraOption {
            zoom,
            lng: (min_lng + max_lng) / 2.0,
            lat: (min_lat + max_lat) / 2.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_single_point_uses_max_zoom() {
        let camera = CameraOption::fit(&[Coordinate::new(11.0168, 76.9558)]).unwrap();
        assert_eq!(camera.zoom, MAX_ZOOM);
        assert_eq!(camera.lat, 11.0168);
    }

    #[test]
    fn fit_wider_area_zooms_out() {
        let near = CameraOption::fit(&[
            Coordinate::new(11.0168, 76.9558),
            Coordinate::new(11.0138, 76.9608),
        ])
        .unwrap();
        let far = CameraOption::fit(&[
            Coordinate::new(11.0168, 76.9558),
            Coordinate::new(12.0, 78.0),
        ])
        .unwrap();
        assert!(far.zoom < near.zoom);
        assert!(near.zoom >= 13);
        assert_eq!(CameraOption::fit(&[]), None);
    }
}
