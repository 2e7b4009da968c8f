use serde::Serialize;

use crate::utils::{haversine_distance, Coordinate};

pub const WALKING_SPEED_MPS: f64 = 1.4;

// Latitude/longitude progress of the waypoints between start and end. The
// path heads north, turns east, heads north again, then makes the final
// approach, so it looks like it follows streets.
const NORTH_LEG_RATIO: f64 = 0.3;
const EAST_LEG_RATIO: f64 = 0.6;
const SECOND_NORTH_LEG_RATIO: f64 = 0.8;

// Share of the total distance narrated by each leg, in order. Sums to 1.
const LEG_SHARES: [f64; 5] = [0.3, 0.4, 0.2, 0.1, 0.0];

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    pub instruction: String,
    pub distance_meters: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteResult {
    pub legs: Vec<RouteLeg>,
    pub total_distance_meters: f64,
    pub total_duration_seconds: f64,
    pub geometry: Vec<Coordinate>,
}

impl RouteResult {
    pub fn start(&self) -> Option<&Coordinate> {
        self.geometry.first()
    }

    pub fn end(&self) -> Option<&Coordinate> {
        self.geometry.last()
    }

    pub fn to_line_string(&self) -> geo_types::LineString<f64> {
        self.geometry
            .iter()
            .map(|c| geo_types::Coord::from(*c))
            .collect()
    }
}

pub struct RouteSynthesizer;

impl RouteSynthesizer {
    pub fn new() -> Self {
        RouteSynthesizer
    }

    pub fn synthesize(
        &self,
        start: &Coordinate,
        end: &Coordinate,
        destination_label: &str,
    ) -> RouteResult {
        let total_distance_meters = haversine_distance(start, end);
        let total_duration_seconds = total_distance_meters / WALKING_SPEED_MPS;

        RouteResult {
            legs: Self::legs(total_distance_meters, destination_label),
            total_distance_meters,
            total_duration_seconds,
            geometry: Self::waypoints(start, end),
        }
    }

    fn waypoints(start: &Coordinate, end: &Coordinate) -> Vec<Coordinate> {
        let lat_diff = end.lat - start.lat;
        let lng_diff = end.lng - start.lng;
        vec![
            *start,
            start.offset(lat_diff * NORTH_LEG_RATIO, 0.0),
            start.offset(lat_diff * NORTH_LEG_RATIO, lng_diff * EAST_LEG_RATIO),
            start.offset(lat_diff * SECOND_NORTH_LEG_RATIO, lng_diff * EAST_LEG_RATIO),
            *end,
        ]
    }

    fn legs(total_distance_meters: f64, destination: &str) -> Vec<RouteLeg> {
        let instructions = [
            format!("Start walking north on your current street towards {destination}"),
            "Turn right onto Main Road and walk for 400 meters".to_string(),
            "Turn left onto Cross Street and continue".to_string(),
            format!("Turn right and walk to {destination}"),
            format!("You have arrived at {destination}"),
        ];
        instructions
            .into_iter()
            .zip(LEG_SHARES)
            .map(|(instruction, share)| RouteLeg {
                instruction,
                distance_meters: total_distance_meters * share,
            })
            .collect()
    }
}
