//! Everything the user hears or reads about a route: spoken prompts, the
//! route summary read out after a route is found, and the stats shown next to
//! the map.
use itertools::Itertools;
use serde::Serialize;

use crate::route_synthesizer::RouteResult;

pub const GREETING: &str =
    "Voice Navigation ready. Say 'Take me to school' or type your destination.";
pub const RETRY_PROMPT: &str = "Please say 'Take me to' followed by your destination";
pub const EMPTY_DESTINATION_PROMPT: &str = "Please enter a destination first";
pub const LISTENING_UNAVAILABLE: &str = "Voice recognition not available";
pub const EMERGENCY_ACTIVATED: &str = "Emergency alert activated";
pub const EMERGENCY_SENT: &str = "Emergency alert sent successfully";
pub const EMERGENCY_FAILED: &str = "Emergency alert failed";

pub const STATUS_LISTENING: &str = "Listening...";
pub const STATUS_LOCATION_FOUND: &str = "Location found";
pub const STATUS_DEFAULT_LOCATION: &str = "Using default location";

pub fn getting_route_to(destination: &str) -> String {
    format!("Getting route to {destination}")
}

pub fn calculating_route_to(destination: &str) -> String {
    format!("Calculating route to {destination}...")
}

pub fn you_said(transcript: &str) -> String {
    format!("You said: \"{transcript}\"")
}

pub fn voice_error(code: &str) -> String {
    format!("Voice error: {code}")
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteStats {
    pub destination: String,
    /// Kilometers with one decimal, ready for display.
    pub distance_km: String,
    pub walking_minutes: i64,
}

pub fn route_stats(destination: &str, route: &RouteResult) -> RouteStats {
    RouteStats {
        destination: destination.to_string(),
        distance_km: format!("{:.1}", route.total_distance_meters / 1000.0),
        walking_minutes: (route.total_duration_seconds / 60.0).round() as i64,
    }
}

pub fn current_instruction(route: &RouteResult) -> Option<&str> {
    route.legs.first().map(|leg| leg.instruction.as_str())
}

/// The full text read out once a route is ready. The arrival leg is not read
/// as a step; the summary closes with its own arrival sentence instead.
/// Returns `None` for a route without legs.
pub fn route_summary(destination: &str, route: &RouteResult) -> Option<String> {
    let (_, steps) = route.legs.split_last()?;
    let stats = route_stats(destination, route);
    let directions = steps
        .iter()
        .enumerate()
        .map(|(i, leg)| format!("Step {}: {}.", i + 1, leg.instruction))
        .join(" ");
    Some(format!(
        "Route found to {destination}. Distance: {} kilometers. Time: {} minutes. \
         Directions: {directions} You will arrive at {destination}.",
        stats.distance_km, stats.walking_minutes
    ))
}
