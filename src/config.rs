use std::fs;
use std::path::Path;

use anyhow::Result;
use serde::Deserialize;

use crate::capabilities::VoiceSettings;
use crate::destination_resolver::DestinationResolver;
use crate::navigation_session::{NavigationSession, DEFAULT_POSITION};
use crate::route_synthesizer::RouteSynthesizer;
use crate::utils::Coordinate;

pub const DEFAULT_ALERT_ENDPOINT: &str = "http://localhost:3000";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationConfig {
    pub default_position: Coordinate,
    pub alert_endpoint: String,
    pub voice: VoiceSettings,
    /// Makes destination guesses for unknown places reproducible.
    pub resolver_seed: Option<u64>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        NavigationConfig {
            default_position: DEFAULT_POSITION,
            alert_endpoint: DEFAULT_ALERT_ENDPOINT.to_string(),
            voice: VoiceSettings::default(),
            resolver_seed: None,
        }
    }
}

impl NavigationConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: NavigationConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow!("cannot read config {}: {e}", path.display()))?;
        Self::from_json_str(&content)
    }

    fn validate(&self) -> Result<()> {
        let Coordinate { lat, lng } = self.default_position;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            bail!("defaultPosition ({lat}, {lng}) is not a valid coordinate");
        }
        Ok(())
    }

    pub fn build_session(&self) -> NavigationSession {
        let resolver = match self.resolver_seed {
            Some(seed) => DestinationResolver::with_seed(seed),
            None => DestinationResolver::new(),
        };
        NavigationSession::with_parts(
            self.default_position,
            resolver,
            RouteSynthesizer::new(),
        )
    }
}

#[cfg(test)]
mod tests {
    use assert_float_eq::*;
    use std::fs;
    use tempdir::TempDir;

    use super::*;
    use crate::navigation_session::EngineEvent;
    use crate::route_synthesizer::WALKING_SPEED_MPS;

    #[test]
    fn empty_object_gives_defaults() {
        assert_eq!(
            NavigationConfig::from_json_str("{}").unwrap(),
            NavigationConfig::default()
        );
    }

    #[test]
    fn partial_override() {
        let config = NavigationConfig::from_json_str(
            r#"{
                "defaultPosition": { "lat": 48.85, "lng": 2.35 },
                "resolverSeed": 7,
                "voice": { "rate": 1.2 }
            }"#,
        )
        .unwrap();
        assert_eq!(config.default_position, Coordinate::new(48.85, 2.35));
        assert_eq!(config.resolver_seed, Some(7));
        assert_eq!(config.voice.rate, 1.2);
        assert_eq!(config.voice.volume, 1.0);
        assert_eq!(
            config.build_session().current_position(),
            Coordinate::new(48.85, 2.35)
        );
    }

    #[test]
    fn rejects_bad_values() {
        assert!(NavigationConfig::from_json_str(
            r#"{ "defaultPosition": { "lat": 91, "lng": 0 } }"#
        )
        .is_err());
        assert!(NavigationConfig::from_json_str("not json").is_err());
    }

    #[test]
    fn walking_speed_is_not_configurable() {
        let config =
            NavigationConfig::from_json_str(r#"{ "walkingSpeedMps": 5.0, "resolverSeed": 1 }"#)
                .unwrap();
        let event = config.build_session().handle_utterance("Navigate to hospital");
        let EngineEvent::RouteReady { route, .. } = &event else {
            panic!("expected a route, got {event:?}");
        };
        assert_float_relative_eq!(
            route.total_duration_seconds,
            route.total_distance_meters / WALKING_SPEED_MPS,
            1e-12
        );
    }

    #[test]
    fn load_from_file() {
        let dir = TempDir::new("config_test").unwrap();
        let path = dir.path().join("navigation.json");
        fs::write(
            &path,
            r#"{ "alertEndpoint": "http://10.0.0.2:3000", "resolverSeed": 3 }"#,
        )
        .unwrap();
        let config = NavigationConfig::load(&path).unwrap();
        assert_eq!(config.alert_endpoint, "http://10.0.0.2:3000");
        assert_eq!(config.resolver_seed, Some(3));
        assert_eq!(config.default_position, DEFAULT_POSITION);

        let missing = dir.path().join("missing.json");
        let err = NavigationConfig::load(&missing).unwrap_err().to_string();
        assert!(err.starts_with("cannot read config"), "got {err}");
        assert!(err.contains("missing.json"), "got {err}");
    }
}
