use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::utils::Coordinate;

// Order matters: the first keyword contained in the query wins.
// (keyword, delta lat, delta lng)
pub const KNOWN_PLACES: [(&str, f64, f64); 8] = [
    ("school", 0.005, 0.003),
    ("hospital", -0.003, 0.005),
    ("restaurant", -0.002, -0.003),
    ("mall", 0.004, 0.002),
    ("bank", 0.003, -0.002),
    ("pharmacy", -0.004, -0.001),
    ("railway station", 0.008, 0.006),
    ("airport", -0.015, 0.012),
];

// Unknown places land somewhere within this many degrees of the origin on
// each axis.
pub const FALLBACK_SPREAD_DEG: f64 = 0.005;

pub struct DestinationResolver {
    rng: StdRng,
}

impl DestinationResolver {
    pub fn new() -> Self {
        DestinationResolver {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        DestinationResolver {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn known_place(name: &str) -> Option<&'static str> {
        let key = name.to_lowercase();
        KNOWN_PLACES
            .iter()
            .find(|(place, _, _)| key.contains(place))
            .map(|(place, _, _)| *place)
    }

    pub fn resolve(&mut self, name: &str, origin: &Coordinate) -> Coordinate {
        let key = name.to_lowercase();
        if let Some((place, d_lat, d_lng)) =
            KNOWN_PLACES.iter().find(|(place, _, _)| key.contains(place))
        {
            debug!("resolved {name:?} as known place {place:?}");
            return origin.offset(*d_lat, *d_lng);
        }

        let d_lat = self
            .rng
            .random_range(-FALLBACK_SPREAD_DEG..FALLBACK_SPREAD_DEG);
        let d_lng = self
            .rng
            .random_range(-FALLBACK_SPREAD_DEG..FALLBACK_SPREAD_DEG);
        debug!("no known place in {name:?}, picked a nearby spot");
        origin.offset(d_lat, d_lng)
    }
}
