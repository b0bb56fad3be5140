//! The eight planets, their scene sizes and orbital distances.
//!
//! Sizes and distances are scene units chosen for readability, not scale.

use std::fmt;
use std::str::FromStr;
use serde::Serialize;
use crate::speed::SpeedError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Planet {
    Mercury,
    Venus,
    Earth,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

/// Visual body parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodySpec {
    pub size: f32,
    pub distance: f32,
    pub texture: &'static str,
}

// ── Table ────────────────────────────────────────────────────────────

const SPECS: [BodySpec; Planet::COUNT] = [
    BodySpec { size: 0.1,   distance: 1.25, texture: "mercury.png" },
    BodySpec { size: 0.2,   distance: 1.65, texture: "venus.png" },
    BodySpec { size: 0.225, distance: 2.0,  texture: "earth.png" },
    BodySpec { size: 0.15,  distance: 2.25, texture: "mars.png" },
    BodySpec { size: 0.4,   distance: 2.75, texture: "jupiter.png" },
    BodySpec { size: 0.35,  distance: 3.25, texture: "saturn.png" },
    BodySpec { size: 0.3,   distance: 3.75, texture: "uranus.png" },
    BodySpec { size: 0.3,   distance: 4.25, texture: "neptune.png" },
];

/// Earth's moon, orbiting relative to Earth.
pub const MOON: BodySpec = BodySpec { size: 0.075, distance: 0.4, texture: "moon.png" };

impl Planet {
    pub const COUNT: usize = 8;

    pub const ALL: [Planet; Planet::COUNT] = [
        Planet::Mercury,
        Planet::Venus,
        Planet::Earth,
        Planet::Mars,
        Planet::Jupiter,
        Planet::Saturn,
        Planet::Uranus,
        Planet::Neptune,
    ];

    /// Lowercase name, as used by the speed API.
    pub fn name(self) -> &'static str {
        match self {
            Planet::Mercury => "mercury",
            Planet::Venus => "venus",
            Planet::Earth => "earth",
            Planet::Mars => "mars",
            Planet::Jupiter => "jupiter",
            Planet::Saturn => "saturn",
            Planet::Uranus => "uranus",
            Planet::Neptune => "neptune",
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn spec(self) -> BodySpec {
        SPECS[self.index()]
    }

    /// Case-insensitive lookup.
    pub fn from_name(name: &str) -> Option<Planet> {
        Planet::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(name))
    }

    /// "mercury, venus, ..." for diagnostics.
    pub fn valid_names() -> String {
        Planet::ALL.map(Planet::name).join(", ")
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Planet {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Planet::from_name(s).ok_or_else(|| SpeedError::unknown(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(Planet::from_name("EaRtH"), Some(Planet::Earth));
        assert_eq!("NEPTUNE".parse::<Planet>().ok(), Some(Planet::Neptune));
        assert_eq!(Planet::from_name("pluto"), None);
        assert!("".parse::<Planet>().is_err());
    }

    #[test]
    fn table_is_ordered_outward() {
        let distances: Vec<f32> = Planet::ALL.iter().map(|p| p.spec().distance).collect();
        assert!(distances.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Planet::Earth.spec(), BodySpec { size: 0.225, distance: 2.0, texture: "earth.png" });
    }

    #[test]
    fn names_round_trip() {
        for p in Planet::ALL {
            assert_eq!(Planet::from_name(p.name()), Some(p));
            assert_eq!(p.to_string(), p.name());
        }
        assert!(Planet::valid_names().starts_with("mercury, venus"));
    }
}
