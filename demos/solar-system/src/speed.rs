//! Per-planet speed multipliers.
//!
//! One multiplier per planet, default 1.0, never negative. Names are matched
//! case-insensitively; unknown names leave the registry untouched and are
//! reported both as a warning and as an error value.

use std::collections::BTreeMap;
use serde::Serialize;
use thiserror::Error;
use crate::planets::Planet;

pub const DEFAULT_SPEED: f32 = 1.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpeedError {
    #[error("unknown planet '{name}' (valid: {valid})")]
    UnknownPlanet { name: String, valid: String },
}

impl SpeedError {
    pub(crate) fn unknown(name: &str) -> Self {
        SpeedError::UnknownPlanet {
            name: name.to_string(),
            valid: Planet::valid_names(),
        }
    }
}

/// A single planet or every planet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeedTarget {
    All,
    One(Planet),
}

impl SpeedTarget {
    /// `"all"` (any case) or a planet name.
    pub fn parse(name: &str) -> Result<Self, SpeedError> {
        if name.eq_ignore_ascii_case("all") {
            return Ok(SpeedTarget::All);
        }
        Ok(SpeedTarget::One(name.parse()?))
    }
}

/// Read-only copy of every multiplier, in planet order.
/// Serializes as `{"mercury": 1.0, ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SpeedSnapshot(BTreeMap<Planet, f32>);

impl SpeedSnapshot {
    pub fn get(&self, planet: Planet) -> f32 {
        self.0.get(&planet).copied().unwrap_or(DEFAULT_SPEED)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Planet, f32)> + '_ {
        self.0.iter().map(|(p, v)| (*p, *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpeedRegistry {
    speeds: [f32; Planet::COUNT],
}

impl Default for SpeedRegistry {
    fn default() -> Self {
        Self {
            speeds: [DEFAULT_SPEED; Planet::COUNT],
        }
    }
}

impl SpeedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplier for `planet`.
    pub fn get(&self, planet: Planet) -> f32 {
        self.speeds[planet.index()]
    }

    /// Store `max(0, value)`; NaN becomes 0. Returns the stored value.
    pub fn set(&mut self, planet: Planet, value: f32) -> f32 {
        let stored = if value.is_nan() { 0.0 } else { value.max(0.0) };
        self.speeds[planet.index()] = stored;
        log::debug!("{planet} speed set to {stored}");
        stored
    }

    /// Set by name. Unknown names change nothing.
    pub fn set_speed(&mut self, name: &str, value: f32) -> Result<f32, SpeedError> {
        let planet = lookup(name)?;
        Ok(self.set(planet, value))
    }

    /// Multiplier by name, `None` for unknown names.
    pub fn get_speed(&self, name: &str) -> Option<f32> {
        Planet::from_name(name).map(|p| self.get(p))
    }

    /// Restore one planet, or all with `"all"`, to 1.0.
    pub fn reset(&mut self, name: &str) -> Result<(), SpeedError> {
        self.apply(name, DEFAULT_SPEED)
    }

    /// Set one planet, or all with `"all"`, to 0.
    pub fn pause(&mut self, name: &str) -> Result<(), SpeedError> {
        self.apply(name, 0.0)
    }

    pub fn list(&self) -> SpeedSnapshot {
        SpeedSnapshot(Planet::ALL.into_iter().map(|p| (p, self.get(p))).collect())
    }

    fn apply(&mut self, name: &str, value: f32) -> Result<(), SpeedError> {
        match SpeedTarget::parse(name).inspect_err(warn_unknown)? {
            SpeedTarget::All => {
                for planet in Planet::ALL {
                    self.set(planet, value);
                }
            }
            SpeedTarget::One(planet) => {
                self.set(planet, value);
            }
        }
        Ok(())
    }
}

fn lookup(name: &str) -> Result<Planet, SpeedError> {
    name.parse::<Planet>().inspect_err(warn_unknown)
}

fn warn_unknown(err: &SpeedError) {
    log::warn!("{err}");
}
