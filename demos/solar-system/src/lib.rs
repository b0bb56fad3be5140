use wasm_bindgen::prelude::*;

pub mod belt;
pub mod body;
pub mod composer;
pub mod game;
pub mod motion;
pub mod planets;
pub mod scenery;
pub mod speed;

use game::SolarSystem;

orrery_web::export_orrery!(SolarSystem, "solar-system");

// ── Speed control API ────────────────────────────────────────────────

/// Set a planet's speed multiplier (clamped at 0). Unknown names are logged
/// and ignored.
#[wasm_bindgen(js_name = setPlanetSpeed)]
pub fn set_planet_speed(name: &str, speed: f32) {
    let applied = with_runner(|r| r.game_mut().speeds_mut().set_speed(name, speed).is_ok());
    if applied.is_none() {
        log::warn!("setPlanetSpeed called before orrery_init");
    }
}

/// Current multiplier, or `undefined` for an unknown name.
#[wasm_bindgen(js_name = getPlanetSpeed)]
pub fn get_planet_speed(name: &str) -> Option<f32> {
    with_runner(|r| r.game().speeds().get_speed(name)).flatten()
}

/// Restore one planet, or `"all"`, to 1.0.
#[wasm_bindgen(js_name = resetPlanetSpeed)]
pub fn reset_planet_speed(name: &str) {
    if with_runner(|r| r.game_mut().speeds_mut().reset(name).is_ok()).is_none() {
        log::warn!("resetPlanetSpeed called before orrery_init");
    }
}

/// Freeze one planet, or `"all"`.
#[wasm_bindgen(js_name = pausePlanet)]
pub fn pause_planet(name: &str) {
    if with_runner(|r| r.game_mut().speeds_mut().pause(name).is_ok()).is_none() {
        log::warn!("pausePlanet called before orrery_init");
    }
}

/// `{ mercury: 1, venus: 1, ... }`
#[wasm_bindgen(js_name = listPlanetSpeeds)]
pub fn list_planet_speeds() -> Result<JsValue, JsValue> {
    let snapshot = with_runner(|r| r.game().speeds().list())
        .ok_or_else(|| JsValue::from_str("orrery_init has not been called"))?;
    let json = snapshot
        .to_json()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    js_sys::JSON::parse(&json)
}
