//! Map Jump - a hold-and-release jumping game on top of a 3D map
//!
//! Core modules:
//! - `sim`: Deterministic simulation (arc geometry, session state, timers)
//! - `game`: The `JumpGame` engine driven by a single virtual clock
//! - `host`: Map surface abstraction (platforms, marker, camera)
//! - `settings`: Session geometry and tuning options

pub mod error;
pub mod game;
pub mod host;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use game::{InputEvent, JumpGame};
pub use host::{MapHost, RecordingHost};
pub use settings::GameOptions;
pub use sim::{GameEvent, GamePhase, JumpDirection, Landing};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Default starting coordinate (lon, lat) in degrees
    pub const START_LON_LAT: [f64; 2] = [113.1805, 23.1205];

    /// Platform defaults
    pub const BOX_HEIGHT: f64 = 50.0;
    pub const BOX_WIDTH_HALF: f64 = 0.0005;

    /// Charge speed at the start of every press (degrees per flight)
    pub const START_SPEED: f64 = 0.0001;
    /// Charge speed gained per charge tick
    pub const SPEED_INCREMENT: f64 = 0.000175;

    /// Gap range between platforms, divided by `DISTANCE_SCALE`
    pub const DISTANCE_MIN: u32 = 15;
    pub const DISTANCE_MAX: u32 = 45;
    pub const DISTANCE_SCALE: f64 = 10_000.0;

    /// Charge timer interval (ms)
    pub const CHARGE_INTERVAL_MS: u64 = 100;
    /// Flight timer interval (ms)
    pub const FLIGHT_INTERVAL_MS: u64 = 10;
    /// Marker advance along the jump axis per flight tick (degrees)
    pub const FLIGHT_STEP: f64 = 0.00005;

    /// Camera framing after a new platform spawns
    pub const CAMERA_DURATION_SECS: f64 = 1.0;
    pub const CAMERA_PITCH_DEG: f64 = -45.0;
    /// Top-down camera pitch on game over
    pub const GAME_OVER_PITCH_DEG: f64 = -90.0;

    /// Half the Web Mercator world width (meters)
    pub const MERCATOR_HALF_EXTENT: f64 = 20_037_508.34;
}

/// Convert (lon, lat) degrees to Web Mercator meters
///
/// The arc height only ever uses the `x` component, with the varying axis
/// passed in as a pseudo-longitude and `lat = 0`.
#[inline]
pub fn lonlat_to_web_mercator(lon: f64, lat: f64) -> DVec2 {
    use std::f64::consts::PI;
    let x = lon * consts::MERCATOR_HALF_EXTENT / 180.0;
    let y = ((90.0 + lat) * PI / 360.0).tan().ln() / (PI / 180.0);
    DVec2::new(x, y * consts::MERCATOR_HALF_EXTENT / 180.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mercator_origin() {
        let p = lonlat_to_web_mercator(0.0, 0.0);
        assert!(p.x.abs() < 1e-9);
        assert!(p.y.abs() < 1e-6);
    }

    #[test]
    fn test_mercator_antimeridian() {
        let p = lonlat_to_web_mercator(180.0, 0.0);
        assert!((p.x - consts::MERCATOR_HALF_EXTENT).abs() < 1e-6);
    }

    #[test]
    fn test_mercator_latitude_grows_north() {
        let south = lonlat_to_web_mercator(113.0, 23.0);
        let north = lonlat_to_web_mercator(113.0, 24.0);
        assert!(north.y > south.y);
        assert_eq!(north.x, south.x);
    }
}
