//! Session options
//!
//! Fixed for the lifetime of a `JumpGame`; gameplay never mutates them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{GameError, Result};

/// RGBA color, components in 0.0 - 1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

/// Platform box dimensions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSize {
    /// Extruded height at rest (meters)
    pub height: f64,
    /// Half the side length (degrees). Also the landing tolerance.
    pub width_half: f64,
}

/// Inclusive range for random gaps, in units of `1 / scale` degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DistanceRange {
    pub min: u32,
    pub max: u32,
    pub scale: f64,
}

/// Camera framing parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOptions {
    /// Fly duration after a platform spawns (seconds)
    pub duration_secs: f64,
    /// Pitch while framing the current jump (degrees)
    pub pitch_deg: f64,
    /// Pitch for the game over overview (degrees)
    pub game_over_pitch_deg: f64,
}

/// Visual style for the marker point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarkerStyle {
    pub color: Color,
    pub outline_color: Color,
    pub outline_width: f32,
    pub pixel_size: f32,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            outline_color: Color::WHITE,
            outline_width: 4.0,
            pixel_size: 28.0,
        }
    }
}

/// Visual style shared by every platform; the material color is rolled per platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformStyle {
    pub outline: bool,
    pub outline_color: Color,
    pub outline_width: f32,
    /// Texture rotation (degrees)
    pub st_rotation_deg: f32,
}

impl Default for PlatformStyle {
    fn default() -> Self {
        Self {
            outline: true,
            outline_color: Color::WHITE,
            outline_width: 4.0,
            st_rotation_deg: 45.0,
        }
    }
}

/// Session geometry, clock and style options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameOptions {
    /// First platform coordinate `[lon, lat]`
    pub start_lon_lat: [f64; 2],
    pub box_size: BoxSize,
    /// Charge speed at press
    pub start_speed: f64,
    /// Charge speed gained per charge tick
    pub speed_increment: f64,
    pub distance: DistanceRange,
    pub charge_interval_ms: u64,
    pub flight_interval_ms: u64,
    /// Marker advance per flight tick (degrees)
    pub flight_step: f64,
    pub camera: CameraOptions,
    pub marker_style: MarkerStyle,
    pub platform_style: PlatformStyle,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            start_lon_lat: START_LON_LAT,
            box_size: BoxSize {
                height: BOX_HEIGHT,
                width_half: BOX_WIDTH_HALF,
            },
            start_speed: START_SPEED,
            speed_increment: SPEED_INCREMENT,
            distance: DistanceRange {
                min: DISTANCE_MIN,
                max: DISTANCE_MAX,
                scale: DISTANCE_SCALE,
            },
            charge_interval_ms: CHARGE_INTERVAL_MS,
            flight_interval_ms: FLIGHT_INTERVAL_MS,
            flight_step: FLIGHT_STEP,
            camera: CameraOptions {
                duration_secs: CAMERA_DURATION_SECS,
                pitch_deg: CAMERA_PITCH_DEG,
                game_over_pitch_deg: GAME_OVER_PITCH_DEG,
            },
            marker_style: MarkerStyle::default(),
            platform_style: PlatformStyle::default(),
        }
    }
}

impl GameOptions {
    /// Parse options from JSON; missing fields fall back to defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let options: GameOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Load options from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let options = Self::from_json(&json)?;
        log::info!("Loaded game options from {}", path.display());
        Ok(options)
    }

    /// Check the caller contract: ordered gap range, positive speeds and intervals
    pub fn validate(&self) -> Result<()> {
        fn positive(name: &str, value: f64) -> Result<()> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(GameError::InvalidOptions(format!(
                    "{name} must be positive, got {value}"
                )))
            }
        }

        if self.distance.min > self.distance.max {
            return Err(GameError::InvalidOptions(format!(
                "distance min {} exceeds max {}",
                self.distance.min, self.distance.max
            )));
        }
        if self.start_lon_lat.iter().any(|v| !v.is_finite()) {
            return Err(GameError::InvalidOptions(
                "start coordinate must be finite".to_string(),
            ));
        }
        positive("start_speed", self.start_speed)?;
        positive("speed_increment", self.speed_increment)?;
        positive("flight_step", self.flight_step)?;
        positive("distance.scale", self.distance.scale)?;
        positive("box_size.height", self.box_size.height)?;
        positive("box_size.width_half", self.box_size.width_half)?;
        if self.charge_interval_ms == 0 || self.flight_interval_ms == 0 {
            return Err(GameError::InvalidOptions(
                "timer intervals must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Smallest gap a generated platform can have (degrees)
    pub fn min_gap(&self) -> f64 {
        self.distance.min as f64 / self.distance.scale
    }

    /// Largest gap a generated platform can have (degrees)
    pub fn max_gap(&self) -> f64 {
        self.distance.max as f64 / self.distance.scale
    }
}
