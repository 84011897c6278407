//! Map host abstraction
//!
//! The engine drives the map through this trait: it creates and removes
//! entities, nudges platform heights and moves the camera. It never reads
//! rendered state back except to check whether an entity exists.

pub mod recording;

pub use recording::{HostCall, HostEntity, RecordingHost};

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::settings::{Color, MarkerStyle, PlatformStyle};
use crate::sim::{EntityId, Footprint};

/// Camera offset for a fly-to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub heading_deg: f64,
    pub pitch_deg: f64,
    /// Fly duration in seconds; `None` lets the host pick
    pub duration_secs: Option<f64>,
}

/// Capabilities the engine needs from the map/scene host
pub trait MapHost {
    /// Render an extruded rectangular platform
    fn add_platform(
        &mut self,
        id: EntityId,
        footprint: Footprint,
        height: f64,
        style: &PlatformStyle,
        color: Color,
    );

    /// Update a platform's extruded height
    fn set_platform_height(&mut self, id: EntityId, height: f64);

    /// Render the marker point at `(lon, lat, height)`
    fn add_marker(&mut self, id: EntityId, pos: DVec3, style: &MarkerStyle);

    /// Whether an entity with this id is currently rendered
    fn has_entity(&self, id: EntityId) -> bool;

    fn remove_entity(&mut self, id: EntityId);

    /// Remove every entity the game placed
    fn clear_entities(&mut self);

    /// Fly the camera to frame the given entities
    fn fly_to(&mut self, targets: &[EntityId], view: CameraView);

    /// Fly the camera to frame every entity
    fn fly_to_all(&mut self, view: CameraView);

    /// Start delivering press/release input to the engine
    fn attach_input(&mut self) {}

    /// Stop delivering input
    fn detach_input(&mut self) {}
}
