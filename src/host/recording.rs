//! In-memory map host
//!
//! Keeps rendered entities in a map and logs every call in order. Backs the
//! headless binary and doubles as the fake host in tests.

use std::collections::BTreeMap;

use glam::DVec3;

use super::{CameraView, MapHost};
use crate::settings::{Color, MarkerStyle, PlatformStyle};
use crate::sim::{EntityId, Footprint};

/// Entity as the host sees it
#[derive(Debug, Clone, PartialEq)]
pub enum HostEntity {
    Platform {
        footprint: Footprint,
        height: f64,
        color: Color,
    },
    Marker {
        pos: DVec3,
    },
}

/// One recorded host call
#[derive(Debug, Clone, PartialEq)]
pub enum HostCall {
    AddPlatform(EntityId),
    SetPlatformHeight(EntityId, f64),
    AddMarker(EntityId, DVec3),
    Remove(EntityId),
    Clear,
    FlyTo(Vec<EntityId>, CameraView),
    FlyToAll(CameraView),
    AttachInput,
    DetachInput,
}

#[derive(Debug, Default)]
pub struct RecordingHost {
    pub entities: BTreeMap<EntityId, HostEntity>,
    pub calls: Vec<HostCall>,
    pub input_attached: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered platforms, ordered by id
    pub fn platforms(&self) -> Vec<(EntityId, &HostEntity)> {
        self.entities
            .iter()
            .filter(|(_, e)| matches!(e, HostEntity::Platform { .. }))
            .map(|(id, e)| (*id, e))
            .collect()
    }

    /// Position of the rendered marker, if any
    pub fn marker_pos(&self) -> Option<DVec3> {
        self.entities.values().find_map(|e| match e {
            HostEntity::Marker { pos } => Some(*pos),
            _ => None,
        })
    }

    /// Number of marker instances currently rendered
    pub fn marker_count(&self) -> usize {
        self.entities
            .values()
            .filter(|e| matches!(e, HostEntity::Marker { .. }))
            .count()
    }

    /// Last camera fly-to, of either kind
    pub fn last_camera(&self) -> Option<&HostCall> {
        self.calls
            .iter()
            .rev()
            .find(|c| matches!(c, HostCall::FlyTo(..) | HostCall::FlyToAll(_)))
    }
}

impl MapHost for RecordingHost {
    fn add_platform(
        &mut self,
        id: EntityId,
        footprint: Footprint,
        height: f64,
        _style: &PlatformStyle,
        color: Color,
    ) {
        self.entities.insert(
            id,
            HostEntity::Platform {
                footprint,
                height,
                color,
            },
        );
        self.calls.push(HostCall::AddPlatform(id));
    }

    fn set_platform_height(&mut self, id: EntityId, height: f64) {
        if let Some(HostEntity::Platform { height: h, .. }) = self.entities.get_mut(&id) {
            *h = height;
        }
        self.calls.push(HostCall::SetPlatformHeight(id, height));
    }

    fn add_marker(&mut self, id: EntityId, pos: DVec3, _style: &MarkerStyle) {
        self.entities.insert(id, HostEntity::Marker { pos });
        self.calls.push(HostCall::AddMarker(id, pos));
    }

    fn has_entity(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    fn remove_entity(&mut self, id: EntityId) {
        self.entities.remove(&id);
        self.calls.push(HostCall::Remove(id));
    }

    fn clear_entities(&mut self) {
        self.entities.clear();
        self.calls.push(HostCall::Clear);
    }

    fn fly_to(&mut self, targets: &[EntityId], view: CameraView) {
        self.calls.push(HostCall::FlyTo(targets.to_vec(), view));
    }

    fn fly_to_all(&mut self, view: CameraView) {
        self.calls.push(HostCall::FlyToAll(view));
    }

    fn attach_input(&mut self) {
        self.input_attached = true;
        self.calls.push(HostCall::AttachInput);
    }

    fn detach_input(&mut self) {
        self.input_attached = false;
        self.calls.push(HostCall::DetachInput);
    }
}
