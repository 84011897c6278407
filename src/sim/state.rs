//! Session state and core simulation types
//!
//! Everything the engine mutates during play lives in `Session`; the map host
//! only ever receives projections of it.

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arc::JumpArc;
use super::tick::Timer;
use crate::settings::{Color, GameOptions};

/// Stable handle for an entity placed on the map host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// Direction of the next jump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JumpDirection {
    /// Toward increasing longitude
    East,
    /// Toward increasing latitude
    North,
}

impl JumpDirection {
    /// Coin flip between the two directions
    pub fn random(rng: &mut impl Rng) -> Self {
        if rng.random_range(0..=1) == 0 {
            JumpDirection::East
        } else {
            JumpDirection::North
        }
    }

    /// Index of the varying component in a `[lon, lat]` pair
    #[inline]
    pub fn axis(&self) -> usize {
        match self {
            JumpDirection::East => 0,
            JumpDirection::North => 1,
        }
    }

    /// Coordinate along the jump axis
    #[inline]
    pub fn along(&self, pos: DVec2) -> f64 {
        pos[self.axis()]
    }

    /// Copy of `pos` with the jump-axis component replaced
    #[inline]
    pub fn with_along(&self, pos: DVec2, value: f64) -> DVec2 {
        let mut out = pos;
        out[self.axis()] = value;
        out
    }

    /// Camera heading used to frame a jump in this direction
    pub fn camera_heading_deg(&self) -> f64 {
        match self {
            JumpDirection::East => 0.0,
            JumpDirection::North => -90.0,
        }
    }
}

/// Axis-aligned platform footprint in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Footprint {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

/// A square extruded platform on the map
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: EntityId,
    /// Center `(lon, lat)` in degrees
    pub pos: DVec2,
    /// Current extruded height; squashed while charging
    pub height: f64,
    pub color: Color,
}

impl Platform {
    pub fn footprint(&self, width_half: f64) -> Footprint {
        Footprint {
            west: self.pos.x - width_half,
            south: self.pos.y - width_half,
            east: self.pos.x + width_half,
            north: self.pos.y + width_half,
        }
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Not started, or cleared by a reset
    Idle,
    /// Marker resting on the source, waiting for a press
    Spawned,
    /// Input held, charge speed accumulating
    Charging,
    /// Input released, marker in the air
    Flying,
    /// Missed landing; input detached until reset
    GameOver,
}

/// Lifecycle events for the host UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    GameStart,
    GameOver,
}

/// Charge accumulator, alive only while `Charging`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Charge {
    pub timer: Timer,
    /// Completed charge ticks since the press
    pub ticks: u32,
}

/// In-progress flight, alive only while `Flying`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub timer: Timer,
    pub direction: JumpDirection,
    /// Source coordinate along the jump axis
    pub start: f64,
    /// Where the player's timing lands the marker
    pub end: f64,
    /// Center of the target along the jump axis
    pub true_end: f64,
    /// Marker coordinate along the jump axis, stepped every tick
    pub current: f64,
    pub arc: JumpArc,
}

/// RNG state wrapper for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Mutable state of one game session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub phase: GamePhase,
    /// Platform the marker stands on
    pub source: Option<Platform>,
    /// Platform the marker must land on
    pub target: Option<Platform>,
    pub direction: JumpDirection,
    /// Per-flight travel distance along the jump axis (degrees)
    pub speed: f64,
    pub charge: Option<Charge>,
    pub flight: Option<Flight>,
    /// Successful landings this session
    pub score: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: GamePhase::Idle,
            source: None,
            target: None,
            direction: JumpDirection::East,
            speed: 0.0,
            charge: None,
            flight: None,
            score: 0,
        }
    }
}

impl Session {
    /// Drop platforms and any running timer
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when a charge or flight timer is live
    pub fn has_active_timer(&self) -> bool {
        self.charge.is_some() || self.flight.is_some()
    }
}

/// Random gap to the next platform, in degrees
pub fn random_gap(rng: &mut impl Rng, options: &GameOptions) -> f64 {
    let steps = rng.random_range(options.distance.min..=options.distance.max);
    steps as f64 / options.distance.scale
}

/// Next target center: `source` moved by `gap` along `direction`
pub fn next_target_pos(source: DVec2, direction: JumpDirection, gap: f64) -> DVec2 {
    direction.with_along(source, direction.along(source) + gap)
}

/// Opaque random material color
pub fn random_color(rng: &mut impl Rng) -> Color {
    Color::rgb(rng.random(), rng.random(), rng.random())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_direction_axes() {
        let pos = DVec2::new(113.1805, 23.1205);
        assert_eq!(JumpDirection::East.along(pos), 113.1805);
        assert_eq!(JumpDirection::North.along(pos), 23.1205);
        assert_eq!(
            JumpDirection::North.with_along(pos, 24.0),
            DVec2::new(113.1805, 24.0)
        );
    }

    #[test]
    fn test_direction_is_roughly_fair() {
        let mut rng = RngState::new(7).to_rng();
        let east = (0..1000)
            .filter(|_| JumpDirection::random(&mut rng) == JumpDirection::East)
            .count();
        assert!((400..600).contains(&east), "east={east}");
    }

    #[test]
    fn test_footprint() {
        let platform = Platform {
            id: EntityId(1),
            pos: DVec2::new(10.0, 20.0),
            height: 50.0,
            color: Color::WHITE,
        };
        let fp = platform.footprint(0.5);
        assert_eq!(fp.west, 9.5);
        assert_eq!(fp.east, 10.5);
        assert_eq!(fp.south, 19.5);
        assert_eq!(fp.north, 20.5);
    }

    #[test]
    fn test_session_clear_drops_timers() {
        let mut session = Session {
            phase: GamePhase::Charging,
            charge: Some(Charge {
                timer: Timer::new(100),
                ticks: 3,
            }),
            score: 4,
            ..Default::default()
        };
        assert!(session.has_active_timer());
        session.clear();
        assert!(!session.has_active_timer());
        assert_eq!(session.phase, GamePhase::Idle);
        assert_eq!(session.score, 0);
    }

    proptest! {
        #[test]
        fn prop_gap_within_range(seed in any::<u64>(), min in 1u32..100, span in 0u32..100) {
            let mut options = GameOptions::default();
            options.distance.min = min;
            options.distance.max = min + span;
            let mut rng = RngState::new(seed).to_rng();
            let gap = random_gap(&mut rng, &options);
            prop_assert!(gap >= options.min_gap());
            prop_assert!(gap <= options.max_gap());
        }

        #[test]
        fn prop_only_jump_axis_changes(
            lon in -179.0f64..179.0,
            lat in -80.0f64..80.0,
            gap in 0.0015f64..0.0045,
            east in any::<bool>(),
        ) {
            let direction = if east { JumpDirection::East } else { JumpDirection::North };
            let source = DVec2::new(lon, lat);
            let target = next_target_pos(source, direction, gap);
            match direction {
                JumpDirection::East => {
                    prop_assert_eq!(target.y, source.y);
                    prop_assert!(target.x > source.x);
                }
                JumpDirection::North => {
                    prop_assert_eq!(target.x, source.x);
                    prop_assert!(target.y > source.y);
                }
            }
        }
    }
}
