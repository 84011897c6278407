//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-interval ticks only
//! - Seeded RNG only
//! - No map host dependencies

pub mod arc;
pub mod state;
pub mod tick;

pub use arc::{JumpArc, Landing, classify_landing, project_axis};
pub use state::{
    Charge, EntityId, Flight, Footprint, GameEvent, GamePhase, JumpDirection, Platform, RngState,
    Session, next_target_pos, random_color, random_gap,
};
pub use tick::{FlightStep, Timer};
