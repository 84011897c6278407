//! Engine error type
//!
//! A missed jump is a normal game outcome and never shows up here. These are
//! contract violations: bad options, or an operation called in the wrong phase.

use thiserror::Error;

use crate::sim::GamePhase;

#[derive(Debug, Error)]
pub enum GameError {
    /// Options failed validation
    #[error("invalid game options: {0}")]
    InvalidOptions(String),

    /// Operation is not allowed in the current phase
    #[error("`{op}` is not allowed while {phase:?}")]
    OutOfPhase { op: &'static str, phase: GamePhase },

    /// Input arrived while no input handler is attached (before start, after game over)
    #[error("input handler is detached")]
    InputDetached,

    #[error("failed to parse options: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read options: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
