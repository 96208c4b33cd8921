//! ECS resources wrapping the headless simulation.

use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::driver::{FrameInput, Tower};
use crate::state::{GameEvent, Terminal};

/// The headless simulation as a Bevy resource. All systems go through
/// this single owner; there is no second copy of any game state.
#[derive(Resource)]
pub struct TowerSim(pub Tower);

/// Buffer the core event subscription writes into, drained into Bevy
/// messages once per frame by `forward_core_events`.
#[derive(Resource, Clone, Default)]
pub struct EventBridge(pub Arc<Mutex<Vec<GameEvent>>>);

/// Mouse look sensitivity in radians per pixel.
#[derive(Resource)]
pub struct MouseSensitivity(pub f32);

impl Default for MouseSensitivity {
    fn default() -> Self {
        Self(0.0025)
    }
}

/// Input collected this frame for the next simulation tick.
#[derive(Resource, Default)]
pub struct PendingInput(pub FrameInput);

/// Which terminal overlay is currently open, tracked from core events
/// so input and HUD systems can react to it.
#[derive(Resource, Default)]
pub struct ActiveTerminal(pub Option<Terminal>);
