//! Bevy ECS integration for the tower simulation.
//!
//! `TowerHeadlessPlugin` wires the headless core into an app without any
//! rendering or window dependencies, so game logic runs under
//! `MinimalPlugins` in tests. `TowerRenderPlugin` adds scene setup,
//! visual sync and the HUD on top.

pub mod messages;
pub mod plugin;
pub mod resources;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use messages::CoreEvent;
pub use plugin::{TowerHeadlessPlugin, TowerRenderPlugin};
pub use resources::{ActiveTerminal, EventBridge, MouseSensitivity, PendingInput, TowerSim};
