//! Bevy plugins for the tower game.
//!
//! Provides:
//! - `TowerHeadlessPlugin`: logic-only plugin (no rendering/window
//!   dependencies) for headless testing
//! - `TowerRenderPlugin`: scene, visual sync and HUD on top of the
//!   headless plugin

use std::sync::Arc;

use bevy::prelude::*;

use crate::bevy::messages::CoreEvent;
use crate::bevy::resources::{ActiveTerminal, EventBridge, MouseSensitivity, PendingInput, TowerSim};
use crate::bevy::systems;
use crate::driver::Tower;

/// Headless plugin containing all game logic without rendering or
/// window dependencies. Use with `MinimalPlugins` plus `InputPlugin`
/// in tests.
pub struct TowerHeadlessPlugin {
    pub seed: u64,
}

impl Default for TowerHeadlessPlugin {
    fn default() -> Self {
        Self { seed: 12345 }
    }
}

impl Plugin for TowerHeadlessPlugin {
    fn build(&self, app: &mut App) {
        let bridge = EventBridge::default();
        let mut tower = Tower::new(self.seed);

        // Core events land in the shared bridge; a system forwards them
        // as ECS messages every frame.
        let sink = Arc::clone(&bridge.0);
        tower.state.subscribe(move |event| sink.lock().push(event.clone()));

        app.insert_resource(TowerSim(tower))
            .insert_resource(bridge)
            .init_resource::<PendingInput>()
            .init_resource::<MouseSensitivity>()
            .init_resource::<ActiveTerminal>();

        app.add_message::<CoreEvent>();

        app.add_systems(
            Update,
            (
                systems::collect_input,
                systems::drive_simulation,
                systems::forward_core_events,
                systems::track_terminal,
                systems::terminal_input,
            )
                .chain(),
        );
    }
}

/// Full plugin: headless logic plus scene rendering and the HUD.
pub struct TowerRenderPlugin;

impl Plugin for TowerRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (systems::setup_scene, systems::setup_hud));
        app.add_systems(
            Update,
            (
                systems::sync_room,
                systems::sync_dynamic,
                systems::sync_camera,
                systems::draw_particles,
                systems::update_prompt,
                systems::update_fragment_counter,
                systems::update_notifications,
                systems::update_terminal,
                systems::update_fade,
            )
                .after(systems::terminal_input),
        );
    }
}

#[cfg(test)]
mod tests {
    use crate::bevy::test_utils::TestApp;
    use crate::state::{Floor, GameEvent, Terminal};

    use super::*;

    #[test]
    fn test_headless_app_boots_and_ticks() {
        let mut app = TestApp::new();
        app.update();
        app.update();

        // The driver ran with real frame deltas.
        let sim = app.sim();
        assert!(sim.0.time >= 0.0);
        assert_eq!(sim.0.state.current_floor, Floor::Lobby);
    }

    #[test]
    fn test_core_events_forwarded_as_messages() {
        let mut app = TestApp::new();
        app.update();

        app.sim_mut().0.state.unlock_floor(Floor::Pixel);
        app.update();

        let events = app.drain_core_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::FloorUnlocked(Floor::Pixel)))
        );
    }

    #[test]
    fn test_terminal_tracking() {
        let mut app = TestApp::new();
        app.update();

        app.sim_mut().0.state.open_terminal(Terminal::FloorSelect);
        app.update();
        assert_eq!(
            app.app.world().resource::<ActiveTerminal>().0,
            Some(Terminal::FloorSelect)
        );

        app.sim_mut().0.state.close_terminal();
        app.update();
        assert_eq!(app.app.world().resource::<ActiveTerminal>().0, None);
    }
}
