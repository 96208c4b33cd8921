//! Test utilities for headless Bevy integration tests.
//!
//! `TestApp` wraps `bevy::app::App` with `MinimalPlugins` plus
//! `TowerHeadlessPlugin`, so game logic runs without a rendering or
//! windowing backend. Deterministic simulation behavior is covered by
//! the core module tests, which drive `Tower::tick` directly; these
//! helpers exercise the ECS wiring.

use bevy::prelude::*;

use crate::bevy::messages::CoreEvent;
use crate::bevy::plugin::TowerHeadlessPlugin;
use crate::bevy::resources::TowerSim;
use crate::state::GameEvent;

pub(crate) struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Creates a headless app with the default seed.
    pub fn new() -> Self {
        Self::with_seed(12345)
    }

    pub fn with_seed(seed: u64) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(bevy::input::InputPlugin);
        app.add_plugins(TowerHeadlessPlugin { seed });
        // One update to initialize resources and run startup schedules.
        app.update();
        Self { app }
    }

    /// Runs a single frame.
    pub fn update(&mut self) {
        self.app.update();
    }

    pub fn sim(&self) -> &TowerSim {
        self.app.world().resource::<TowerSim>()
    }

    pub fn sim_mut(&mut self) -> Mut<'_, TowerSim> {
        self.app.world_mut().resource_mut::<TowerSim>()
    }

    /// Removes and returns all buffered core-event messages.
    pub fn drain_core_events(&mut self) -> Vec<GameEvent> {
        self.app
            .world_mut()
            .resource_mut::<Messages<CoreEvent>>()
            .drain()
            .map(|CoreEvent(event)| event)
            .collect()
    }
}
