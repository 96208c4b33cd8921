//! Frame driver: one simulation tick per rendered frame.

use bevy::prelude::*;

use crate::bevy::messages::CoreEvent;
use crate::bevy::resources::{ActiveTerminal, EventBridge, PendingInput, TowerSim};
use crate::state::GameEvent;

/// Advances the simulation with the frame's collected input and the
/// render delta. The core clamps oversized deltas itself.
pub fn drive_simulation(
    time: Res<Time>,
    pending: Res<PendingInput>,
    mut sim: ResMut<TowerSim>,
) {
    sim.0.tick(&pending.0, time.delta_secs());
}

/// Drains the core event bridge into buffered ECS messages.
pub fn forward_core_events(bridge: Res<EventBridge>, mut writer: MessageWriter<CoreEvent>) {
    for event in bridge.0.lock().drain(..) {
        writer.write(CoreEvent(event));
    }
}

/// Mirrors terminal open/close events into [`ActiveTerminal`].
pub fn track_terminal(
    mut reader: MessageReader<CoreEvent>,
    mut active: ResMut<ActiveTerminal>,
) {
    for CoreEvent(event) in reader.read() {
        match event {
            GameEvent::TerminalOpened(terminal) => active.0 = Some(*terminal),
            GameEvent::TerminalClosed => active.0 = None,
            _ => {}
        }
    }
}
