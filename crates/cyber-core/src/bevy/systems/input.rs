//! Keyboard and mouse collection into a [`FrameInput`].

use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;

use crate::bevy::resources::{ActiveTerminal, MouseSensitivity, PendingInput, TowerSim};
use crate::driver::FrameInput;
use crate::physics::MoveIntent;
use crate::state::{Floor, Terminal};

/// Pitch limit, shy of straight up/down.
const PITCH_LIMIT: f32 = 1.4;

fn key_axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Builds the frame's [`FrameInput`], applies mouse look to the
/// simulation camera and handles the pause/focus keys.
pub fn collect_input(
    keys: Res<ButtonInput<KeyCode>>,
    buttons: Res<ButtonInput<MouseButton>>,
    mouse: Res<AccumulatedMouseMotion>,
    sensitivity: Res<MouseSensitivity>,
    mut pending: ResMut<PendingInput>,
    mut sim: ResMut<TowerSim>,
) {
    let tower = &mut sim.0;

    // Click grabs focus, Escape releases it (or closes the terminal).
    if buttons.just_pressed(MouseButton::Left)
        && tower.state.paused
        && !tower.state.terminal_open
    {
        tower.state.paused = false;
    }
    if keys.just_pressed(KeyCode::Escape) {
        if tower.state.terminal_open {
            tower.state.close_terminal();
        } else {
            tower.state.paused = true;
        }
    }

    // Mouse look goes straight onto the simulation camera.
    let delta = mouse.delta;
    if delta != Vec2::ZERO && !tower.state.paused && !tower.state.terminal_open {
        tower.camera.yaw -= delta.x * sensitivity.0;
        tower.camera.pitch =
            (tower.camera.pitch - delta.y * sensitivity.0).clamp(-PITCH_LIMIT, PITCH_LIMIT);
    }

    pending.0 = FrameInput {
        movement: MoveIntent {
            forward: key_axis(keys.pressed(KeyCode::KeyW), keys.pressed(KeyCode::KeyS)),
            right: key_axis(keys.pressed(KeyCode::KeyD), keys.pressed(KeyCode::KeyA)),
        },
        jump: keys.just_pressed(KeyCode::Space),
        toggle_ball: keys.just_pressed(KeyCode::KeyF),
        interact: keys.just_pressed(KeyCode::KeyE),
        fire: buttons.pressed(MouseButton::Left),
        ascend: keys.pressed(KeyCode::Space),
        descend: keys.pressed(KeyCode::ShiftLeft) || keys.pressed(KeyCode::ShiftRight),
    };
}

/// Keyboard handling while a terminal overlay is open: digits pick a
/// floor on the elevator panel, Enter completes a puzzle terminal.
pub fn terminal_input(
    keys: Res<ButtonInput<KeyCode>>,
    active: Res<ActiveTerminal>,
    mut sim: ResMut<TowerSim>,
) {
    let Some(terminal) = active.0 else {
        return;
    };
    match terminal {
        Terminal::FloorSelect => {
            const DIGITS: [KeyCode; 5] = [
                KeyCode::Digit1,
                KeyCode::Digit2,
                KeyCode::Digit3,
                KeyCode::Digit4,
                KeyCode::Digit5,
            ];
            for (index, key) in DIGITS.into_iter().enumerate() {
                if keys.just_pressed(key) {
                    sim.0.select_floor(Floor::ALL[index]);
                    return;
                }
            }
        }
        Terminal::Puzzle(floor) => {
            if keys.just_pressed(KeyCode::Enter) {
                sim.0.solve_puzzle(floor);
            }
        }
    }
}
