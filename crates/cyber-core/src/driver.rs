//! Per-frame orchestration of the tower simulation.
//!
//! `Tower::tick` is the single entry point the host loop calls once per
//! rendered frame. Gameplay systems (physics, picking, ball) are gated
//! on pause/terminal state; ambient systems (room animation, platform
//! kinematics, fireworks, weapon) run unconditionally so background
//! motion continues behind menus and overlays.

use glam::Vec3;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::ball::Ball;
use crate::constants::{Color, MAX_DELTA};
use crate::elevator::{Elevator, ElevatorStep};
use crate::fireworks::Fireworks;
use crate::hoverboard::Hoverboard;
use crate::interaction::InteractionSystem;
use crate::physics::{Camera, MoveIntent, PlayerPhysics};
use crate::room::{Interaction, Room};
use crate::state::{Floor, GameState, Terminal};
use crate::weapon::WeaponSystem;

/// Everything the host collected from input devices for one frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameInput {
    pub movement: MoveIntent,
    pub jump: bool,
    pub toggle_ball: bool,
    pub interact: bool,
    pub fire: bool,
    pub ascend: bool,
    pub descend: bool,
}

/// The complete tower simulation.
pub struct Tower {
    pub state: GameState,
    pub camera: Camera,
    pub physics: PlayerPhysics,
    pub ball: Ball,
    pub interaction: InteractionSystem,
    pub elevator: Elevator,
    pub fireworks: Fireworks,
    pub weapon: WeaponSystem,
    pub hoverboard: Hoverboard,
    /// Simulation clock, threaded into every time-dependent update.
    pub time: f32,
    rooms: Vec<Room>,
    rng: ChaCha8Rng,
}

impl Tower {
    /// Builds the whole tower. All randomness derives from `seed`.
    pub fn new(seed: u64) -> Self {
        let mut master = ChaCha8Rng::seed_from_u64(seed);
        let state = GameState::new();

        let mut room_rng = ChaCha8Rng::seed_from_u64(master.random());
        let rooms = Floor::ALL
            .iter()
            .map(|&floor| Room::build(floor, &mut room_rng, &state))
            .collect();

        let mut hoverboard = Hoverboard::new();
        hoverboard.place(Vec3::new(-8.0, Floor::Roof.floor_y() + 0.35, 2.0));

        let mut fireworks = Fireworks::new(master.random());
        fireworks.set_origin(Vec3::new(0.0, Floor::Roof.floor_y(), 0.0));

        let mut tower = Self {
            state,
            camera: Camera::at(Vec3::ZERO),
            physics: PlayerPhysics::new(),
            ball: Ball::new(master.random()),
            interaction: InteractionSystem::new(),
            elevator: Elevator::new(),
            fireworks,
            weapon: WeaponSystem::new(master.random()),
            hoverboard,
            time: 0.0,
            rooms,
            rng: master,
        };
        tower.switch_room(Floor::Lobby);
        tower
    }

    /// The room the player is currently in.
    pub fn active_room(&self) -> &Room {
        &self.rooms[self.active_index()]
    }

    fn active_index(&self) -> usize {
        let floor = self.state.current_floor;
        Floor::ALL
            .iter()
            .position(|&f| f == floor)
            .expect("current floor is always one of Floor::ALL")
    }

    /// Moves the player to a floor: rebinds colliders and interactables,
    /// auto-catches the ball, repositions the camera at the spawn.
    pub fn switch_room(&mut self, floor: Floor) {
        tracing::info!(floor = floor.name(), "switching room");
        self.state.set_floor(floor);
        let index = self.active_index();

        self.interaction.clear();
        for item in &self.rooms[index].interactables {
            self.interaction.register(item.clone());
        }

        // The ball never stays behind in another room.
        self.ball.force_catch();

        self.camera.position = self.rooms[index].spawn_point();
        self.physics.velocity_y = 0.0;
    }

    /// Advances the simulation by one frame.
    pub fn tick(&mut self, input: &FrameInput, delta: f32) {
        let delta = delta.min(MAX_DELTA);
        self.time += delta;

        if let ElevatorStep::SwitchRoom(floor) = self.elevator.update(delta, &mut self.state) {
            self.switch_room(floor);
        }

        let index = self.active_index();
        let gameplay = !self.state.paused && !self.state.terminal_open;

        if gameplay {
            if input.jump && !self.hoverboard.mounted {
                self.physics.jump();
            }
            if input.toggle_ball {
                self.ball.toggle(&self.camera);
            }
            if input.fire {
                self.weapon.try_fire(&self.camera);
            }

            if self.hoverboard.mounted {
                self.hoverboard.update(
                    delta,
                    input.movement,
                    input.ascend,
                    input.descend,
                    &mut self.camera,
                );
            } else {
                let room = &self.rooms[index];
                self.physics.update(
                    &mut self.camera,
                    input.movement,
                    delta,
                    &room.colliders,
                    room.floor_y,
                    &room.platforms,
                );
                // Parked board keeps bobbing.
                self.hoverboard
                    .update(delta, MoveIntent::default(), false, false, &mut self.camera);
            }

            self.interaction.update(&self.camera, &self.state);
            if input.interact {
                if self.hoverboard.mounted {
                    self.hoverboard.dismount(&self.camera);
                    self.physics.velocity_y = 0.0;
                } else if let Some(action) = self.interaction.activate() {
                    self.apply(action);
                }
            }

            let room = &self.rooms[index];
            self.ball.update(delta, &room.colliders, room.floor_y);
        } else if !self.hoverboard.mounted {
            self.hoverboard
                .update(delta, MoveIntent::default(), false, false, &mut self.camera);
        }

        // Ambience runs regardless of pause state.
        let room = &mut self.rooms[index];
        room.update(delta);
        room.update_platforms(self.time);
        self.fireworks.update(delta);
        self.weapon
            .update(delta, self.camera.position, &mut self.state);
    }

    /// Dispatches a picked interaction.
    fn apply(&mut self, action: Interaction) {
        match action {
            Interaction::Fragment(id) => {
                if self.state.is_collected(id) {
                    return;
                }
                let index = self.active_index();
                let room = &mut self.rooms[index];
                if let Some(marker) = room.fragment_markers.iter().find(|m| m.id == id).copied() {
                    room.spawn_burst(marker.position, Color::NEON_GREEN, &mut self.rng);
                    room.remove_fragment_marker(id);
                }
                self.state.collect_fragment(id);
            }
            Interaction::ElevatorPanel => self.state.open_terminal(Terminal::FloorSelect),
            Interaction::PuzzleTerminal(floor) => {
                self.state.open_terminal(Terminal::Puzzle(floor));
            }
            Interaction::Hoverboard => self.hoverboard.mount(&mut self.state),
            Interaction::DataCore => self.weapon.activate(&mut self.state),
        }
    }

    /// Host hook: a floor was chosen on the floor-select terminal.
    pub fn select_floor(&mut self, to: Floor) {
        self.state.close_terminal();
        self.elevator.call(to, &mut self.state);
    }

    /// Host hook: a gating puzzle terminal was completed.
    pub fn solve_puzzle(&mut self, floor: Floor) {
        self.state.close_terminal();
        self.state.solve_puzzle(floor);
    }

    /// Debug bypass, equivalent of the `?unlock=1337` URL parameter.
    /// Celebrates with a small fireworks salvo like the shipped game.
    pub fn unlock_all(&mut self) {
        self.state.unlock_all();
        self.fireworks
            .set_origin(Vec3::new(0.0, self.active_room().floor_y, 0.0));
        self.fireworks.launch(3);
    }
}
