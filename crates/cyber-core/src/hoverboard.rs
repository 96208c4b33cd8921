//! Rideable hoverboard: free flight replacing player physics while
//! mounted, idle bobbing while parked.

use glam::Vec3;

use crate::constants::PLAYER_HEIGHT;
use crate::physics::{Camera, MoveIntent};
use crate::state::GameState;

/// Horizontal flight speed in m/s.
const FLY_SPEED: f32 = 24.0;

/// Vertical flight speed in m/s.
const VERTICAL_SPEED: f32 = 10.0;

/// Idle bob frequency in rad/s.
const BOB_FREQ: f32 = 2.0;

const BOB_AMPLITUDE: f32 = 0.06;

/// The hoverboard and its mount state.
#[derive(Debug, Clone)]
pub struct Hoverboard {
    pub mounted: bool,
    /// Board position while parked (hidden under the player while mounted).
    pub position: Vec3,
    home_y: f32,
    bob_timer: f32,
}

impl Hoverboard {
    pub fn new() -> Self {
        Self {
            mounted: false,
            position: Vec3::ZERO,
            home_y: 0.0,
            bob_timer: 0.0,
        }
    }

    /// Parks the board at a world position.
    pub fn place(&mut self, position: Vec3) {
        self.position = position;
        self.home_y = position.y;
    }

    /// Mounts the board. Repeat mounts are no-ops.
    pub fn mount(&mut self, state: &mut GameState) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        tracing::debug!("hoverboard mounted");
        state.notify("HOVERBOARD ACTIVE — WASD fly · SPACE up · SHIFT down · [E] dismount");
    }

    /// Dismounts and parks the board under the camera.
    pub fn dismount(&mut self, camera: &Camera) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.position = Vec3::new(
            camera.position.x,
            camera.position.y - PLAYER_HEIGHT + 0.1,
            camera.position.z,
        );
        self.home_y = self.position.y;
    }

    /// While mounted, flies the camera; while parked, bobs in place.
    pub fn update(
        &mut self,
        delta: f32,
        intent: MoveIntent,
        ascend: bool,
        descend: bool,
        camera: &mut Camera,
    ) {
        if !self.mounted {
            self.bob_timer += delta;
            self.position.y = self.home_y + (self.bob_timer * BOB_FREQ).sin() * BOB_AMPLITUDE;
            return;
        }

        // Camera forward projected to the horizontal plane.
        let mut forward = camera.forward();
        forward.y = 0.0;
        if forward.length_squared() < 0.001 {
            forward = Vec3::NEG_Z;
        }
        let forward = forward.normalize();
        let right = forward.cross(Vec3::Y).normalize();

        let mut step = forward * intent.forward + right * intent.right;
        if step.length_squared() > 0.0 {
            step = step.normalize() * (FLY_SPEED * delta);
        }
        camera.position += step;

        if ascend {
            camera.position.y += VERTICAL_SPEED * delta;
        }
        if descend {
            camera.position.y -= VERTICAL_SPEED * delta;
        }

        // Never sink below standing height.
        camera.position.y = camera.position.y.max(PLAYER_HEIGHT);
    }
}

impl Default for Hoverboard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_parked_board_bobs() {
        let mut board = Hoverboard::new();
        board.place(Vec3::new(-8.0, 36.35, 2.0));
        let mut camera = Camera::at(Vec3::new(0.0, 37.7, 8.0));

        let mut ys = Vec::new();
        // Long enough to cover a full bob period (π seconds).
        for _ in 0..240 {
            board.update(DT, MoveIntent::default(), false, false, &mut camera);
            ys.push(board.position.y);
        }
        let min = ys.iter().copied().fold(f32::INFINITY, f32::min);
        let max = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(max > 36.35 && min < 36.35);
        assert!(max - min <= 2.0 * BOB_AMPLITUDE + 1e-4);
        // Camera untouched while parked.
        assert_eq!(camera.position, Vec3::new(0.0, 37.7, 8.0));
    }

    #[test]
    fn test_mounted_flight_moves_camera() {
        let mut board = Hoverboard::new();
        let mut state = GameState::new();
        board.mount(&mut state);

        let mut camera = Camera::at(Vec3::new(0.0, 37.7, 8.0));
        board.update(
            DT,
            MoveIntent {
                forward: 1.0,
                right: 0.0,
            },
            true,
            false,
            &mut camera,
        );

        assert!((camera.position.z - (8.0 - FLY_SPEED * DT)).abs() < 1e-4);
        assert!((camera.position.y - (37.7 + VERTICAL_SPEED * DT)).abs() < 1e-4);
    }

    #[test]
    fn test_descend_clamps_at_standing_height() {
        let mut board = Hoverboard::new();
        let mut state = GameState::new();
        board.mount(&mut state);

        let mut camera = Camera::at(Vec3::new(0.0, PLAYER_HEIGHT + 0.05, 0.0));
        for _ in 0..60 {
            board.update(DT, MoveIntent::default(), false, true, &mut camera);
        }
        assert_eq!(camera.position.y, PLAYER_HEIGHT);
    }

    #[test]
    fn test_dismount_parks_under_camera() {
        let mut board = Hoverboard::new();
        let mut state = GameState::new();
        board.mount(&mut state);

        let camera = Camera::at(Vec3::new(3.0, 40.0, -2.0));
        board.dismount(&camera);
        assert!(!board.mounted);
        assert_eq!(board.position.x, 3.0);
        assert_eq!(board.position.z, -2.0);
        assert!(board.position.y < 40.0);
    }
}
