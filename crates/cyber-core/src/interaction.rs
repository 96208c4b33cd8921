//! Camera-ray picking over the registered interactables.
//!
//! The registry is cleared and rebuilt on every room switch. Each frame
//! a single ray from the camera center picks the nearest registered
//! volume; activation resolves to that registration's action.

use crate::physics::Camera;
use crate::room::{Interactable, Interaction};
use crate::state::GameState;

/// Maximum reach of the interaction ray.
pub const INTERACT_RANGE: f32 = 4.5;

/// Raycast picking registry.
#[derive(Debug, Default)]
pub struct InteractionSystem {
    registered: Vec<Interactable>,
    current: Option<usize>,
}

impl InteractionSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an interactable for the active room.
    pub fn register(&mut self, item: Interactable) {
        self.registered.push(item);
    }

    /// Drops every registration. Called on room switches; no incremental
    /// diffing, counts per room are small.
    pub fn clear(&mut self) {
        self.registered.clear();
        self.current = None;
    }

    pub fn len(&self) -> usize {
        self.registered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }

    /// Re-picks the current target. Skipped (and the target dropped)
    /// while paused or a terminal overlay is open.
    pub fn update(&mut self, camera: &Camera, state: &GameState) {
        if state.paused || state.terminal_open || self.registered.is_empty() {
            self.current = None;
            return;
        }

        let origin = camera.position;
        let dir = camera.forward();

        let mut best: Option<(f32, usize)> = None;
        for (index, item) in self.registered.iter().enumerate() {
            for volume in &item.volumes {
                if let Some(distance) = volume.ray_hit(origin, dir, INTERACT_RANGE) {
                    if best.is_none_or(|(b, _)| distance < b) {
                        best = Some((distance, index));
                    }
                }
            }
        }
        self.current = best.map(|(_, index)| index);
    }

    /// Whether the host HUD should show the interact prompt.
    pub fn prompt_visible(&self) -> bool {
        self.current.is_some()
    }

    /// The currently highlighted registration, if any.
    pub fn current(&self) -> Option<&Interactable> {
        self.current.map(|index| &self.registered[index])
    }

    /// Resolves an activation press to the picked action. With no
    /// target this is a no-op returning `None`.
    pub fn activate(&self) -> Option<Interaction> {
        self.current.map(|index| self.registered[index].action)
    }
}
