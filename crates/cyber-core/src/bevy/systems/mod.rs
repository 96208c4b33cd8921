//! Systems driving and rendering the tower simulation.

pub mod hud;
pub mod input;
pub mod sync;
pub mod tick;

pub use hud::{
    setup_hud, update_fade, update_fragment_counter, update_notifications, update_prompt,
    update_terminal,
};
pub use input::{collect_input, terminal_input};
pub use sync::{draw_particles, setup_scene, sync_camera, sync_dynamic, sync_room};
pub use tick::{drive_simulation, forward_core_events, track_terminal};
