//! Cyber Tower Core Library
//!
//! Headless simulation for the first-person tower game: player physics,
//! the throwable ball, rooms with moving platforms, raycast interaction
//! picking, the elevator, and the ambient systems (fireworks, weapon,
//! hoverboard) — all driven from a single per-frame tick.
//!
//! Rendering and input live behind the Bevy integration in [`bevy`];
//! everything else runs and tests without a window.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod ball;
pub mod bevy;
pub mod collide;
pub mod constants;
pub mod driver;
pub mod elevator;
pub mod fireworks;
pub mod fragments;
pub mod hoverboard;
pub mod interaction;
pub mod physics;
pub mod room;
pub mod state;
pub mod weapon;

pub use ball::{BALL_RADIUS, Ball, Glitter};
pub use collide::Aabb;
pub use constants::Color;
pub use driver::{FrameInput, Tower};
pub use elevator::{Elevator, ElevatorStep};
pub use fireworks::Fireworks;
pub use hoverboard::Hoverboard;
pub use interaction::{INTERACT_RANGE, InteractionSystem};
pub use physics::{Camera, MoveIntent, PlayerPhysics};
pub use room::{Interactable, Interaction, MovingPlatform, PlatformAxis, Prop, Room};
pub use state::{
    FRAGMENT_TOTAL, FRAGMENTS_PER_FLOOR, Floor, FragmentId, GameEvent, GameState, SubscriberId,
    Terminal,
};
pub use weapon::WeaponSystem;
