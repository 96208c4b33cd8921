//! Cyber Adventure Engine
//!
//! Headless engine for the point-and-click adventure: scene registry,
//! dialog state machine, puzzle validators with the curriculum's answer
//! keys, and JSON save persistence behind a storage trait. Everything
//! visual (scene art, typing animation, portraits) belongs to the host.

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod dialog;
pub mod engine;
pub mod puzzle;
pub mod scene;
pub mod state;

pub use dialog::{Choice, Dialog, DialogOutcome, Line, Speaker};
pub use engine::{AdventureEvent, Engine};
pub use puzzle::{Layer, Move, Puzzle, QuizQuestion, Rule, StepOutcome, TuringMachine};
pub use scene::{Hotspot, HotspotAction, SceneId};
pub use state::{AdventureState, MemoryStore, SAVE_KEY, SaveError, SaveStore};
