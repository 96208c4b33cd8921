//! ECS messages for the tower game.
//!
//! Core events cross into the ECS as buffered messages so any number of
//! UI systems can observe them independently.

use bevy::prelude::*;

use crate::state::GameEvent;

/// A core game event forwarded into the ECS.
#[derive(Message, Debug, Clone)]
pub struct CoreEvent(pub GameEvent);
