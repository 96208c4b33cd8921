//! Elevator floor transitions: unlock gating plus a timed fade sequence.
//!
//! The whole transition runs inside the simulation clock, so the host
//! only renders the overlay alpha and floor card it is handed. Gameplay
//! is paused for the duration.

use crate::state::{Floor, GameEvent, GameState};

const FADE_OUT: f32 = 0.5;
const CARD: f32 = 0.8;
const HOLD: f32 = 0.4;
const FADE_IN: f32 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    Idle,
    FadeOut { remaining: f32 },
    Card { remaining: f32 },
    Hold { remaining: f32 },
    FadeIn { remaining: f32 },
}

/// What the driver must do as a result of an elevator step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElevatorStep {
    None,
    /// Perform the room switch now, behind the fully opaque overlay.
    SwitchRoom(Floor),
    /// The transition ended and gameplay resumed.
    Finished,
}

/// Floor transition state machine.
#[derive(Debug)]
pub struct Elevator {
    phase: Phase,
    destination: Option<Floor>,
}

impl Default for Elevator {
    fn default() -> Self {
        Self::new()
    }
}

impl Elevator {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            destination: None,
        }
    }

    pub fn in_transit(&self) -> bool {
        self.phase != Phase::Idle
    }

    /// Starts a transition. Ignored while one is already running; a
    /// locked destination emits an access-denied notification and does
    /// nothing.
    pub fn call(&mut self, to: Floor, state: &mut GameState) -> bool {
        if self.in_transit() {
            return false;
        }
        if !state.is_unlocked(to) {
            state.notify("ACCESS DENIED — security clearance required.");
            return false;
        }

        tracing::debug!(to = to.name(), "elevator called");
        state.emit(&GameEvent::ElevatorCalled {
            from: state.current_floor,
            to,
        });
        state.paused = true;
        self.destination = Some(to);
        self.phase = Phase::FadeOut {
            remaining: FADE_OUT,
        };
        true
    }

    /// Advances the transition. Returns the room switch exactly once,
    /// at the end of the floor-card phase.
    pub fn update(&mut self, delta: f32, state: &mut GameState) -> ElevatorStep {
        match self.phase {
            Phase::Idle => ElevatorStep::None,
            Phase::FadeOut { remaining } => {
                let remaining = remaining - delta;
                self.phase = if remaining <= 0.0 {
                    Phase::Card { remaining: CARD }
                } else {
                    Phase::FadeOut { remaining }
                };
                ElevatorStep::None
            }
            Phase::Card { remaining } => {
                let remaining = remaining - delta;
                if remaining <= 0.0 {
                    self.phase = Phase::Hold { remaining: HOLD };
                    let to = self
                        .destination
                        .expect("transition in card phase has a destination");
                    ElevatorStep::SwitchRoom(to)
                } else {
                    self.phase = Phase::Card { remaining };
                    ElevatorStep::None
                }
            }
            Phase::Hold { remaining } => {
                let remaining = remaining - delta;
                self.phase = if remaining <= 0.0 {
                    Phase::FadeIn { remaining: FADE_IN }
                } else {
                    Phase::Hold { remaining }
                };
                ElevatorStep::None
            }
            Phase::FadeIn { remaining } => {
                let remaining = remaining - delta;
                if remaining <= 0.0 {
                    self.phase = Phase::Idle;
                    self.destination = None;
                    state.paused = false;
                    ElevatorStep::Finished
                } else {
                    self.phase = Phase::FadeIn { remaining };
                    ElevatorStep::None
                }
            }
        }
    }

    /// Overlay opacity in [0, 1] for the host fade layer.
    pub fn overlay_alpha(&self) -> f32 {
        match self.phase {
            Phase::Idle => 0.0,
            Phase::FadeOut { remaining } => 1.0 - (remaining / FADE_OUT).clamp(0.0, 1.0),
            Phase::Card { .. } | Phase::Hold { .. } => 1.0,
            Phase::FadeIn { remaining } => (remaining / FADE_IN).clamp(0.0, 1.0),
        }
    }

    /// Destination name while the floor card is showing.
    pub fn card_text(&self) -> Option<&'static str> {
        match self.phase {
            Phase::Card { .. } | Phase::Hold { .. } => self.destination.map(Floor::name),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_locked_floor_denied() {
        let mut elevator = Elevator::new();
        let mut state = GameState::new();
        state.paused = false;

        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        state.subscribe(move |e| sink.lock().push(e.clone()));

        assert!(!elevator.call(Floor::Roof, &mut state));
        assert!(!elevator.in_transit());
        assert!(!state.paused);
        assert!(matches!(
            seen.lock().as_slice(),
            [GameEvent::Notification(_)]
        ));
    }

    #[test]
    fn test_full_transition_timeline() {
        let mut elevator = Elevator::new();
        let mut state = GameState::new();
        state.paused = false;

        assert!(elevator.call(Floor::Basement, &mut state));
        assert!(state.paused);
        assert!(elevator.in_transit());
        assert_eq!(elevator.overlay_alpha(), 0.0);

        let mut switched = None;
        let mut finished = false;
        let mut elapsed = 0.0;
        // Two seconds of frames covers fade-out + card + hold + fade-in.
        for _ in 0..150 {
            match elevator.update(DT, &mut state) {
                ElevatorStep::SwitchRoom(to) => {
                    assert!(switched.is_none(), "switch must happen exactly once");
                    switched = Some((to, elapsed));
                    assert_eq!(elevator.overlay_alpha(), 1.0);
                }
                ElevatorStep::Finished => finished = true,
                ElevatorStep::None => {}
            }
            elapsed += DT;
        }

        let (to, at) = switched.expect("room switch must fire");
        assert_eq!(to, Floor::Basement);
        // Switch lands at the end of fade-out + card.
        assert!(at > 1.2 && at < 1.5, "switched at {at}");
        assert!(finished);
        assert!(!state.paused);
        assert!(!elevator.in_transit());
        assert_eq!(elevator.overlay_alpha(), 0.0);
    }

    #[test]
    fn test_call_during_transit_ignored() {
        let mut elevator = Elevator::new();
        let mut state = GameState::new();

        assert!(elevator.call(Floor::Basement, &mut state));
        assert!(!elevator.call(Floor::Lobby, &mut state));

        // The original destination sticks.
        loop {
            if let ElevatorStep::SwitchRoom(to) = elevator.update(DT, &mut state) {
                assert_eq!(to, Floor::Basement);
                break;
            }
        }
    }

    #[test]
    fn test_card_text_visible_behind_opaque_overlay() {
        let mut elevator = Elevator::new();
        let mut state = GameState::new();
        elevator.call(Floor::Basement, &mut state);

        assert_eq!(elevator.card_text(), None);
        // Past fade-out, inside the card phase.
        for _ in 0..40 {
            elevator.update(DT, &mut state);
        }
        assert_eq!(elevator.card_text(), Some("B1: HARDWARE"));
    }
}
