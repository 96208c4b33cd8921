//! Tower game state: floors, progression, and typed events.
//!
//! One `GameState` is constructed per session and passed by reference to
//! every collaborator. Events are a closed enum published through an
//! explicit subscribe/unsubscribe API, so payload shapes are checked at
//! compile time.

use std::collections::HashSet;
use std::fmt;

use crate::constants::FLOOR_HEIGHT;

/// Identifies one floor of the tower.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Floor {
    Lobby,
    Basement,
    Pixel,
    Crypto,
    Roof,
}

impl Floor {
    /// All floors in elevator-panel order.
    pub const ALL: [Floor; 5] = [
        Floor::Lobby,
        Floor::Basement,
        Floor::Pixel,
        Floor::Crypto,
        Floor::Roof,
    ];

    /// Vertical index: 0 = ground, negative = below ground.
    pub fn index(self) -> i32 {
        match self {
            Floor::Lobby => 0,
            Floor::Basement => -1,
            Floor::Pixel => 1,
            Floor::Crypto => 2,
            Floor::Roof => 3,
        }
    }

    /// World-space Y of this floor's walking surface.
    #[allow(clippy::cast_precision_loss)]
    pub fn floor_y(self) -> f32 {
        self.index() as f32 * FLOOR_HEIGHT
    }

    /// Display name shown on the elevator panel and floor card.
    pub fn name(self) -> &'static str {
        match self {
            Floor::Lobby => "LOBBY",
            Floor::Basement => "B1: HARDWARE",
            Floor::Pixel => "F2: PIXEL",
            Floor::Crypto => "F3: CRYPTO",
            Floor::Roof => "ROOF",
        }
    }

    /// Floor that solving this floor's gating puzzle unlocks.
    pub fn unlocks_next(self) -> Option<Floor> {
        match self {
            Floor::Basement => Some(Floor::Pixel),
            Floor::Pixel => Some(Floor::Crypto),
            Floor::Crypto => Some(Floor::Roof),
            Floor::Lobby | Floor::Roof => None,
        }
    }
}

/// Identifies one collectible fragment: a floor and a slot on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FragmentId {
    pub floor: Floor,
    pub slot: u8,
}

/// Fragments hidden on each floor.
pub const FRAGMENTS_PER_FLOOR: usize = 3;

/// Total fragments across the tower.
pub const FRAGMENT_TOTAL: usize = FRAGMENTS_PER_FLOOR * Floor::ALL.len();

/// Which modal terminal overlay is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Terminal {
    /// Elevator floor-selection panel.
    FloorSelect,
    /// The gating puzzle terminal of a floor.
    Puzzle(Floor),
}

/// Events published by the game state.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    FloorChanged(Floor),
    FloorUnlocked(Floor),
    PuzzleSolved(Floor),
    FragmentCollected {
        id: FragmentId,
        count: usize,
        total: usize,
    },
    TerminalOpened(Terminal),
    TerminalClosed,
    ElevatorCalled {
        from: Floor,
        to: Floor,
    },
    /// Transient banner text for the host HUD.
    Notification(String),
}

/// Handle returned by [`GameState::subscribe`].
pub type SubscriberId = u32;

type Subscriber = Box<dyn FnMut(&GameEvent) + Send + Sync>;

/// Mutable session state shared by all tower systems.
pub struct GameState {
    pub current_floor: Floor,
    pub paused: bool,
    pub terminal_open: bool,
    unlocked: HashSet<Floor>,
    fragments: HashSet<FragmentId>,
    puzzles_solved: HashSet<Floor>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_subscriber: SubscriberId,
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("current_floor", &self.current_floor)
            .field("paused", &self.paused)
            .field("terminal_open", &self.terminal_open)
            .field("unlocked", &self.unlocked)
            .field("fragments", &self.fragments.len())
            .field("puzzles_solved", &self.puzzles_solved)
            .field("subscribers", &self.subscribers.len())
            .finish_non_exhaustive()
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Creates a fresh session. The game starts paused until the host
    /// hands over input focus.
    pub fn new() -> Self {
        Self {
            current_floor: Floor::Lobby,
            paused: true,
            terminal_open: false,
            unlocked: HashSet::from([Floor::Lobby, Floor::Basement]),
            fragments: HashSet::new(),
            puzzles_solved: HashSet::new(),
            subscribers: Vec::new(),
            next_subscriber: 0,
        }
    }

    /// Registers an event handler and returns its handle.
    pub fn subscribe(
        &mut self,
        handler: impl FnMut(&GameEvent) + Send + Sync + 'static,
    ) -> SubscriberId {
        let id = self.next_subscriber;
        self.next_subscriber += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Removes a previously registered handler. Returns false if the
    /// handle was unknown.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Publishes an event to all subscribers.
    pub fn emit(&mut self, event: &GameEvent) {
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
    }

    /// Shorthand for emitting a [`GameEvent::Notification`].
    pub fn notify(&mut self, text: impl Into<String>) {
        self.emit(&GameEvent::Notification(text.into()));
    }

    pub fn is_unlocked(&self, floor: Floor) -> bool {
        self.unlocked.contains(&floor)
    }

    pub fn is_solved(&self, floor: Floor) -> bool {
        self.puzzles_solved.contains(&floor)
    }

    pub fn is_collected(&self, id: FragmentId) -> bool {
        self.fragments.contains(&id)
    }

    /// Number of fragments collected so far.
    pub fn fragment_count(&self) -> usize {
        self.fragments.len()
    }

    /// Records the active floor and announces the change.
    pub fn set_floor(&mut self, floor: Floor) {
        self.current_floor = floor;
        self.emit(&GameEvent::FloorChanged(floor));
    }

    /// Unlocks a floor; repeated unlocks are silent.
    pub fn unlock_floor(&mut self, floor: Floor) {
        if self.unlocked.insert(floor) {
            tracing::info!(floor = floor.name(), "floor unlocked");
            self.emit(&GameEvent::FloorUnlocked(floor));
        }
    }

    /// Records a solved gating puzzle and unlocks the next floor.
    /// Repeated solves are silent.
    pub fn solve_puzzle(&mut self, floor: Floor) {
        if self.puzzles_solved.insert(floor) {
            tracing::info!(floor = floor.name(), "gating puzzle solved");
            self.emit(&GameEvent::PuzzleSolved(floor));
            if let Some(next) = floor.unlocks_next() {
                self.unlock_floor(next);
            }
        }
    }

    /// Records a collected fragment; repeated collections are silent.
    pub fn collect_fragment(&mut self, id: FragmentId) {
        if self.fragments.insert(id) {
            let count = self.fragments.len();
            self.emit(&GameEvent::FragmentCollected {
                id,
                count,
                total: FRAGMENT_TOTAL,
            });
        }
    }

    /// Opens a modal terminal overlay; gameplay input is gated off while
    /// one is open.
    pub fn open_terminal(&mut self, terminal: Terminal) {
        self.terminal_open = true;
        self.emit(&GameEvent::TerminalOpened(terminal));
    }

    /// Closes the terminal overlay.
    pub fn close_terminal(&mut self) {
        if self.terminal_open {
            self.terminal_open = false;
            self.emit(&GameEvent::TerminalClosed);
        }
    }

    /// Debug bypass: unlocks every floor, solves the gating puzzles and
    /// collects every fragment. Equivalent of the `?unlock=1337` URL
    /// parameter in the shipped game.
    pub fn unlock_all(&mut self) {
        for floor in Floor::ALL {
            self.unlock_floor(floor);
        }
        for floor in [Floor::Basement, Floor::Pixel, Floor::Crypto] {
            self.solve_puzzle(floor);
        }
        for floor in Floor::ALL {
            for slot in 0..FRAGMENTS_PER_FLOOR {
                #[allow(clippy::cast_possible_truncation)]
                self.collect_fragment(FragmentId {
                    floor,
                    slot: slot as u8,
                });
            }
        }
        self.notify("All floors unlocked — have fun!");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_initial_state() {
        let state = GameState::new();
        assert_eq!(state.current_floor, Floor::Lobby);
        assert!(state.paused);
        assert!(state.is_unlocked(Floor::Lobby));
        assert!(state.is_unlocked(Floor::Basement));
        assert!(!state.is_unlocked(Floor::Pixel));
        assert_eq!(state.fragment_count(), 0);
    }

    #[test]
    fn test_subscribe_and_unsubscribe() {
        let mut state = GameState::new();
        let seen = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&seen);
        let id = state.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        state.unlock_floor(Floor::Pixel);
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        assert!(state.unsubscribe(id));
        state.unlock_floor(Floor::Crypto);
        assert_eq!(seen.load(Ordering::SeqCst), 1);

        assert!(!state.unsubscribe(id));
    }

    #[test]
    fn test_solve_unlocks_next_floor() {
        let mut state = GameState::new();
        state.solve_puzzle(Floor::Basement);
        assert!(state.is_solved(Floor::Basement));
        assert!(state.is_unlocked(Floor::Pixel));
        assert!(!state.is_unlocked(Floor::Crypto));
    }

    #[test]
    fn test_repeated_mutations_are_silent() {
        let mut state = GameState::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&seen);
        state.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let id = FragmentId {
            floor: Floor::Lobby,
            slot: 0,
        };
        state.collect_fragment(id);
        state.collect_fragment(id);
        assert_eq!(state.fragment_count(), 1);
        assert_eq!(seen.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fragment_event_carries_progress() {
        let mut state = GameState::new();
        let seen = Arc::new(parking_lot::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        state.subscribe(move |event| sink.lock().push(event.clone()));

        state.collect_fragment(FragmentId {
            floor: Floor::Pixel,
            slot: 2,
        });

        let events = seen.lock();
        assert_eq!(
            events.as_slice(),
            [GameEvent::FragmentCollected {
                id: FragmentId {
                    floor: Floor::Pixel,
                    slot: 2
                },
                count: 1,
                total: FRAGMENT_TOTAL,
            }]
        );
    }

    #[test]
    fn test_unlock_all() {
        let mut state = GameState::new();
        state.unlock_all();
        for floor in Floor::ALL {
            assert!(state.is_unlocked(floor));
        }
        assert_eq!(state.fragment_count(), FRAGMENT_TOTAL);
        assert!(state.is_solved(Floor::Crypto));
    }

    #[test]
    fn test_floor_heights() {
        assert_eq!(Floor::Lobby.floor_y(), 0.0);
        assert_eq!(Floor::Basement.floor_y(), -12.0);
        assert_eq!(Floor::Roof.floor_y(), 36.0);
    }
}
