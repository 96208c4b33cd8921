//! Scene engine: wires state, dialog, hotspots and puzzle validation.
//!
//! The host UI calls in (hotspot clicks, puzzle submissions) and drains
//! a queue of [`AdventureEvent`]s back out. Missing or invalid input
//! degrades to a no-op rather than an error.

use crate::dialog::{Dialog, Line, Speaker};
use crate::puzzle::{
    self, Layer, Puzzle, Rule, check_ascii_word, check_binary_message, check_caesar_answer,
    check_layer_order, check_pixel_grid, check_quiz, check_turing_rules,
};
use crate::scene::{Hotspot, HotspotAction, SceneId, hotspots};
use crate::state::{AdventureState, SaveStore};

/// Signals for the host UI, drained once per frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdventureEvent {
    SceneLoaded(SceneId),
    PuzzleOpened(Puzzle),
    PuzzleClosed,
    PuzzleSolved(Puzzle),
    ItemGranted(String),
    Notification(String),
}

/// The adventure game engine.
pub struct Engine {
    pub state: AdventureState,
    pub dialog: Dialog,
    open_puzzle: Option<Puzzle>,
    /// Inventory item currently selected for use on a hotspot.
    active_item: Option<String>,
    events: Vec<AdventureEvent>,
}

impl Engine {
    /// Builds the engine on a storage backend, resuming any save.
    pub fn new(store: Box<dyn SaveStore>) -> Self {
        let state = AdventureState::new(store);
        let mut engine = Self {
            state,
            dialog: Dialog::new(),
            open_puzzle: None,
            active_item: None,
            events: Vec::new(),
        };
        let scene = engine.state.current_scene;
        engine.enter_scene(scene);
        engine
    }

    /// Events accumulated since the last drain.
    pub fn drain_events(&mut self) -> Vec<AdventureEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn open_puzzle(&self) -> Option<Puzzle> {
        self.open_puzzle
    }

    pub fn set_active_item(&mut self, id: Option<&str>) {
        self.active_item = id.map(str::to_string);
    }

    /// Loads a scene: records it in the save, plays the entry dialog.
    pub fn load_scene(&mut self, scene: SceneId) {
        self.state.current_scene = scene;
        self.state.save();
        self.enter_scene(scene);
    }

    fn enter_scene(&mut self, scene: SceneId) {
        tracing::info!(scene = scene.id(), "entering scene");
        self.dialog.hide();
        self.open_puzzle = None;
        self.dialog.sequence([Line::say(
            Speaker::System,
            format!("— {} —", scene.chapter()),
        )]);
        self.events.push(AdventureEvent::SceneLoaded(scene));
    }

    /// The current scene's hotspots.
    pub fn hotspots(&self) -> &'static [Hotspot] {
        hotspots(self.state.current_scene)
    }

    /// Clicks a hotspot. Hotspots wanting an item refuse without it.
    pub fn activate_hotspot(&mut self, index: usize) {
        let Some(hotspot) = self.hotspots().get(index).copied() else {
            return;
        };
        if let Some(required) = hotspot.required_item {
            if self.active_item.as_deref() != Some(required) && !self.state.has_item(required) {
                self.dialog.show(Line::say(
                    Speaker::Kim,
                    "I think I need the right item for that.",
                ));
                return;
            }
        }
        match hotspot.action {
            HotspotAction::Inspect(text) => {
                self.dialog.show(Line::say(Speaker::Kim, text));
            }
            HotspotAction::OpenPuzzle(puzzle) => {
                if self.state.is_puzzle_solved(puzzle.id()) {
                    self.dialog
                        .show(Line::say(Speaker::Kim, "Already cracked that one."));
                    return;
                }
                self.open_puzzle = Some(puzzle);
                self.events.push(AdventureEvent::PuzzleOpened(puzzle));
            }
        }
    }

    /// Closes the puzzle overlay without solving.
    pub fn close_puzzle(&mut self) {
        if self.open_puzzle.take().is_some() {
            self.events.push(AdventureEvent::PuzzleClosed);
        }
    }

    // ── Puzzle submissions ──────────────────────────────────────────

    /// Free-text answer for the binary, ASCII and Caesar puzzles.
    pub fn submit_text_answer(&mut self, answer: &str) -> bool {
        let correct = match self.open_puzzle {
            Some(Puzzle::Binary) => check_binary_message(answer),
            Some(Puzzle::Ascii) => check_ascii_word(answer),
            Some(Puzzle::Caesar) => check_caesar_answer(answer),
            _ => false,
        };
        self.resolve(correct)
    }

    /// Player-configured Turing rules, run against the lock tape.
    pub fn submit_turing_rules(&mut self, rules: &[Rule]) -> bool {
        let correct = self.open_puzzle == Some(Puzzle::Turing) && check_turing_rules(rules);
        self.resolve(correct)
    }

    /// Layer stack, bottom to top.
    pub fn submit_layer_order(&mut self, order: &[Layer]) -> bool {
        let correct = self.open_puzzle == Some(Puzzle::Layers) && check_layer_order(order);
        self.resolve(correct)
    }

    /// The repainted 5×5 pixel grid.
    pub fn submit_pixel_grid(&mut self, grid: &[[bool; 5]; 5]) -> bool {
        let correct = self.open_puzzle == Some(Puzzle::Pixel) && check_pixel_grid(grid);
        self.resolve(correct)
    }

    /// Selected option per quiz question.
    pub fn submit_quiz_answers(&mut self, answers: &[usize]) -> bool {
        let questions = match self.open_puzzle {
            Some(Puzzle::Halting) => puzzle::halting_quiz(),
            Some(Puzzle::AiBias) => puzzle::ai_bias_quiz(),
            Some(Puzzle::DataProtection) => puzzle::data_protection_quiz(),
            _ => return self.resolve(false),
        };
        let correct = check_quiz(questions, answers);
        self.resolve(correct)
    }

    /// On success: record the solve, grant the badge, advance the story.
    fn resolve(&mut self, correct: bool) -> bool {
        let Some(puzzle) = self.open_puzzle else {
            return false;
        };
        if !correct {
            return false;
        }

        self.open_puzzle = None;
        let scene = self.state.current_scene;
        self.state.solved_puzzle(puzzle.id());
        tracing::info!(puzzle = puzzle.id(), "puzzle solved");
        self.events.push(AdventureEvent::PuzzleClosed);
        self.events.push(AdventureEvent::PuzzleSolved(puzzle));

        if let Some(item) = scene.reward_item() {
            self.state.add_item(item);
            self.events
                .push(AdventureEvent::ItemGranted(item.to_string()));
            self.events
                .push(AdventureEvent::Notification(format!("ITEM: {item}")));
        }

        match scene.next() {
            Some(next) => self.load_scene(next),
            None => {
                self.events.push(AdventureEvent::Notification(
                    "FINAL PROTOCOL COMPLETE — Pete's account is safe.".to_string(),
                ));
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::{LAYERS_CORRECT, PIXEL_KEY, inverter_rules};
    use crate::state::MemoryStore;

    fn engine() -> Engine {
        Engine::new(Box::new(MemoryStore::default()))
    }

    /// Index of the puzzle hotspot in the current scene.
    fn puzzle_hotspot(engine: &Engine) -> usize {
        let puzzle = engine.state.current_scene.puzzle();
        engine
            .hotspots()
            .iter()
            .position(|h| h.action == HotspotAction::OpenPuzzle(puzzle))
            .expect("every scene has a puzzle hotspot")
    }

    #[test]
    fn test_starts_at_intro_with_entry_dialog() {
        let mut engine = engine();
        assert_eq!(engine.state.current_scene, SceneId::Intro);
        assert!(engine.dialog.is_open());
        assert!(
            engine
                .drain_events()
                .contains(&AdventureEvent::SceneLoaded(SceneId::Intro))
        );
    }

    #[test]
    fn test_wrong_answer_keeps_puzzle_open() {
        let mut engine = engine();
        let index = puzzle_hotspot(&engine);
        engine.activate_hotspot(index);
        assert_eq!(engine.open_puzzle(), Some(Puzzle::Binary));

        assert!(!engine.submit_text_answer("BYTE WAS HERE"));
        assert_eq!(engine.open_puzzle(), Some(Puzzle::Binary));
        assert_eq!(engine.state.current_scene, SceneId::Intro);
    }

    #[test]
    fn test_solving_advances_scene_and_grants_item() {
        let mut engine = engine();
        let index = puzzle_hotspot(&engine);
        engine.activate_hotspot(index);
        engine.drain_events();

        assert!(engine.submit_text_answer("byte war hier"));

        assert_eq!(engine.state.current_scene, SceneId::Bits);
        assert!(engine.state.is_puzzle_solved("s00_binary"));
        assert!(engine.state.has_item("visitenkarte_byte"));

        let events = engine.drain_events();
        assert!(events.contains(&AdventureEvent::PuzzleSolved(Puzzle::Binary)));
        assert!(events.contains(&AdventureEvent::SceneLoaded(SceneId::Bits)));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, AdventureEvent::ItemGranted(_)))
        );
    }

    #[test]
    fn test_submission_without_open_puzzle_is_noop() {
        let mut engine = engine();
        assert!(!engine.submit_text_answer("BYTE WAR HIER"));
        assert_eq!(engine.state.current_scene, SceneId::Intro);
    }

    #[test]
    fn test_solved_puzzle_hotspot_does_not_reopen() {
        let mut engine = engine();
        let index = puzzle_hotspot(&engine);
        engine.activate_hotspot(index);
        engine.submit_text_answer("BYTE WAR HIER");

        // Back up to the intro puzzle hotspot: already solved.
        engine.load_scene(SceneId::Intro);
        engine.activate_hotspot(index);
        assert_eq!(engine.open_puzzle(), None);
    }

    #[test]
    fn test_required_item_gates_hotspot() {
        let mut engine = engine();
        engine.load_scene(SceneId::Finale);

        // The finale console needs the password note.
        engine.activate_hotspot(0);
        assert_eq!(engine.open_puzzle(), None);

        engine.state.add_item("passwort_zettel");
        engine.activate_hotspot(0);
        assert_eq!(engine.open_puzzle(), Some(Puzzle::DataProtection));
    }

    #[test]
    fn test_full_story_run() {
        let mut engine = engine();

        // s00 binary
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_text_answer("BYTE WAR HIER"));
        // s01 ascii
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_text_answer("schule"));
        // s02 turing
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_turing_rules(&inverter_rules()));
        // s03 layers
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_layer_order(&LAYERS_CORRECT));
        // s04 pixel
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_pixel_grid(&PIXEL_KEY));
        // s05 halting quiz
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_quiz_answers(&[1, 2, 1]));
        // s06 ai bias quiz
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_quiz_answers(&[1, 1, 1]));
        // s07 caesar
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_text_answer("INFORMATION"));
        // s08 finale (password note was granted in s07)
        engine.activate_hotspot(puzzle_hotspot(&engine));
        assert!(engine.submit_quiz_answers(&[2, 1, 2]));

        assert_eq!(engine.state.current_scene, SceneId::Finale);
        assert_eq!(engine.state.items().count(), 8);
        let events = engine.drain_events();
        assert!(
            events
                .iter()
                .any(|e| matches!(e, AdventureEvent::Notification(n) if n.contains("COMPLETE")))
        );
    }
}
