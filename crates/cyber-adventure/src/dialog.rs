//! Dialog state machine: queued lines, choices, outcomes.
//!
//! The queue models the conversational flow only. Typing animation and
//! portrait rendering are presentation; the full text of a line is
//! available immediately.

use std::collections::VecDeque;

use crate::puzzle::Puzzle;
use crate::scene::SceneId;

/// Cast of the adventure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    Kim,
    Byte,
    Justus,
    Brandt,
    Aria,
    Pete,
    System,
}

impl Speaker {
    /// Display name on the portrait.
    pub fn name(self) -> &'static str {
        match self {
            Speaker::Kim => "KIM",
            Speaker::Byte => "BYTE",
            Speaker::Justus => "JUSTUS",
            Speaker::Brandt => "MR. BRANDT",
            Speaker::Aria => "ARIA-7",
            Speaker::Pete => "PIXEL_PETE",
            Speaker::System => "SYSTEM",
        }
    }
}

/// What picking a choice (or finishing a line) leads to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogOutcome {
    /// Nothing beyond advancing the conversation.
    Continue,
    SetFlag(String),
    GotoScene(SceneId),
    OpenPuzzle(Puzzle),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Choice {
    pub label: String,
    pub outcome: DialogOutcome,
}

/// One spoken line. An empty choice list means a plain "continue".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub speaker: Speaker,
    pub text: String,
    pub choices: Vec<Choice>,
}

impl Line {
    pub fn say(speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            speaker,
            text: text.into(),
            choices: Vec::new(),
        }
    }
}

/// The dialog panel state: a current line plus a queue behind it.
#[derive(Debug, Default)]
pub struct Dialog {
    current: Option<Line>,
    queue: VecDeque<Line>,
}

impl Dialog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a line; it becomes current if nothing is showing.
    pub fn show(&mut self, line: Line) {
        if self.current.is_none() {
            self.current = Some(line);
        } else {
            self.queue.push_back(line);
        }
    }

    /// Replaces everything with a fresh sequence of lines.
    pub fn sequence(&mut self, lines: impl IntoIterator<Item = Line>) {
        self.queue = lines.into_iter().collect();
        self.current = self.queue.pop_front();
    }

    /// Clears the panel. A later `show` starts fresh.
    pub fn hide(&mut self) {
        self.current = None;
        self.queue.clear();
    }

    pub fn current(&self) -> Option<&Line> {
        self.current.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    /// Confirms a choice-less line and moves to the next.
    /// A line with choices must be resolved through [`Dialog::choose`].
    pub fn advance(&mut self) {
        match &self.current {
            Some(line) if line.choices.is_empty() => {
                self.current = self.queue.pop_front();
            }
            _ => {}
        }
    }

    /// Resolves choice `index` on the current line. Out-of-range
    /// indices are no-ops.
    pub fn choose(&mut self, index: usize) -> Option<DialogOutcome> {
        let line = self.current.as_ref()?;
        let outcome = line.choices.get(index)?.outcome.clone();
        self.current = self.queue.pop_front();
        Some(outcome)
    }
}
