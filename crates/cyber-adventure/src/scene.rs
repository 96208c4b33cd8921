//! Scene registry: nine chapters, their hotspots and rewards.

use crate::puzzle::Puzzle;

/// The nine scenes of the adventure, in story order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SceneId {
    Intro,
    Bits,
    Turing,
    Server,
    Pixel,
    Halt,
    AiLab,
    Crypto,
    Finale,
}

impl SceneId {
    pub const ALL: [SceneId; 9] = [
        SceneId::Intro,
        SceneId::Bits,
        SceneId::Turing,
        SceneId::Server,
        SceneId::Pixel,
        SceneId::Halt,
        SceneId::AiLab,
        SceneId::Crypto,
        SceneId::Finale,
    ];

    /// Stable id recorded in the save file.
    pub fn id(self) -> &'static str {
        match self {
            SceneId::Intro => "s00_intro",
            SceneId::Bits => "s01_bits",
            SceneId::Turing => "s02_turing",
            SceneId::Server => "s03_server",
            SceneId::Pixel => "s04_pixel",
            SceneId::Halt => "s05_halt",
            SceneId::AiLab => "s06_ki",
            SceneId::Crypto => "s07_krypto",
            SceneId::Finale => "s08_finale",
        }
    }

    pub fn parse(id: &str) -> Option<SceneId> {
        SceneId::ALL.into_iter().find(|scene| scene.id() == id)
    }

    /// Chapter title shown in the header.
    pub fn chapter(self) -> &'static str {
        match self {
            SceneId::Intro => "CHAPTER 0 — KIM'S ROOM",
            SceneId::Bits => "CHAPTER 1 — BITS & BYTES",
            SceneId::Turing => "CHAPTER 2 — THE TURING MACHINE",
            SceneId::Server => "CHAPTER 3 — THE SERVER ROOM",
            SceneId::Pixel => "CHAPTER 4 — THE BACKUP DRIVE",
            SceneId::Halt => "CHAPTER 5 — PARASITE.EXE",
            SceneId::AiLab => "CHAPTER 6 — AI LAB",
            SceneId::Crypto => "CHAPTER 7 — BYTE'S HIDEOUT",
            SceneId::Finale => "CHAPTER 8 — FINAL PROTOCOL",
        }
    }

    /// The scene after this one, entered when its puzzle is solved.
    pub fn next(self) -> Option<SceneId> {
        let index = SceneId::ALL.iter().position(|s| *s == self)?;
        SceneId::ALL.get(index + 1).copied()
    }

    /// The gating puzzle of this scene.
    pub fn puzzle(self) -> Puzzle {
        match self {
            SceneId::Intro => Puzzle::Binary,
            SceneId::Bits => Puzzle::Ascii,
            SceneId::Turing => Puzzle::Turing,
            SceneId::Server => Puzzle::Layers,
            SceneId::Pixel => Puzzle::Pixel,
            SceneId::Halt => Puzzle::Halting,
            SceneId::AiLab => Puzzle::AiBias,
            SceneId::Crypto => Puzzle::Caesar,
            SceneId::Finale => Puzzle::DataProtection,
        }
    }

    /// Badge item granted for solving this scene's puzzle.
    pub fn reward_item(self) -> Option<&'static str> {
        match self {
            SceneId::Intro => Some("visitenkarte_byte"),
            SceneId::Bits => Some("turing_protokoll"),
            SceneId::Turing => Some("schicht_diagram"),
            SceneId::Server => Some("korrupte_datei"),
            SceneId::Pixel => Some("paradox_notiz"),
            SceneId::Halt => Some("deepfake_screenshoot"),
            SceneId::AiLab => Some("geheimbrief"),
            SceneId::Crypto => Some("passwort_zettel"),
            SceneId::Finale => None,
        }
    }
}

/// What clicking a hotspot does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotspotAction {
    /// Show a one-line observation.
    Inspect(&'static str),
    /// Open the scene's puzzle overlay.
    OpenPuzzle(Puzzle),
}

/// A clickable region of a scene.
#[derive(Debug, Clone, Copy)]
pub struct Hotspot {
    pub label: &'static str,
    /// Item that must be selected in the inventory to use this hotspot.
    pub required_item: Option<&'static str>,
    pub action: HotspotAction,
}

/// The hotspots of a scene. Presentation (positions, art) is the host's
/// concern; the engine only knows labels and effects.
pub fn hotspots(scene: SceneId) -> &'static [Hotspot] {
    match scene {
        SceneId::Intro => &[
            Hotspot {
                label: "Read the flickering screen",
                required_item: None,
                action: HotspotAction::OpenPuzzle(Puzzle::Binary),
            },
            Hotspot {
                label: "Look out the window",
                required_item: None,
                action: HotspotAction::Inspect(
                    "The city glows. Somewhere out there, BYTE is laughing.",
                ),
            },
        ],
        SceneId::Bits => &[
            Hotspot {
                label: "Decode the terminal bytes",
                required_item: None,
                action: HotspotAction::OpenPuzzle(Puzzle::Ascii),
            },
            Hotspot {
                label: "Inspect the circuit board",
                required_item: None,
                action: HotspotAction::Inspect(
                    "Millions of transistors. Each one just switches on or off.",
                ),
            },
        ],
        SceneId::Turing => &[
            Hotspot {
                label: "Hack BYTE's terminal",
                required_item: None,
                action: HotspotAction::OpenPuzzle(Puzzle::Turing),
            },
            Hotspot {
                label: "Read the whiteboard",
                required_item: None,
                action: HotspotAction::Inspect(
                    "State × input → output, move, new state. The simplest possible program.",
                ),
            },
        ],
        SceneId::Server => &[
            Hotspot {
                label: "Open the layer console",
                required_item: None,
                action: HotspotAction::OpenPuzzle(Puzzle::Layers),
            },
            Hotspot {
                label: "Check the server racks",
                required_item: Some("schicht_diagram"),
                action: HotspotAction::Inspect(
                    "With the layer diagram the rack labels suddenly make sense.",
                ),
            },
        ],
        SceneId::Pixel => &[Hotspot {
            label: "Repaint the pixel lock",
            required_item: None,
            action: HotspotAction::OpenPuzzle(Puzzle::Pixel),
        }],
        SceneId::Halt => &[Hotspot {
            label: "Analyze PARASITE.EXE",
            required_item: None,
            action: HotspotAction::OpenPuzzle(Puzzle::Halting),
        }],
        SceneId::AiLab => &[
            Hotspot {
                label: "Question the lab model",
                required_item: None,
                action: HotspotAction::OpenPuzzle(Puzzle::AiBias),
            },
            Hotspot {
                label: "Talk to ARIA-7",
                required_item: None,
                action: HotspotAction::Inspect(
                    "\"I only know what I was trained on,\" ARIA-7 admits.",
                ),
            },
        ],
        SceneId::Crypto => &[Hotspot {
            label: "Decrypt the wall cipher",
            required_item: None,
            action: HotspotAction::OpenPuzzle(Puzzle::Caesar),
        }],
        SceneId::Finale => &[Hotspot {
            label: "Run the final protocol",
            required_item: Some("passwort_zettel"),
            action: HotspotAction::OpenPuzzle(Puzzle::DataProtection),
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_round_trip() {
        for scene in SceneId::ALL {
            assert_eq!(SceneId::parse(scene.id()), Some(scene));
        }
        assert_eq!(SceneId::parse("s99_bogus"), None);
    }

    #[test]
    fn test_story_order() {
        assert_eq!(SceneId::Intro.next(), Some(SceneId::Bits));
        assert_eq!(SceneId::Crypto.next(), Some(SceneId::Finale));
        assert_eq!(SceneId::Finale.next(), None);
    }

    #[test]
    fn test_every_scene_has_a_puzzle_hotspot() {
        for scene in SceneId::ALL {
            let puzzle = scene.puzzle();
            assert!(
                hotspots(scene)
                    .iter()
                    .any(|h| h.action == HotspotAction::OpenPuzzle(puzzle)),
                "scene {scene:?} must expose its puzzle"
            );
        }
    }

    #[test]
    fn test_rewards_unique() {
        let mut seen = std::collections::HashSet::new();
        for scene in SceneId::ALL {
            if let Some(item) = scene.reward_item() {
                assert!(seen.insert(item), "duplicate reward {item}");
            }
        }
        assert_eq!(seen.len(), 8);
    }
}
