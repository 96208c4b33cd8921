//! HUD overlay: crosshair, interact prompt, fragment counter,
//! notification banner, terminal panel and the elevator fade layer.

use bevy::prelude::*;

use crate::bevy::messages::CoreEvent;
use crate::bevy::resources::{ActiveTerminal, TowerSim};
use crate::state::{FRAGMENT_TOTAL, Floor, GameEvent, Terminal};

const NOTIFICATION_SECONDS: f32 = 4.0;

#[derive(Component)]
pub struct InteractPrompt;

#[derive(Component)]
pub struct FragmentCounter;

#[derive(Component)]
pub struct NotificationBanner;

#[derive(Component)]
pub struct TerminalPanel;

#[derive(Component)]
pub struct TerminalText;

/// Full-screen fade layer driven by the elevator, doubling as the
/// floor-card backdrop.
#[derive(Component)]
pub struct FadeOverlay;

#[derive(Component)]
pub struct FadeCardText;

pub fn setup_hud(mut commands: Commands) {
    // Crosshair.
    commands.spawn((
        Text::new("+"),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::srgba(0.9, 0.95, 1.0, 0.8)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(50.0),
            top: Val::Percent(50.0),
            ..default()
        },
    ));

    commands.spawn((
        InteractPrompt,
        Text::new("[E] INTERACT"),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb_u8(0x00, 0xd4, 0xff)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(46.0),
            top: Val::Percent(58.0),
            ..default()
        },
        Visibility::Hidden,
    ));

    commands.spawn((
        FragmentCounter,
        Text::new(format!("FRAGMENTS 0/{FRAGMENT_TOTAL}")),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(Color::srgb_u8(0x00, 0xff, 0x88)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(24.0),
            top: Val::Px(20.0),
            ..default()
        },
    ));

    commands.spawn((
        NotificationBanner,
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb_u8(0xe8, 0xea, 0xf6)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(28.0),
            top: Val::Percent(12.0),
            ..default()
        },
        Visibility::Hidden,
    ));

    commands.spawn((
        TerminalPanel,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(20.0),
            top: Val::Percent(18.0),
            width: Val::Percent(60.0),
            height: Val::Percent(60.0),
            padding: UiRect::all(Val::Px(24.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.02, 0.04, 0.08, 0.96)),
        GlobalZIndex(5),
        Visibility::Hidden,
    ));
    commands.spawn((
        TerminalText,
        Text::new(""),
        TextFont {
            font_size: 17.0,
            ..default()
        },
        TextColor(Color::srgb_u8(0x00, 0xff, 0x88)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(24.0),
            top: Val::Percent(24.0),
            ..default()
        },
        GlobalZIndex(6),
        Visibility::Hidden,
    ));

    commands.spawn((
        FadeOverlay,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(0.0),
            top: Val::Px(0.0),
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.0)),
        GlobalZIndex(10),
    ));
    commands.spawn((
        FadeCardText,
        Text::new(""),
        TextFont {
            font_size: 42.0,
            ..default()
        },
        TextColor(Color::srgb_u8(0x00, 0xd4, 0xff)),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Percent(38.0),
            top: Val::Percent(45.0),
            ..default()
        },
        GlobalZIndex(11),
        Visibility::Hidden,
    ));
}

/// Shows the interact prompt while something is targeted.
pub fn update_prompt(
    sim: Res<TowerSim>,
    mut prompt: Query<&mut Visibility, With<InteractPrompt>>,
) {
    for mut visibility in &mut prompt {
        *visibility = if sim.0.interaction.prompt_visible() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
}

/// Keeps the fragment counter current.
pub fn update_fragment_counter(
    sim: Res<TowerSim>,
    mut counter: Query<&mut Text, With<FragmentCounter>>,
) {
    for mut text in &mut counter {
        text.0 = format!(
            "FRAGMENTS {}/{FRAGMENT_TOTAL}",
            sim.0.state.fragment_count()
        );
    }
}

/// Shows the latest notification and fades it after a few seconds.
/// A newer notification overwrites the timer — last writer wins.
pub fn update_notifications(
    time: Res<Time>,
    mut reader: MessageReader<CoreEvent>,
    mut timer: Local<f32>,
    mut banner: Query<(&mut Text, &mut Visibility), With<NotificationBanner>>,
) {
    for CoreEvent(event) in reader.read() {
        if let GameEvent::Notification(message) = event {
            for (mut text, mut visibility) in &mut banner {
                text.0.clone_from(message);
                *visibility = Visibility::Visible;
            }
            *timer = NOTIFICATION_SECONDS;
        }
    }

    if *timer > 0.0 {
        *timer -= time.delta_secs();
        if *timer <= 0.0 {
            for (_, mut visibility) in &mut banner {
                *visibility = Visibility::Hidden;
            }
        }
    }
}

/// Renders the terminal body for whichever terminal is open.
fn terminal_body(terminal: Terminal, sim: &TowerSim) -> String {
    match terminal {
        Terminal::FloorSelect => {
            let mut body = String::from("ELEVATOR — SELECT FLOOR\n\n");
            for (index, floor) in Floor::ALL.into_iter().enumerate() {
                let status = if sim.0.state.is_unlocked(floor) {
                    "ONLINE"
                } else {
                    "LOCKED"
                };
                let here = if floor == sim.0.state.current_floor {
                    "  < HERE"
                } else {
                    ""
                };
                body.push_str(&format!(
                    "[{}] {:<14} {status}{here}\n",
                    index + 1,
                    floor.name()
                ));
            }
            body.push_str("\n[ESC] close");
            body
        }
        Terminal::Puzzle(floor) => format!(
            "{} — SECURITY TERMINAL\n\nAccess protocol ready.\n\n[ENTER] run decryption   [ESC] close",
            floor.name()
        ),
    }
}

/// Shows or hides the terminal overlay and fills in its text.
pub fn update_terminal(
    sim: Res<TowerSim>,
    active: Res<ActiveTerminal>,
    mut panel: Query<&mut Visibility, (With<TerminalPanel>, Without<TerminalText>)>,
    mut body: Query<(&mut Text, &mut Visibility), With<TerminalText>>,
) {
    let target = if active.0.is_some() {
        Visibility::Visible
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut panel {
        *visibility = target;
    }
    for (mut text, mut visibility) in &mut body {
        *visibility = target;
        if let Some(terminal) = active.0 {
            text.0 = terminal_body(terminal, &sim);
        }
    }
}

/// Drives the elevator fade layer and floor card.
pub fn update_fade(
    sim: Res<TowerSim>,
    mut fade: Query<&mut BackgroundColor, With<FadeOverlay>>,
    mut card: Query<(&mut Text, &mut Visibility), With<FadeCardText>>,
) {
    let alpha = sim.0.elevator.overlay_alpha();
    for mut background in &mut fade {
        background.0 = Color::srgba(0.0, 0.0, 0.0, alpha);
    }
    for (mut text, mut visibility) in &mut card {
        match sim.0.elevator.card_text() {
            Some(name) => {
                text.0 = name.to_string();
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
