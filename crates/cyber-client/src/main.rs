//! Cyber Tower native client.
//!
//! Thin shell over the core plugins: window setup, cursor grab, and the
//! debug unlock flag. All game logic lives in cyber-core.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use cyber_core::bevy::{TowerHeadlessPlugin, TowerRenderPlugin, TowerSim};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "CYBER::TOWER".to_string(),
                        ..default()
                    }),
                    ..default()
                })
                // tracing is initialized above; Bevy must not install a
                // second subscriber.
                .disable::<bevy::log::LogPlugin>(),
        )
        .add_plugins((TowerHeadlessPlugin::default(), TowerRenderPlugin))
        .add_systems(Startup, apply_unlock_flag)
        .add_systems(Update, grab_cursor)
        .run();
}

/// `--unlock 1337` mirrors the debug URL parameter of the web build:
/// every floor open, gating puzzles solved, fragments collected.
fn apply_unlock_flag(mut sim: ResMut<TowerSim>) {
    let args: Vec<String> = std::env::args().collect();
    if args
        .windows(2)
        .any(|pair| pair[0] == "--unlock" && pair[1] == "1337")
    {
        tracing::info!("debug unlock requested");
        sim.0.unlock_all();
    }
}

/// Locks and hides the cursor while playing, releases it for menus and
/// terminals.
fn grab_cursor(sim: Res<TowerSim>, mut cursors: Query<&mut CursorOptions, With<PrimaryWindow>>) {
    let playing = !sim.0.state.paused && !sim.0.state.terminal_open;
    for mut cursor in &mut cursors {
        let grab = if playing {
            CursorGrabMode::Locked
        } else {
            CursorGrabMode::None
        };
        if cursor.grab_mode != grab {
            cursor.grab_mode = grab;
            cursor.visible = !playing;
        }
    }
}
