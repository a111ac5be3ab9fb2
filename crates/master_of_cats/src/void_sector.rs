use arcade_helpers::cleanup::despawn_all;
use arcade_helpers::palette::{ALERT_RED, DIM_RED};
use arcade_helpers::scene::Scene;
use arcade_helpers::terminal_screen::{TerminalScreen, spawn_terminal_screen};
use bevy::prelude::*;

const SCAN_REPORT: &[&str] = &[
    "SCANNING SECTOR 0x00...",
    "NO SIGNALS DETECTED",
    "MEMORY BLOCKS UNREADABLE",
    "PRESS [M] TO RETURN",
];

/// The third path leads nowhere: a failure screen until the player aborts.
pub struct VoidSectorPlugin;

impl Plugin for VoidSectorPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Scene::Void), spawn_failure_screen)
            .add_systems(OnExit(Scene::Void), despawn_all::<VoidEntity>);
    }
}

#[derive(Component)]
struct VoidEntity;

fn spawn_failure_screen(mut commands: Commands) {
    let screen = TerminalScreen {
        title: "SYSTEM FAILURE",
        subtitle: "SECTOR EMPTY",
        lines: SCAN_REPORT,
        color: ALERT_RED,
        dim_color: DIM_RED,
    };
    spawn_terminal_screen(&mut commands, &screen, VoidEntity);
    warn!("Void sector mounted, nothing to scan");
}
