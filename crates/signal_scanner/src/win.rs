use arcade_helpers::button::spawn_terminal_button;
use arcade_helpers::palette::{DIM_GREEN, TERMINAL_GREEN};
use arcade_helpers::scene::Scene;
use arcade_helpers::terminal_screen::{TerminalScreen, spawn_terminal_screen};
use bevy::prelude::*;

use crate::ScannerEntity;
use crate::session::{Session, SessionEvent};

#[derive(Component)]
pub struct ReturnToRootButton;

pub fn show_win_screen(
    mut commands: Commands,
    mut events: EventReader<SessionEvent>,
    session: Res<Session>,
) {
    if !events.read().any(|event| *event == SessionEvent::Won) {
        return;
    }

    let flag = session.flag();
    let report = [flag.as_str()];
    let screen = TerminalScreen {
        title: "SYSTEM UNLOCKED",
        subtitle: "PAYLOAD_DECRYPTED",
        lines: &report,
        color: TERMINAL_GREEN,
        dim_color: DIM_GREEN,
    };
    let root = spawn_terminal_screen(&mut commands, &screen, ScannerEntity);
    commands.entity(root).with_children(|parent| {
        parent
            .spawn(Node {
                margin: UiRect::top(Val::Px(32.0)),
                ..default()
            })
            .with_children(|row| {
                spawn_terminal_button(row, "RETURN TO ROOT", None, ReturnToRootButton);
            });
    });
}

pub fn return_to_root(
    mut next_scene: ResMut<NextState<Scene>>,
    buttons: Query<&Interaction, (Changed<Interaction>, With<ReturnToRootButton>)>,
) {
    for interaction in &buttons {
        if *interaction == Interaction::Pressed {
            info!("Returning to the root menu");
            next_scene.set(Scene::Menu);
        }
    }
}
