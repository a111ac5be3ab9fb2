use arcade_helpers::button::spawn_terminal_button;
use arcade_helpers::cleanup::despawn_all;
use arcade_helpers::palette::{
    ALERT_RED, DARK_GREEN, DIM_GREEN, SCREEN_BLACK, SIGNAL_CYAN, TERMINAL_GREEN,
};
use arcade_helpers::scene::Scene;
use bevy::prelude::*;
use strum::{EnumIter, IntoEnumIterator};

use crate::TITLE;

const SUBTITLE: &str = "SECURE CONNECTION ESTABLISHED // USER: ROOT";
const FOOTER: &str = "PRESS [M] TO ABORT SESSION";
const BUILD: &str = concat!("v", env!("CARGO_PKG_VERSION"), " // CTF_BUILD // SIGNAL_BANDIT_MOD");

pub struct MenuPlugin;

impl Plugin for MenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Scene::Menu), spawn_menu)
            .add_systems(Update, launch_path.run_if(in_state(Scene::Menu)))
            .add_systems(OnExit(Scene::Menu), despawn_all::<MenuEntity>);
    }
}

#[derive(Component)]
struct MenuEntity;

/// The executables listed on the root menu, top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
enum MenuPath {
    SecurityBypass,
    SignalInterception,
    VoidSector,
}

impl MenuPath {
    const fn label(self) -> &'static str {
        match self {
            Self::SecurityBypass => "./PATH_1.exe",
            Self::SignalInterception => "./PATH_2.exe",
            Self::VoidSector => "./PATH_3.exe",
        }
    }

    const fn caption(self) -> &'static str {
        match self {
            Self::SecurityBypass => "Security Bypass Protocol",
            Self::SignalInterception => "Signal Interception",
            Self::VoidSector => "Void Sector",
        }
    }

    const fn scene(self) -> Scene {
        match self {
            Self::SecurityBypass => Scene::Snake,
            Self::SignalInterception => Scene::Scanner,
            Self::VoidSector => Scene::Void,
        }
    }

    const fn accent(self) -> Color {
        match self {
            Self::SecurityBypass => TERMINAL_GREEN,
            Self::SignalInterception => SIGNAL_CYAN,
            Self::VoidSector => ALERT_RED,
        }
    }
}

#[derive(Component)]
struct PathButton(MenuPath);

fn spawn_menu(mut commands: Commands) {
    let mut accents = Vec::new();
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(SCREEN_BLACK),
            MenuEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(TITLE),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(TERMINAL_GREEN),
            ));
            parent.spawn((
                Node {
                    width: Val::Px(560.0),
                    height: Val::Px(1.0),
                    margin: UiRect::vertical(Val::Px(8.0)),
                    ..default()
                },
                BackgroundColor(DARK_GREEN),
            ));
            parent.spawn((
                Text::new(SUBTITLE),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(DIM_GREEN),
                Node {
                    margin: UiRect::bottom(Val::Px(48.0)),
                    ..default()
                },
            ));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(16.0),
                    ..default()
                })
                .with_children(|paths| {
                    for path in MenuPath::iter() {
                        let button = spawn_terminal_button(
                            paths,
                            path.label(),
                            Some(path.caption()),
                            PathButton(path),
                        );
                        accents.push((button, path.accent()));
                    }
                });

            parent.spawn((
                Text::new(FOOTER),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(DIM_GREEN),
                Node {
                    margin: UiRect::top(Val::Px(64.0)),
                    ..default()
                },
            ));
            parent.spawn((
                Text::new(BUILD),
                TextFont {
                    font_size: 10.0,
                    ..default()
                },
                TextColor(DARK_GREEN),
            ));
        });

    for (button, accent) in accents {
        commands.entity(button).insert(BorderColor(accent));
    }
}

fn launch_path(
    buttons: Query<(&Interaction, &PathButton), Changed<Interaction>>,
    mut next_scene: ResMut<NextState<Scene>>,
) {
    for (interaction, PathButton(path)) in &buttons {
        if *interaction == Interaction::Pressed {
            info!("Launching {} ({})", path.label(), path.caption());
            next_scene.set(path.scene());
        }
    }
}
