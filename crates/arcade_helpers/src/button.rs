use bevy::prelude::*;

use crate::palette::{DIM_GREEN, SCREEN_BLACK, TERMINAL_GREEN};

/// A bordered terminal-style button that inverts its colors on hover.
#[derive(Component)]
pub struct TerminalButton;

/// Spawns a button showing `title` with an optional smaller `caption` below,
/// tagged with `marker` so scenes can react to presses.
pub fn spawn_terminal_button(
    parent: &mut ChildBuilder<'_>,
    title: &str,
    caption: Option<&str>,
    marker: impl Component,
) -> Entity {
    parent
        .spawn((
            Button,
            Node {
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                padding: UiRect::axes(Val::Px(24.0), Val::Px(10.0)),
                border: UiRect::all(Val::Px(1.0)),
                min_width: Val::Px(280.0),
                ..default()
            },
            BorderColor(TERMINAL_GREEN),
            BackgroundColor(Color::NONE),
            TerminalButton,
            marker,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(title),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(TERMINAL_GREEN),
            ));
            if let Some(caption) = caption {
                button.spawn((
                    Text::new(caption),
                    TextFont {
                        font_size: 11.0,
                        ..default()
                    },
                    TextColor(DIM_GREEN),
                ));
            }
        })
        .id()
}

pub fn highlight_terminal_buttons(
    mut buttons: Query<
        (&Interaction, &mut BackgroundColor, &Children),
        (Changed<Interaction>, With<TerminalButton>),
    >,
    mut texts: Query<&mut TextColor>,
) {
    for (interaction, mut background, children) in &mut buttons {
        let (fill, ink) = match interaction {
            Interaction::Hovered | Interaction::Pressed => (TERMINAL_GREEN, SCREEN_BLACK),
            Interaction::None => (Color::NONE, TERMINAL_GREEN),
        };
        background.0 = fill;
        for child in children.iter() {
            if let Ok(mut color) = texts.get_mut(*child) {
                color.0 = ink;
            }
        }
    }
}
