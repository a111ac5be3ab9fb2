use bevy::prelude::*;

use crate::palette::PANEL_BLACK;

/// A full-screen terminal message: a big title, a subtitle and a few log lines.
pub struct TerminalScreen<'a> {
    pub title: &'a str,
    pub subtitle: &'a str,
    pub lines: &'a [&'a str],
    pub color: Color,
    pub dim_color: Color,
}

/// Spawns `screen` as a UI overlay and tags its root with `marker`.
pub fn spawn_terminal_screen(
    commands: &mut Commands,
    screen: &TerminalScreen<'_>,
    marker: impl Component,
) -> Entity {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                row_gap: Val::Px(8.0),
                ..default()
            },
            BackgroundColor(PANEL_BLACK),
            GlobalZIndex(20),
            marker,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(screen.title),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(screen.color),
            ));
            parent.spawn((
                Text::new(screen.subtitle),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(screen.dim_color),
            ));

            if screen.lines.is_empty() {
                return;
            }

            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        margin: UiRect::top(Val::Px(40.0)),
                        padding: UiRect::all(Val::Px(16.0)),
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                    BorderColor(screen.dim_color.with_alpha(0.3)),
                ))
                .with_children(|report| {
                    for line in screen.lines {
                        report.spawn((
                            Text::new(format!("> {line}")),
                            TextFont {
                                font_size: 12.0,
                                ..default()
                            },
                            TextColor(screen.dim_color),
                        ));
                    }
                });
        })
        .id()
}
