use arcade_helpers::input::field_to_world;
use arcade_helpers::palette::{DARK_GREEN, DIM_GREEN, PANEL_BLACK, SIGNAL_CYAN, TERMINAL_GREEN};
use bevy::prelude::*;

use crate::ScannerEntity;
use crate::config::LOG_DEPTH;
use crate::session::Session;

const GAUGE_WIDTH: f32 = 160.0;
const LOG_WIDTH: f32 = 360.0;
const RADAR_FRAMES: [&str; 4] = ["[|]", "[/]", "[-]", "[\\]"];
const Z_CURSOR: f32 = 40.0;

#[derive(Component)]
pub struct TargetCounter;

#[derive(Component)]
pub struct GaugeFill;

#[derive(Component)]
pub struct AlertGlyph;

#[derive(Component)]
pub struct RadarGlyph;

#[derive(Component)]
pub struct PingGlyph;

/// Row `0` is the newest log line.
#[derive(Component)]
pub struct LogRow(usize);

#[derive(Component)]
pub struct CursorRing;

#[derive(Component)]
pub struct Crosshair;

fn label(text: &str, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

pub fn spawn_hud(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    session: Res<Session>,
) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(0.0),
                left: Val::Px(0.0),
                width: Val::Percent(100.0),
                height: Val::Px(session.config().hud_height),
                padding: UiRect::horizontal(Val::Px(24.0)),
                border: UiRect::bottom(Val::Px(1.0)),
                align_items: AlignItems::Center,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            BackgroundColor(PANEL_BLACK),
            BorderColor(DARK_GREEN),
            GlobalZIndex(10),
            ScannerEntity,
        ))
        .with_children(|bar| {
            bar.spawn(Node {
                flex_direction: FlexDirection::Column,
                ..default()
            })
            .with_children(|targets| {
                targets.spawn(label("TARGETS", 10.0, DIM_GREEN));
                targets.spawn((
                    label(&format!("00 / {}", session.total()), 28.0, TERMINAL_GREEN),
                    TargetCounter,
                ));
            });

            bar.spawn(Node {
                align_items: AlignItems::Center,
                column_gap: Val::Px(16.0),
                ..default()
            })
            .with_children(|sensor| {
                sensor
                    .spawn(Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::End,
                        row_gap: Val::Px(4.0),
                        ..default()
                    })
                    .with_children(|meter| {
                        meter
                            .spawn(Node {
                                column_gap: Val::Px(6.0),
                                ..default()
                            })
                            .with_children(|caption| {
                                caption.spawn((
                                    label("!", 10.0, SIGNAL_CYAN),
                                    Visibility::Hidden,
                                    AlertGlyph,
                                ));
                                caption.spawn(label("PROXIMITY_SENSOR", 10.0, DIM_GREEN));
                            });
                        meter
                            .spawn((
                                Node {
                                    width: Val::Px(GAUGE_WIDTH),
                                    height: Val::Px(8.0),
                                    border: UiRect::all(Val::Px(1.0)),
                                    ..default()
                                },
                                BorderColor(DARK_GREEN),
                            ))
                            .with_children(|gauge| {
                                gauge.spawn((
                                    Node {
                                        width: Val::Percent(0.0),
                                        height: Val::Percent(100.0),
                                        ..default()
                                    },
                                    BackgroundColor(TERMINAL_GREEN),
                                    GaugeFill,
                                ));
                            });
                    });
                sensor.spawn((label("[|]", 18.0, DIM_GREEN), RadarGlyph));
                sensor.spawn((
                    label("((o))", 12.0, SIGNAL_CYAN),
                    Visibility::Hidden,
                    PingGlyph,
                ));
            });
        });

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(16.0),
                bottom: Val::Px(16.0),
                width: Val::Px(LOG_WIDTH),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(8.0)),
                border: UiRect::all(Val::Px(1.0)),
                row_gap: Val::Px(2.0),
                ..default()
            },
            BackgroundColor(PANEL_BLACK),
            BorderColor(DARK_GREEN),
            GlobalZIndex(10),
            ScannerEntity,
        ))
        .with_children(|panel| {
            for row in 0..LOG_DEPTH {
                panel.spawn((label("", 11.0, DIM_GREEN), LogRow(row)));
            }
        });

    let ring_material = materials.add(ColorMaterial::from(SIGNAL_CYAN.with_alpha(0.0)));
    commands.spawn((
        Mesh2d(meshes.add(Annulus::new(0.96, 1.0))),
        MeshMaterial2d(ring_material),
        Transform::from_xyz(0.0, 0.0, Z_CURSOR),
        Visibility::Hidden,
        CursorRing,
        ScannerEntity,
    ));
    commands
        .spawn((
            Transform::from_xyz(0.0, 0.0, Z_CURSOR),
            Visibility::Hidden,
            Crosshair,
            ScannerEntity,
        ))
        .with_children(|crosshair| {
            let color = SIGNAL_CYAN.with_alpha(0.5);
            crosshair.spawn(Sprite::from_color(color, Vec2::new(16.0, 1.0)));
            crosshair.spawn(Sprite::from_color(color, Vec2::new(1.0, 16.0)));
        });
}

pub fn update_counter(session: Res<Session>, mut counters: Query<&mut Text, With<TargetCounter>>) {
    let value = format!("{:02} / {}", session.found_count(), session.total());
    for mut text in &mut counters {
        if text.0 != value {
            text.0.clone_from(&value);
        }
    }
}

pub fn update_gauge(
    session: Res<Session>,
    mut fills: Query<(&mut Node, &mut BackgroundColor), With<GaugeFill>>,
    mut alerts: Query<&mut Visibility, (With<AlertGlyph>, Without<PingGlyph>)>,
    mut pings: Query<&mut Visibility, (With<PingGlyph>, Without<AlertGlyph>)>,
    mut radars: Query<(&mut Text, &mut TextColor), With<RadarGlyph>>,
) {
    let scanner = session.scanner();
    let level = scanner.level.clamp(0.0, 100.0);

    for (mut node, mut color) in &mut fills {
        node.width = Val::Percent(level);
        color.0 = if scanner.alert() {
            SIGNAL_CYAN
        } else {
            TERMINAL_GREEN
        };
    }
    for mut visibility in &mut alerts {
        *visibility = visible_if(scanner.alert());
    }
    for mut visibility in &mut pings {
        *visibility = visible_if(scanner.pinging());
    }

    let frame = if scanner.radar_spinning() {
        (session.now().as_millis() / 100) as usize % RADAR_FRAMES.len()
    } else {
        0
    };
    let glyph = RADAR_FRAMES.get(frame).copied().unwrap_or("[|]");
    for (mut text, mut color) in &mut radars {
        if text.0 != glyph {
            text.0 = glyph.to_string();
        }
        color.0 = if scanner.radar_spinning() {
            SIGNAL_CYAN
        } else {
            DIM_GREEN
        };
    }
}

const fn visible_if(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

pub fn update_log(session: Res<Session>, mut rows: Query<(&LogRow, &mut Text, &mut TextColor)>) {
    for (row, mut text, mut color) in &mut rows {
        let Some(line) = session.log().lines().nth(row.0) else {
            text.0.clear();
            continue;
        };
        let value = format!("{} {}", line.stamp(), line.text);
        if text.0 != value {
            text.0 = value;
        }
        color.0 = if line.is_acquisition() {
            SIGNAL_CYAN
        } else if row.0 == 0 {
            TERMINAL_GREEN
        } else {
            DIM_GREEN
        };
    }
}

pub fn update_cursor_ring(
    session: Res<Session>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    mut rings: Query<
        (&mut Transform, &mut Visibility, &MeshMaterial2d<ColorMaterial>),
        (With<CursorRing>, Without<Crosshair>),
    >,
    mut crosshairs: Query<(&mut Transform, &mut Visibility), (With<Crosshair>, Without<CursorRing>)>,
) {
    let scanner = session.scanner();
    let cursor = session
        .cursor()
        .filter(|_| scanner.cursor_ring_visible())
        .map(|cursor| field_to_world(cursor, session.field().size));

    for (mut transform, mut visibility, material) in &mut rings {
        let Some(position) = cursor else {
            *visibility = Visibility::Hidden;
            continue;
        };
        *visibility = Visibility::Inherited;
        transform.translation = position.extend(Z_CURSOR);
        // Diameter grows with the signal.
        transform.scale = Vec3::splat((60.0 + scanner.level) / 2.0);
        if let Some(material) = materials.get_mut(&material.0) {
            material.color = SIGNAL_CYAN.with_alpha(scanner.level / 200.0);
        }
    }

    for (mut transform, mut visibility) in &mut crosshairs {
        *visibility = cursor.map_or(Visibility::Hidden, |_| Visibility::Inherited);
        if let Some(position) = cursor {
            transform.translation = position.extend(Z_CURSOR);
        }
    }
}
