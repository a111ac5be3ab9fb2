use core::f32::consts::FRAC_PI_2;
use core::time::Duration;

use arcade_helpers::input::field_to_world;
use arcade_helpers::palette::{GRID_GREEN, PORTAL_PURPLE, PORTAL_YELLOW, SIGNAL_CYAN};
use arcade_helpers::sprite_assets::{Placeholder, PlaceholderKind, SpriteAsset};
use bevy::prelude::*;

use crate::ScannerEntity;
use crate::config::PORTAL_SIZE;
use crate::entities::{CatId, ObstacleId, Portal, PortalTint};
use crate::session::Session;
use crate::visual::cat_visual;

const GRID_SPACING: f32 = 60.0;
const GRID_PARALLAX: f32 = -0.02;

const DASH_LENGTH: f32 = 8.0;
const DASH_GAP: f32 = 6.0;
const LINK_ALPHA: f32 = 0.25;

const PORTAL_SPIN: f32 = 1.5;

const Z_GRID: f32 = 0.0;
const Z_LINK: f32 = 1.0;
const Z_PORTAL: f32 = 2.0;
const Z_CAT: f32 = 5.0;
const Z_OBSTACLE: f32 = 10.0;

const RESTING_TINT: Color = Color::srgb(0.55, 0.6, 0.45);
const GRABBED_TINT: Color = Color::srgb(1.0, 0.85, 0.5);

#[derive(Component)]
pub struct CatSprite(CatId);

/// Glow behind a cat, used by the beam-up blur and the reroute glitch.
#[derive(Component)]
pub struct CatHalo;

#[derive(Component)]
pub struct ObstacleSprite(ObstacleId);

#[derive(Component)]
pub struct PortalRing;

#[derive(Component)]
pub struct BackgroundGrid;

pub const fn tint_color(tint: PortalTint) -> Color {
    match tint {
        PortalTint::Cyan => SIGNAL_CYAN,
        PortalTint::Purple => PORTAL_PURPLE,
        PortalTint::Yellow => PORTAL_YELLOW,
    }
}

fn flicker(now: Duration) -> bool {
    (now.as_millis() / 60) % 2 == 0
}

pub fn spawn_field(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    session: Res<Session>,
) {
    let field = session.field().size;

    spawn_grid(&mut commands, field);

    let ring = meshes.add(Annulus::new(PORTAL_SIZE / 2.0 - 4.0, PORTAL_SIZE / 2.0));
    let disc = meshes.add(Circle::new(PORTAL_SIZE / 2.0 - 6.0));
    for portal in session.portals() {
        spawn_portal(&mut commands, &mut materials, &ring, &disc, portal, field);
    }
    for (index, portal) in session.portals().iter().enumerate() {
        // Each pair is linked once, from its first end.
        if index >= portal.pair {
            continue;
        }
        if let Some(exit) = session.portals().get(portal.pair) {
            spawn_link(&mut commands, portal, exit, field);
        }
    }

    for cat in session.cats() {
        let (sprite, asset) = SpriteAsset::load(
            &asset_server,
            format!("cat_{}.png", cat.id),
            PlaceholderKind::Signal,
            cat.size,
        );
        commands
            .spawn((
                sprite,
                asset,
                CatSprite(cat.id),
                Transform::from_translation(field_to_world(cat.center(), field).extend(Z_CAT)),
                Visibility::Hidden,
                ScannerEntity,
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite::from_color(SIGNAL_CYAN.with_alpha(0.0), Vec2::splat(cat.size)),
                    Transform::from_xyz(0.0, 0.0, -0.02),
                    CatHalo,
                ));
            });
    }

    for obstacle in session.obstacles() {
        let (mut sprite, asset) = SpriteAsset::load(
            &asset_server,
            format!("object_{}.png", obstacle.id),
            PlaceholderKind::Object,
            obstacle.size,
        );
        sprite.color = RESTING_TINT;
        let center = obstacle.position + Vec2::splat(obstacle.size / 2.0);
        commands.spawn((
            sprite,
            asset,
            ObstacleSprite(obstacle.id),
            Transform::from_translation(field_to_world(center, field).extend(Z_OBSTACLE)),
            ScannerEntity,
        ));
    }
}

fn spawn_grid(commands: &mut Commands, field: Vec2) {
    // One spacing of overhang on every side so the parallax never shows an edge.
    let width = field.x + GRID_SPACING * 2.0;
    let height = field.y + GRID_SPACING * 2.0;
    let columns = (width / GRID_SPACING).ceil() as usize;
    let rows = (height / GRID_SPACING).ceil() as usize;

    commands
        .spawn((
            Transform::from_xyz(0.0, 0.0, Z_GRID),
            Visibility::default(),
            BackgroundGrid,
            ScannerEntity,
        ))
        .with_children(|parent| {
            for column in 0..=columns {
                let x = column as f32 * GRID_SPACING - GRID_SPACING;
                parent.spawn((
                    Sprite::from_color(GRID_GREEN, Vec2::new(1.0, height)),
                    Transform::from_translation(
                        field_to_world(Vec2::new(x, field.y / 2.0), field).extend(0.0),
                    ),
                ));
            }
            for row in 0..=rows {
                let y = row as f32 * GRID_SPACING - GRID_SPACING;
                parent.spawn((
                    Sprite::from_color(GRID_GREEN, Vec2::new(width, 1.0)),
                    Transform::from_translation(
                        field_to_world(Vec2::new(field.x / 2.0, y), field).extend(0.0),
                    ),
                ));
            }
        });
}

fn spawn_portal(
    commands: &mut Commands,
    materials: &mut Assets<ColorMaterial>,
    ring: &Handle<Mesh>,
    disc: &Handle<Mesh>,
    portal: &Portal,
    field: Vec2,
) {
    let color = tint_color(portal.tint);
    let center = field_to_world(portal.center(), field);

    commands
        .spawn((
            Transform::from_translation(center.extend(Z_PORTAL)),
            Visibility::default(),
            ScannerEntity,
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh2d(disc.clone()),
                MeshMaterial2d(materials.add(ColorMaterial::from(color.with_alpha(0.15)))),
                Transform::from_xyz(0.0, 0.0, -0.01),
            ));
            parent
                .spawn((
                    Mesh2d(ring.clone()),
                    MeshMaterial2d(materials.add(ColorMaterial::from(color))),
                    Transform::default(),
                    PortalRing,
                ))
                .with_children(|notches| {
                    // Notches make the spin visible.
                    for quarter in 0..4 {
                        let angle = quarter as f32 * FRAC_PI_2;
                        let offset = Vec2::from_angle(angle) * (PORTAL_SIZE / 2.0 + 3.0);
                        notches.spawn((
                            Sprite::from_color(color, Vec2::new(6.0, 3.0)),
                            Transform::from_translation(offset.extend(0.01))
                                .with_rotation(Quat::from_rotation_z(angle)),
                        ));
                    }
                });
            parent.spawn((
                Text2d::new(portal.label.clone()),
                TextFont {
                    font_size: 9.0,
                    ..default()
                },
                TextColor(color),
                Transform::from_xyz(0.0, PORTAL_SIZE / 2.0 + 12.0, 0.02),
            ));
        });
}

fn spawn_link(commands: &mut Commands, entry: &Portal, exit: &Portal, field: Vec2) {
    let start = field_to_world(entry.center(), field);
    let end = field_to_world(exit.center(), field);
    let length = start.distance(end);
    let Some(direction) = (end - start).try_normalize() else {
        return;
    };
    let rotation = Quat::from_rotation_z(direction.to_angle());
    let color = tint_color(entry.tint).with_alpha(LINK_ALPHA);
    let dashes = (length / (DASH_LENGTH + DASH_GAP)) as usize;

    commands
        .spawn((
            Transform::from_xyz(0.0, 0.0, Z_LINK),
            Visibility::default(),
            ScannerEntity,
        ))
        .with_children(|parent| {
            for dash in 0..dashes {
                let along = dash as f32 * (DASH_LENGTH + DASH_GAP) + DASH_LENGTH / 2.0;
                parent.spawn((
                    Sprite::from_color(color, Vec2::new(DASH_LENGTH, 1.0)),
                    Transform::from_translation((start + direction * along).extend(0.0))
                        .with_rotation(rotation),
                ));
            }
        });
}

pub fn sync_cats(
    session: Res<Session>,
    mut cats: Query<(
        &CatSprite,
        &mut Transform,
        &mut Sprite,
        &mut Visibility,
        Has<Placeholder>,
        &Children,
    )>,
    mut halos: Query<&mut Sprite, (With<CatHalo>, Without<CatSprite>)>,
) {
    let field = session.field().size;
    let now = session.now();
    let exit_animation = session.config().exit_animation;

    for (cat_sprite, mut transform, mut sprite, mut visibility, placeholder, children) in &mut cats {
        let Some(cat) = session.cat(cat_sprite.0) else {
            continue;
        };
        let visual = cat_visual(cat, now, exit_animation);
        if !visual.visible {
            *visibility = Visibility::Hidden;
            continue;
        }
        *visibility = Visibility::Inherited;

        let glitch = visual.glitching && flicker(now);
        let jitter = if glitch { 3.0 } else { 0.0 };
        let center = cat.center() + Vec2::new(jitter, visual.lift);
        transform.translation =
            field_to_world(center, field).extend(Z_CAT + cat.id.0 as f32 * 0.001);
        transform.rotation = Quat::from_rotation_z(-cat.angle.to_radians());
        transform.scale = Vec3::splat(visual.scale);

        let opacity = if glitch {
            visual.opacity * 0.4
        } else {
            visual.opacity
        };
        if placeholder {
            sprite.color.set_alpha(opacity);
        } else {
            let brightness = visual.brightness;
            sprite.color = Color::linear_rgba(brightness, brightness, brightness, opacity);
        }

        let glow = if visual.glitching {
            0.5
        } else {
            (visual.blur / 10.0) * visual.opacity
        };
        for child in children.iter() {
            if let Ok(mut halo) = halos.get_mut(*child) {
                halo.color = SIGNAL_CYAN.with_alpha(glow);
                halo.custom_size = Some(Vec2::splat(cat.size + visual.blur * 2.0));
            }
        }
    }
}

pub fn sync_obstacles(
    session: Res<Session>,
    mut obstacles: Query<(&ObstacleSprite, &mut Transform, &mut Sprite, Has<Placeholder>)>,
) {
    let field = session.field().size;
    let dragging = session.dragging();

    for (obstacle_sprite, mut transform, mut sprite, placeholder) in &mut obstacles {
        let Some((order, obstacle)) = session
            .obstacles()
            .iter()
            .enumerate()
            .find(|(_, obstacle)| obstacle.id == obstacle_sprite.0)
        else {
            continue;
        };

        let center = obstacle.position + Vec2::splat(obstacle.size / 2.0);
        transform.translation =
            field_to_world(center, field).extend(Z_OBSTACLE + order as f32 * 0.01);

        let grabbed = dragging == Some(obstacle.id);
        transform.scale = Vec3::splat(if grabbed { 1.05 } else { 1.0 });
        if !placeholder {
            sprite.color = if grabbed { GRABBED_TINT } else { RESTING_TINT };
        }
    }
}

pub fn spin_portals(time: Res<Time>, mut rings: Query<&mut Transform, With<PortalRing>>) {
    for mut transform in &mut rings {
        transform.rotate_z(PORTAL_SPIN * time.delta_secs());
    }
}

/// Shifts the grid slightly against the cursor.
pub fn drift_grid(session: Res<Session>, mut grids: Query<&mut Transform, With<BackgroundGrid>>) {
    let offset = session.cursor().unwrap_or_default() * GRID_PARALLAX;
    for mut transform in &mut grids {
        transform.translation.x = offset.x;
        transform.translation.y = -offset.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tint_has_its_own_color() {
        let cyan = tint_color(PortalTint::Cyan);
        let purple = tint_color(PortalTint::Purple);
        let yellow = tint_color(PortalTint::Yellow);
        assert_ne!(cyan, purple, "cyan and purple differ");
        assert_ne!(purple, yellow, "purple and yellow differ");
        assert_ne!(yellow, cyan, "yellow and cyan differ");
    }

    #[test]
    fn glitch_flickers_every_sixty_milliseconds() {
        assert!(flicker(Duration::from_millis(10)), "first slice is on");
        assert!(!flicker(Duration::from_millis(70)), "second slice is off");
        assert!(flicker(Duration::from_millis(130)), "third slice is on again");
    }
}
