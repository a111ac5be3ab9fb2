use core::time::Duration;

use bevy::prelude::*;

/// Text that drifts upwards and fades out, then despawns.
#[derive(Component)]
pub struct FloatingMarker {
    timer: Timer,
    origin: Vec2,
}

const DRIFT: f32 = 30.0;

pub fn spawn_floating_marker(
    commands: &mut Commands,
    world_position: Vec2,
    text: impl Into<String>,
    color: Color,
    lifetime: Duration,
) -> Entity {
    commands
        .spawn((
            Text2d::new(text),
            TextFont {
                font_size: 14.0,
                ..default()
            },
            TextColor(color),
            Transform::from_translation(world_position.extend(50.0)),
            FloatingMarker {
                timer: Timer::new(lifetime, TimerMode::Once),
                origin: world_position,
            },
        ))
        .id()
}

pub fn animate_floating_markers(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut TextColor, &mut FloatingMarker)>,
) {
    for (entity, mut transform, mut color, mut marker) in &mut query {
        marker.timer.tick(time.delta());
        let progress = marker.timer.fraction();

        transform.translation.y = DRIFT.mul_add(progress, marker.origin.y);
        color.0.set_alpha(1.0 - progress);

        if marker.timer.finished() {
            commands.entity(entity).despawn_recursive();
        }
    }
}
