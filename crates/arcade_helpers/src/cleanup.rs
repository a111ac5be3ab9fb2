use bevy::prelude::*;

/// Despawns every entity tagged with `T`, children included.
///
/// Scenes tag only their root entities, so this runs `OnExit` to release
/// everything a scene spawned.
pub fn despawn_all<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
