use bevy::asset::LoadState;
use bevy::prelude::*;
use thiserror::Error;

use crate::palette::{DARK_GREEN, DIM_GREEN, SIGNAL_CYAN};

const PLACEHOLDER_FILL: Color = Color::srgba(0.0, 0.0, 0.0, 0.9);
const PLACEHOLDER_BORDER: f32 = 2.0;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Failed to load asset {path}: {reason}")]
    LoadFailed { path: String, reason: String },
}

/// What a sprite stands for, used to label its placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    Signal,
    Object,
}

impl PlaceholderKind {
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Signal => "SIG",
            Self::Object => "OBJ",
        }
    }

    const fn border_color(self) -> Color {
        match self {
            Self::Signal => SIGNAL_CYAN,
            Self::Object => DARK_GREEN,
        }
    }

    const fn text_color(self) -> Color {
        match self {
            Self::Signal => SIGNAL_CYAN,
            Self::Object => DIM_GREEN,
        }
    }
}

/// An image loaded from the asset root that may be missing.
#[derive(Component)]
pub struct SpriteAsset {
    path: String,
    handle: Handle<Image>,
    kind: PlaceholderKind,
    size: f32,
}

/// Marks a sprite whose image failed and now shows a placeholder block.
#[derive(Component)]
pub struct Placeholder;

impl SpriteAsset {
    /// Starts loading `path` and returns the sprite to spawn along with its tracker.
    pub fn load(
        asset_server: &AssetServer,
        path: impl Into<String>,
        kind: PlaceholderKind,
        size: f32,
    ) -> (Sprite, Self) {
        let path = path.into();
        let handle: Handle<Image> = asset_server.load(path.clone());
        let sprite = Sprite {
            image: handle.clone(),
            custom_size: Some(Vec2::splat(size)),
            ..default()
        };
        (
            sprite,
            Self {
                path,
                handle,
                kind,
                size,
            },
        )
    }
}

/// Returns whether the image is ready, or the load error once it failed.
pub fn check_sprite_asset(
    asset_server: &AssetServer,
    asset: &SpriteAsset,
) -> Result<bool, AssetError> {
    match asset_server.get_load_state(asset.handle.id()) {
        Some(LoadState::Loaded) => Ok(true),
        Some(LoadState::Failed(err)) => Err(AssetError::LoadFailed {
            path: asset.path.clone(),
            reason: err.to_string(),
        }),
        _ => Ok(false),
    }
}

pub fn substitute_failed_sprites(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    mut query: Query<(Entity, &SpriteAsset, &mut Sprite), Without<Placeholder>>,
) {
    for (entity, asset, mut sprite) in &mut query {
        let Err(err) = check_sprite_asset(&asset_server, asset) else {
            continue;
        };
        warn!("{err}, showing a placeholder");

        sprite.image = Handle::default();
        sprite.color = PLACEHOLDER_FILL;

        let label_size = (asset.size * 0.15).max(8.0);
        commands
            .entity(entity)
            .insert(Placeholder)
            .with_children(|parent| {
                // Border, drawn just behind the fill.
                parent.spawn((
                    Sprite::from_color(
                        asset.kind.border_color(),
                        Vec2::splat(asset.size + PLACEHOLDER_BORDER * 2.0),
                    ),
                    Transform::from_xyz(0.0, 0.0, -0.01),
                ));
                parent.spawn((
                    Text2d::new(format!("ERR\n{}", asset.kind.tag())),
                    TextFont {
                        font_size: label_size,
                        ..default()
                    },
                    TextLayout::new_with_justify(JustifyText::Center),
                    TextColor(asset.kind.text_color()),
                    Transform::from_xyz(0.0, 0.0, 0.01),
                ));
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_tags_name_the_entity_kind() {
        assert_eq!(PlaceholderKind::Signal.tag(), "SIG", "cats show SIG");
        assert_eq!(PlaceholderKind::Object.tag(), "OBJ", "obstacles show OBJ");
    }

    #[test]
    fn load_errors_mention_the_path() {
        let err = AssetError::LoadFailed {
            path: "cat_3.png".to_string(),
            reason: "Path not found".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to load asset cat_3.png: Path not found",
            "error names the missing file"
        );
    }
}
