use bevy::asset::{AssetMetaCheck, AssetMode};
use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{WgpuSettings, WgpuSettingsPriority};
use bevy::window::{WindowMode, WindowResolution};

use crate::button::highlight_terminal_buttons;
use crate::floating_marker::animate_floating_markers;
use crate::sprite_assets::substitute_failed_sprites;

// The arcade monitor is a fixed 5:3 screen, the play field of every scene.
pub const WINDOW_WIDTH: f32 = 1000.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

const LOG_FILTER: &str = "wgpu=error,naga=warn,bevy_render=warn,bevy_app=warn";

/// Systems every scene relies on: placeholder sprites, floating markers, buttons and audio.
pub struct ArcadeHelpersPlugin;

impl Plugin for ArcadeHelpersPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(bevy_kira_audio::AudioPlugin).add_systems(
            Update,
            (
                substitute_failed_sprites,
                animate_floating_markers,
                highlight_terminal_buttons,
            ),
        );
    }
}

// Creates a Bevy app with the window, asset root and log settings shared by the arcade.
pub fn get_default_app(title: &str) -> App {
    let mut app = App::new();

    let asset_plugin = AssetPlugin {
        mode: AssetMode::Unprocessed,
        file_path: "assets".to_string(),
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: title.to_string(),
            present_mode: bevy::window::PresentMode::Fifo,
            resolution: WindowResolution::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            canvas: Some("#arcade".into()),
            fit_canvas_to_parent: true,
            mode: WindowMode::Windowed,
            // Browser shortcuts are filtered by the runner, keep F5 and friends working.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    let render_plugin = RenderPlugin {
        render_creation: bevy::render::settings::RenderCreation::Automatic(WgpuSettings {
            backends: Some(
                bevy::render::settings::Backends::BROWSER_WEBGPU
                    | bevy::render::settings::Backends::GL
                    | bevy::render::settings::Backends::PRIMARY,
            ),
            power_preference: bevy::render::settings::PowerPreference::HighPerformance,
            priority: WgpuSettingsPriority::Functionality,
            ..Default::default()
        }),
        ..Default::default()
    };

    let log_plugin = LogPlugin {
        level: Level::INFO,
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin)
            .set(window_plugin)
            .set(render_plugin)
            .set(log_plugin),
    );

    // Keeps the frame rate steady, the simulations advance once per frame.
    app.add_plugins(bevy_framepace::FramepacePlugin);
    app.add_plugins(ArcadeHelpersPlugin);

    app.insert_resource(ClearColor(crate::palette::SCREEN_BLACK));

    app
}
