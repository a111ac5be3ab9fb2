use arcade_helpers::audio::loop_if_loaded;
use bevy::asset::LoadState;
use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioSource};

const MUSIC_PATH: &str = "melodie.mp3";
const MUSIC_VOLUME: f64 = 0.25;

pub struct MusicPlugin;

impl Plugin for MusicPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_music)
            .add_systems(Update, (arm_on_first_click, start_music).chain());
    }
}

/// Browsers refuse audio before the first user gesture, so the track waits for a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MusicState {
    WaitingForClick,
    /// Clicked, playback starts as soon as the track is loaded.
    Armed,
    Playing,
    /// The track could not be loaded, the arcade stays silent.
    Unavailable,
}

impl MusicState {
    const fn clicked(self) -> Self {
        match self {
            Self::WaitingForClick => Self::Armed,
            other => other,
        }
    }

    const fn wants_playback(self) -> bool {
        matches!(self, Self::Armed)
    }
}

#[derive(Resource)]
struct BackgroundMusic {
    handle: Handle<AudioSource>,
    state: MusicState,
}

fn load_music(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(BackgroundMusic {
        handle: asset_server.load(MUSIC_PATH),
        state: MusicState::WaitingForClick,
    });
}

fn arm_on_first_click(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    mut music: ResMut<BackgroundMusic>,
) {
    if music.state != MusicState::WaitingForClick {
        return;
    }
    if mouse.get_just_pressed().next().is_some() || touches.any_just_pressed() {
        music.state = music.state.clicked();
    }
}

fn start_music(
    audio: Res<Audio>,
    asset_server: Res<AssetServer>,
    mut music: ResMut<BackgroundMusic>,
) {
    if !music.state.wants_playback() {
        return;
    }
    if let Some(LoadState::Failed(err)) = asset_server.get_load_state(music.handle.id()) {
        warn!("Background music unavailable: {err}");
        music.state = MusicState::Unavailable;
        return;
    }
    if loop_if_loaded(&audio, &asset_server, &music.handle, MUSIC_VOLUME) {
        info!("Background music started");
        music.state = MusicState::Playing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_the_first_click_arms_playback() {
        let armed = MusicState::WaitingForClick.clicked();
        assert_eq!(armed, MusicState::Armed, "first click arms");
        assert!(armed.wants_playback(), "armed music waits for the file");
        assert_eq!(armed.clicked(), MusicState::Armed, "later clicks change nothing");
    }

    #[test]
    fn playing_and_missing_tracks_are_left_alone() {
        for state in [MusicState::Playing, MusicState::Unavailable] {
            assert_eq!(state.clicked(), state, "{state:?} ignores clicks");
            assert!(!state.wants_playback(), "{state:?} never restarts");
        }
    }
}
