use arcade_helpers::audio::play_if_loaded;
use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioSource};

use crate::config::{CAPTURE_VOLUME, ScannerConfig};
use crate::session::SessionEvent;

/// Capture sounds, `sound_1.wav` onwards. Missing files are simply never played.
#[derive(Resource)]
pub struct SignalSounds(Vec<Handle<AudioSource>>);

pub fn load_signal_sounds(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    config: Res<ScannerConfig>,
) {
    let handles = (1..=config.sounds)
        .map(|index| asset_server.load(format!("sound_{index}.wav")))
        .collect();
    commands.insert_resource(SignalSounds(handles));
}

pub fn play_capture_sounds(
    mut events: EventReader<SessionEvent>,
    sounds: Option<Res<SignalSounds>>,
    audio: Res<Audio>,
    asset_server: Res<AssetServer>,
) {
    for event in events.read() {
        let SessionEvent::Captured {
            sound: Some(index), ..
        } = event
        else {
            continue;
        };
        let Some(handle) = sounds.as_ref().and_then(|sounds| sounds.0.get(*index)) else {
            continue;
        };
        play_if_loaded(&audio, &asset_server, handle, CAPTURE_VOLUME);
    }
}
