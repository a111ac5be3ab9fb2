use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioSource};

/// Plays `handle` if it finished loading and reports whether it did.
///
/// Missing or broken sound files are skipped silently so playback can never
/// hold up gameplay.
pub fn play_if_loaded(
    audio: &Audio,
    asset_server: &AssetServer,
    handle: &Handle<AudioSource>,
    volume: f64,
) -> bool {
    if !asset_server.is_loaded_with_dependencies(handle.id()) {
        debug!("Skipping sound {:?}, not loaded", handle.path());
        return false;
    }
    audio.play(handle.clone()).with_volume(volume);
    true
}

/// Loops `handle` as background music once it is available.
pub fn loop_if_loaded(
    audio: &Audio,
    asset_server: &AssetServer,
    handle: &Handle<AudioSource>,
    volume: f64,
) -> bool {
    if !asset_server.is_loaded_with_dependencies(handle.id()) {
        debug!("Music {:?} not loaded yet", handle.path());
        return false;
    }
    audio.play(handle.clone()).looped().with_volume(volume);
    true
}
