use bevy::prelude::*;
use strum::{EnumIter, IntoStaticStr};

/// Which screen of the arcade is mounted.
///
/// Every mini-game registers its systems with `run_if(in_state(..))` and
/// builds/tears down its session on `OnEnter`/`OnExit`, so leaving a scene
/// stops its loop before its state is released.
#[derive(States, Default, Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
pub enum Scene {
    #[default]
    Menu,
    Snake,
    Scanner,
    Void,
}

impl Scene {
    /// Whether the menu offers a button for this scene.
    pub fn is_playable(self) -> bool {
        !matches!(self, Self::Menu)
    }
}
