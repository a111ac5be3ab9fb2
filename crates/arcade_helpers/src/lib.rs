mod app;
pub use app::*;

pub mod audio;
pub mod button;
pub mod cleanup;
pub mod floating_marker;
pub mod input;
pub mod palette;
pub mod scene;
pub mod sprite_assets;
pub mod terminal_screen;
