use bevy::prelude::Color;

pub const SCREEN_BLACK: Color = Color::srgb(0.004, 0.008, 0.004);
pub const PANEL_BLACK: Color = Color::srgba(0.0, 0.0, 0.0, 0.8);

pub const TERMINAL_GREEN: Color = Color::srgb(0.0, 1.0, 0.255);
pub const DIM_GREEN: Color = Color::srgb(0.0, 0.561, 0.067);
pub const DARK_GREEN: Color = Color::srgb(0.02, 0.18, 0.06);
pub const GRID_GREEN: Color = Color::srgba(0.0, 1.0, 0.255, 0.08);

pub const SIGNAL_CYAN: Color = Color::srgb(0.0, 0.953, 1.0);
pub const PORTAL_PURPLE: Color = Color::srgb(0.659, 0.333, 0.969);
pub const PORTAL_YELLOW: Color = Color::srgb(0.918, 0.702, 0.031);

pub const ALERT_RED: Color = Color::srgb(1.0, 0.0, 0.235);
pub const DIM_RED: Color = Color::srgb(0.6, 0.06, 0.06);
pub const AMBER: Color = Color::srgb(0.85, 0.47, 0.02);
pub const MUTED_GRAY: Color = Color::srgb(0.42, 0.45, 0.5);
