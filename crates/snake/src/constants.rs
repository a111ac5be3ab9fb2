use core::time::Duration;

use bevy::prelude::*;

use crate::game::Cell;

// Board dimensions
pub const COLUMNS: i32 = 32;
pub const ROWS: i32 = 24;
pub const CELL_SIZE: f32 = 20.0;
pub const BOARD_WIDTH: f32 = COLUMNS as f32 * CELL_SIZE;
pub const BOARD_HEIGHT: f32 = ROWS as f32 * CELL_SIZE;

// Timing
pub const STEP_INTERVAL: Duration = Duration::from_millis(90);
pub const RUN_LIMIT: Duration = Duration::from_secs(45);
pub const RETURN_DELAY: Duration = Duration::from_secs(3);

// Initial layout
pub const START: Cell = Cell { x: 10, y: 10 };
pub const FIRST_FOOD: Cell = Cell { x: 5, y: 5 };

// Colors
pub const GRID_LINE_COLOR: Color = Color::srgb(0.0, 0.133, 0.0);
pub const BOARD_BORDER_COLOR: Color = Color::srgb(0.02, 0.2, 0.05);
pub const HEAD_GLOW_COLOR: Color = Color::srgba(0.0, 1.0, 0.255, 0.25);

// Z-index constants for rendering layers
pub const Z_BOARD: f32 = 0.0;
pub const Z_GRID: f32 = 0.5;
pub const Z_FOOD: f32 = 1.0;
pub const Z_SEGMENT: f32 = 1.5;
pub const Z_HEAD: f32 = 2.0;
