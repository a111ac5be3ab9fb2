use arcade_helpers::input::{just_pressed_position, just_released, pointer_position};
use bevy::prelude::*;

use crate::session::Session;

/// Feeds mouse and touch input to the session, in field coordinates.
pub fn handle_pointer(
    button_input: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    windows: Query<&Window>,
    mut session: ResMut<Session>,
) {
    if let Some(position) = pointer_position(&touch_input, &windows) {
        session.pointer_moved(position);
    }

    if let Some(position) = just_pressed_position(&button_input, &touch_input, &windows) {
        session.pointer_pressed(position);
    }

    if just_released(&button_input, &touch_input) {
        session.pointer_released();
    }
}
