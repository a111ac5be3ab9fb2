use bevy::prelude::*;

/// Size of the play field, which is the size of the window.
pub fn field_size(window: &Window) -> Vec2 {
    Vec2::new(window.width(), window.height())
}

/// Maps a field position (origin top-left, `y` down) to the centered 2D camera's world space.
pub fn field_to_world(position: Vec2, field: Vec2) -> Vec2 {
    Vec2::new(position.x - field.x / 2.0, field.y / 2.0 - position.y)
}

/// Current pointer position, from the mouse or the first active touch.
pub fn pointer_position(touch_input: &Res<Touches>, windows: &Query<&Window>) -> Option<Vec2> {
    let window = windows.get_single().ok()?;
    window
        .cursor_position()
        .or_else(|| touch_input.iter().next().map(bevy::input::touch::Touch::position))
}

pub fn just_pressed_position(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
    windows: &Query<&Window>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else if touch_input.any_just_pressed() {
        let touch = touch_input.iter_just_pressed().next()?;
        Some(touch.position())
    } else {
        None
    }
}

pub fn just_released(
    button_input: &Res<ButtonInput<MouseButton>>,
    touch_input: &Res<Touches>,
) -> bool {
    button_input.just_released(MouseButton::Left)
        || touch_input.any_just_released()
        || touch_input.any_just_canceled()
}
