use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use wasm_bindgen::prelude::*;
use web_sys::KeyboardEvent;

// wgpu refuses surfaces larger than this in either dimension.
const MAX_CANVAS_SIZE: f32 = 2048.0;

pub struct BrowserPlugin;

impl Plugin for BrowserPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, block_page_shortcuts)
            .add_systems(Update, fit_canvas_to_browser);
    }
}

/// Keys swallowed before the page sees them: developer tools, view source
/// and the arrows, which would otherwise scroll the page during a snake run.
fn is_blocked_key(key: &str, ctrl: bool, shift: bool) -> bool {
    match key.to_ascii_uppercase().as_str() {
        "F12" | "ARROWUP" | "ARROWDOWN" | "ARROWLEFT" | "ARROWRIGHT" => true,
        "I" | "J" | "C" => ctrl && shift,
        "U" => ctrl,
        _ => false,
    }
}

fn block_page_shortcuts() {
    let Some(document) = web_sys::window().and_then(|window| window.document()) else {
        error!("No document available, page shortcuts stay active");
        return;
    };

    let context_menu = Closure::<dyn FnMut(web_sys::Event)>::new(|event: web_sys::Event| {
        event.prevent_default();
    });
    let key_down = Closure::<dyn FnMut(KeyboardEvent)>::new(|event: KeyboardEvent| {
        if is_blocked_key(&event.key(), event.ctrl_key(), event.shift_key()) {
            event.prevent_default();
        }
    });

    if let Err(err) = document
        .add_event_listener_with_callback("contextmenu", context_menu.as_ref().unchecked_ref())
    {
        error!("Could not block the context menu: {err:?}");
    }
    if let Err(err) =
        document.add_event_listener_with_callback("keydown", key_down.as_ref().unchecked_ref())
    {
        error!("Could not block page shortcuts: {err:?}");
    }

    // Listeners stay registered for the lifetime of the page.
    context_menu.forget();
    key_down.forget();
}

fn fit_canvas_to_browser(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    let Some(browser) = web_sys::window() else {
        return;
    };
    let (Ok(width), Ok(height)) = (browser.inner_width(), browser.inner_height()) else {
        return;
    };
    let (Some(width), Some(height)) = (width.as_f64(), height.as_f64()) else {
        return;
    };
    let width = (width as f32).min(MAX_CANVAS_SIZE);
    let height = (height as f32).min(MAX_CANVAS_SIZE);

    for mut window in &mut windows {
        if (window.resolution.width() - width).abs() > f32::EPSILON
            || (window.resolution.height() - height).abs() > f32::EPSILON
        {
            window.resolution.set(width, height);
        }
    }
}
