use arcade_helpers::get_default_app;
use arcade_helpers::scene::Scene;
use bevy::prelude::*;
use signal_scanner::SignalScannerPlugin;
use snake::SnakePlugin;

#[cfg(target_arch = "wasm32")]
mod browser;
mod menu;
mod music;
mod void_sector;

const TITLE: &str = "MASTER_OF_CATS";

/// Key that aborts the current scene and goes back to the menu.
const ABORT_KEY: KeyCode = KeyCode::KeyM;

pub fn run() -> AppExit {
    let mut app = get_default_app(TITLE);

    app.init_state::<Scene>()
        .add_plugins((
            menu::MenuPlugin,
            SnakePlugin,
            SignalScannerPlugin,
            void_sector::VoidSectorPlugin,
            music::MusicPlugin,
        ))
        .add_systems(Startup, spawn_camera)
        .add_systems(Update, (abort_session, log_scene_changes));

    #[cfg(target_arch = "wasm32")]
    app.add_plugins(browser::BrowserPlugin);

    app.run()
}

fn spawn_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn abort_session(
    keyboard: Res<ButtonInput<KeyCode>>,
    scene: Res<State<Scene>>,
    mut next_scene: ResMut<NextState<Scene>>,
) {
    if keyboard.just_pressed(ABORT_KEY) && *scene.get() != Scene::Menu {
        info!("Session aborted from {:?}", scene.get());
        next_scene.set(Scene::Menu);
    }
}

fn log_scene_changes(mut transitions: EventReader<StateTransitionEvent<Scene>>) {
    for transition in transitions.read() {
        let (Some(exited), Some(entered)) = (transition.exited, transition.entered) else {
            continue;
        };
        let exited: &'static str = exited.into();
        let entered: &'static str = entered.into();
        debug!("Scene {exited} -> {entered}");
    }
}

#[cfg(test)]
mod tests {
    use bevy::state::app::StatesPlugin;

    use super::*;

    fn app_in(scene: Scene) -> App {
        let mut app = App::new();
        app.add_plugins(StatesPlugin)
            .init_resource::<ButtonInput<KeyCode>>()
            .insert_state(scene)
            .add_systems(Update, abort_session);
        app
    }

    fn press_abort(app: &mut App) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(ABORT_KEY);
        app.update();
        app.update();
    }

    #[test]
    fn abort_key_returns_to_the_menu() {
        let mut app = app_in(Scene::Snake);
        press_abort(&mut app);
        assert_eq!(
            *app.world().resource::<State<Scene>>().get(),
            Scene::Menu,
            "M leaves the snake run"
        );
    }

    #[test]
    fn abort_key_is_ignored_on_the_menu() {
        let mut app = app_in(Scene::Menu);
        press_abort(&mut app);
        assert_eq!(
            *app.world().resource::<State<Scene>>().get(),
            Scene::Menu,
            "menu stays mounted"
        );
    }
}
