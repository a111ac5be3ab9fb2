use core::time::Duration;

use arcade_helpers::cleanup::despawn_all;
use arcade_helpers::floating_marker::spawn_floating_marker;
use arcade_helpers::input::{field_size, field_to_world};
use arcade_helpers::palette::SIGNAL_CYAN;
use arcade_helpers::scene::Scene;
use bevy::prelude::*;

mod config;
mod entities;
mod hud;
mod interaction;
mod pointer;
mod render;
mod scanner;
mod session;
mod signal_log;
mod sounds;
mod visual;
mod win;

pub use config::{ScannerConfig, SessionError};
pub use entities::{Cat, CatId, CatState, Obstacle, ObstacleId, PlayField, Portal, PortalTint};
pub use interaction::PointerTarget;
pub use scanner::Scanner;
pub use session::{Session, SessionEvent, WinState};
pub use signal_log::{LogLine, SignalLog};
pub use visual::{CatVisual, cat_visual};

/// Tags every root entity of the scanner scene for teardown.
#[derive(Component)]
pub struct ScannerEntity;

/// Time since the session started, paused outside the scene.
#[derive(Resource, Default)]
struct SessionClock {
    elapsed: Duration,
}

pub struct SignalScannerPlugin;

impl Plugin for SignalScannerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScannerConfig>()
            .add_event::<SessionEvent>()
            .add_systems(
                OnEnter(Scene::Scanner),
                (
                    start_session,
                    (
                        render::spawn_field,
                        hud::spawn_hud,
                        sounds::load_signal_sounds,
                    )
                        .run_if(resource_exists::<Session>),
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    pointer::handle_pointer,
                    advance_session,
                    forward_session_events,
                    (
                        render::sync_cats,
                        render::sync_obstacles,
                        render::spin_portals,
                        render::drift_grid,
                        hud::update_counter,
                        hud::update_gauge,
                        hud::update_log,
                        hud::update_cursor_ring,
                        sounds::play_capture_sounds,
                        spawn_capture_markers,
                        win::show_win_screen,
                    ),
                )
                    .chain()
                    .run_if(in_state(Scene::Scanner))
                    .run_if(resource_exists::<Session>),
            )
            .add_systems(
                Update,
                win::return_to_root.run_if(in_state(Scene::Scanner)),
            )
            .add_systems(
                OnExit(Scene::Scanner),
                (despawn_all::<ScannerEntity>, end_session),
            );
    }
}

fn start_session(
    mut commands: Commands,
    config: Res<ScannerConfig>,
    windows: Query<&Window>,
    mut next_scene: ResMut<NextState<Scene>>,
) {
    let field = windows.get_single().map_or(
        Vec2::new(arcade_helpers::WINDOW_WIDTH, arcade_helpers::WINDOW_HEIGHT),
        field_size,
    );

    match Session::new(config.clone(), field, fastrand::Rng::new()) {
        Ok(session) => {
            info!("Scanner session started on a {}x{} field", field.x, field.y);
            commands.insert_resource(session);
            commands.insert_resource(SessionClock::default());
        }
        Err(err) => {
            error!("Cannot start the signal scanner: {err}");
            next_scene.set(Scene::Menu);
        }
    }
}

fn end_session(mut commands: Commands) {
    commands.remove_resource::<Session>();
    commands.remove_resource::<SessionClock>();
    commands.remove_resource::<sounds::SignalSounds>();
}

fn advance_session(
    time: Res<Time>,
    windows: Query<&Window>,
    mut clock: ResMut<SessionClock>,
    mut session: ResMut<Session>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    clock.elapsed += time.delta();
    session.tick(clock.elapsed, field_size(window));
}

fn forward_session_events(mut session: ResMut<Session>, mut events: EventWriter<SessionEvent>) {
    events.send_batch(session.drain_events());
}

fn spawn_capture_markers(
    mut commands: Commands,
    mut events: EventReader<SessionEvent>,
    session: Res<Session>,
) {
    let field = session.field().size;
    for event in events.read() {
        let SessionEvent::Captured { at, marker, .. } = event else {
            continue;
        };
        let position = field_to_world(*at - Vec2::new(0.0, 30.0), field);
        let entity = spawn_floating_marker(
            &mut commands,
            position,
            marker.clone(),
            SIGNAL_CYAN,
            config::MARKER_LIFETIME,
        );
        commands.entity(entity).insert(ScannerEntity);
    }
}
