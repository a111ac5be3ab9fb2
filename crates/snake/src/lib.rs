use arcade_helpers::cleanup::despawn_all;
use arcade_helpers::palette::{ALERT_RED, DIM_GREEN, DIM_RED, SCREEN_BLACK, TERMINAL_GREEN};
use arcade_helpers::scene::Scene;
use arcade_helpers::terminal_screen::{TerminalScreen, spawn_terminal_screen};
use bevy::prelude::*;
use strum::IntoEnumIterator;

mod constants;
mod game;

use constants::{
    BOARD_BORDER_COLOR, BOARD_HEIGHT, BOARD_WIDTH, CELL_SIZE, COLUMNS, FIRST_FOOD, GRID_LINE_COLOR,
    HEAD_GLOW_COLOR, RETURN_DELAY, ROWS, RUN_LIMIT, START, STEP_INTERVAL, Z_BOARD, Z_FOOD, Z_GRID,
    Z_HEAD, Z_SEGMENT,
};
pub use game::{Cell, Direction, SnakeGame, StepOutcome};

pub struct SnakePlugin;

/// Tags every root entity of the snake scene for teardown.
#[derive(Component)]
struct SnakeEntity;

#[derive(Component)]
struct Segment;

#[derive(Component)]
struct Food;

#[derive(Resource)]
struct SnakeRun {
    game: SnakeGame,
    step_timer: Timer,
    limit: Timer,
    /// Counts down to the menu once the run is over.
    ending: Option<Timer>,
    redraw: bool,
}

impl Plugin for SnakePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Scene::Snake), (start_run, spawn_board).chain())
            .add_systems(
                Update,
                (steer, advance, draw_snake, leave_after_crash)
                    .chain()
                    .run_if(in_state(Scene::Snake))
                    .run_if(resource_exists::<SnakeRun>),
            )
            .add_systems(OnExit(Scene::Snake), (despawn_all::<SnakeEntity>, end_run));
    }
}

const fn arrow_key(direction: Direction) -> KeyCode {
    match direction {
        Direction::Up => KeyCode::ArrowUp,
        Direction::Down => KeyCode::ArrowDown,
        Direction::Left => KeyCode::ArrowLeft,
        Direction::Right => KeyCode::ArrowRight,
    }
}

/// Center of `cell` in world space, the board being centered on the camera.
fn cell_to_world(cell: Cell) -> Vec2 {
    Vec2::new(
        (cell.x as f32 + 0.5).mul_add(CELL_SIZE, -BOARD_WIDTH / 2.0),
        BOARD_HEIGHT / 2.0 - (cell.y as f32 + 0.5) * CELL_SIZE,
    )
}

fn start_run(mut commands: Commands) {
    let game = SnakeGame::new(
        COLUMNS,
        ROWS,
        [START],
        Direction::Right,
        FIRST_FOOD,
        fastrand::Rng::new(),
    );
    commands.insert_resource(SnakeRun {
        game,
        step_timer: Timer::new(STEP_INTERVAL, TimerMode::Repeating),
        limit: Timer::new(RUN_LIMIT, TimerMode::Once),
        ending: None,
        redraw: true,
    });
    info!("Snake run started");
}

fn end_run(mut commands: Commands) {
    commands.remove_resource::<SnakeRun>();
}

fn spawn_board(mut commands: Commands) {
    commands
        .spawn((
            Sprite::from_color(BOARD_BORDER_COLOR, Vec2::new(BOARD_WIDTH + 2.0, BOARD_HEIGHT + 2.0)),
            Transform::from_xyz(0.0, 0.0, Z_BOARD),
            SnakeEntity,
        ))
        .with_children(|board| {
            board.spawn((
                Sprite::from_color(SCREEN_BLACK, Vec2::new(BOARD_WIDTH, BOARD_HEIGHT)),
                Transform::from_xyz(0.0, 0.0, 0.1),
            ));
            for column in 0..COLUMNS {
                let x = column as f32 * CELL_SIZE - BOARD_WIDTH / 2.0;
                board.spawn((
                    Sprite::from_color(GRID_LINE_COLOR, Vec2::new(1.0, BOARD_HEIGHT)),
                    Transform::from_xyz(x, 0.0, Z_GRID),
                ));
            }
            for row in 0..ROWS {
                let y = BOARD_HEIGHT / 2.0 - row as f32 * CELL_SIZE;
                board.spawn((
                    Sprite::from_color(GRID_LINE_COLOR, Vec2::new(BOARD_WIDTH, 1.0)),
                    Transform::from_xyz(0.0, y, Z_GRID),
                ));
            }
        });

    commands.spawn((
        Sprite::from_color(ALERT_RED, Vec2::splat(CELL_SIZE - 4.0)),
        Transform::from_translation(cell_to_world(FIRST_FOOD).extend(Z_FOOD)),
        Food,
        SnakeEntity,
    ));

    commands.spawn((
        Text::new("> RUNNING SNAKE_v1.0.exe"),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(DIM_GREEN),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(24.0),
            right: Val::Px(24.0),
            ..default()
        },
        SnakeEntity,
    ));
}

fn steer(keyboard: Res<ButtonInput<KeyCode>>, mut run: ResMut<SnakeRun>) {
    if run.ending.is_some() {
        return;
    }
    for direction in Direction::iter() {
        if keyboard.just_pressed(arrow_key(direction)) && run.game.turn(direction) {
            let name: &'static str = direction.into();
            debug!("Snake turned {name}");
        }
    }
}

fn advance(mut commands: Commands, time: Res<Time>, mut run: ResMut<SnakeRun>) {
    if run.ending.is_some() {
        return;
    }

    run.limit.tick(time.delta());
    run.step_timer.tick(time.delta());

    let mut crashed = false;
    for _ in 0..run.step_timer.times_finished_this_tick() {
        run.redraw = true;
        if run.game.step() == StepOutcome::Crashed {
            crashed = true;
            break;
        }
    }

    if crashed || run.limit.finished() {
        info!(
            "Snake run over after {:.1}s with {} segments",
            run.limit.elapsed_secs(),
            run.game.len()
        );
        run.ending = Some(Timer::new(RETURN_DELAY, TimerMode::Once));
        let screen = TerminalScreen {
            title: "CONNECTION TERMINATED",
            subtitle: "RUNTIME_ERROR: STACK_OVERFLOW",
            lines: &[],
            color: ALERT_RED,
            dim_color: DIM_RED,
        };
        spawn_terminal_screen(&mut commands, &screen, SnakeEntity);
    }
}

fn draw_snake(
    mut commands: Commands,
    mut run: ResMut<SnakeRun>,
    segments: Query<Entity, With<Segment>>,
    mut food: Query<&mut Transform, With<Food>>,
) {
    if !run.redraw {
        return;
    }
    run.redraw = false;

    for entity in &segments {
        commands.entity(entity).despawn_recursive();
    }
    for (index, cell) in run.game.body().enumerate() {
        let position = cell_to_world(cell);
        if index == 0 {
            commands
                .spawn((
                    Sprite::from_color(TERMINAL_GREEN, Vec2::splat(CELL_SIZE - 2.0)),
                    Transform::from_translation(position.extend(Z_HEAD)),
                    Segment,
                    SnakeEntity,
                ))
                .with_children(|head| {
                    head.spawn((
                        Sprite::from_color(HEAD_GLOW_COLOR, Vec2::splat(CELL_SIZE + 8.0)),
                        Transform::from_xyz(0.0, 0.0, -0.1),
                    ));
                });
        } else {
            commands.spawn((
                Sprite::from_color(DIM_GREEN, Vec2::splat(CELL_SIZE - 2.0)),
                Transform::from_translation(position.extend(Z_SEGMENT)),
                Segment,
                SnakeEntity,
            ));
        }
    }

    for mut transform in &mut food {
        transform.translation = cell_to_world(run.game.food()).extend(Z_FOOD);
    }
}

fn leave_after_crash(
    time: Res<Time>,
    mut run: ResMut<SnakeRun>,
    mut next_scene: ResMut<NextState<Scene>>,
) {
    let Some(ending) = run.ending.as_mut() else {
        return;
    };
    if ending.tick(time.delta()).just_finished() {
        next_scene.set(Scene::Menu);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_corners_map_to_world_corners() {
        assert_eq!(
            cell_to_world(Cell { x: 0, y: 0 }),
            Vec2::new(-310.0, 230.0),
            "top-left cell sits in the top-left corner"
        );
        assert_eq!(
            cell_to_world(Cell {
                x: COLUMNS - 1,
                y: ROWS - 1
            }),
            Vec2::new(310.0, -230.0),
            "bottom-right cell sits in the bottom-right corner"
        );
    }

    #[test]
    fn every_direction_has_an_arrow_key() {
        let keys: Vec<KeyCode> = Direction::iter().map(arrow_key).collect();
        assert_eq!(keys.len(), 4, "four arrows");
        assert!(
            keys.iter()
                .all(|key| keys.iter().filter(|other| *other == key).count() == 1),
            "no key is shared"
        );
    }
}
