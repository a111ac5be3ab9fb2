use std::collections::VecDeque;

use fastrand::Rng;
use strum::{EnumIter, IntoStaticStr};

/// A board cell, `y` growing downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub const fn is_perpendicular(self, other: Self) -> bool {
        self.is_horizontal() != other.is_horizontal()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Moved,
    Ate,
    Crashed,
}

#[derive(Debug)]
pub struct SnakeGame {
    columns: i32,
    rows: i32,
    /// Head first.
    body: VecDeque<Cell>,
    heading: Direction,
    /// Direction of the last completed step, turns are judged against it.
    last_step: Direction,
    food: Cell,
    crashed: bool,
    rng: Rng,
}

impl SnakeGame {
    pub fn new(
        columns: i32,
        rows: i32,
        body: impl IntoIterator<Item = Cell>,
        heading: Direction,
        food: Cell,
        rng: Rng,
    ) -> Self {
        Self {
            columns,
            rows,
            body: body.into_iter().collect(),
            heading,
            last_step: heading,
            food,
            crashed: false,
            rng,
        }
    }

    /// Requests a new heading. Only turns across the last step are accepted,
    /// so two quick presses cannot reverse the snake into itself.
    pub fn turn(&mut self, direction: Direction) -> bool {
        if !direction.is_perpendicular(self.last_step) {
            return false;
        }
        self.heading = direction;
        true
    }

    pub fn step(&mut self) -> StepOutcome {
        if self.crashed {
            return StepOutcome::Crashed;
        }
        let Some(head) = self.body.front().copied() else {
            self.crashed = true;
            return StepOutcome::Crashed;
        };

        let (dx, dy) = self.heading.offset();
        let next = Cell {
            x: (head.x + dx).rem_euclid(self.columns),
            y: (head.y + dy).rem_euclid(self.rows),
        };
        if self.body.contains(&next) {
            self.crashed = true;
            return StepOutcome::Crashed;
        }

        self.body.push_front(next);
        self.last_step = self.heading;
        if next == self.food {
            self.food = self.free_cell().unwrap_or(next);
            StepOutcome::Ate
        } else {
            self.body.pop_back();
            StepOutcome::Moved
        }
    }

    fn free_cell(&mut self) -> Option<Cell> {
        let free: Vec<Cell> = (0..self.rows)
            .flat_map(|y| (0..self.columns).map(move |x| Cell { x, y }))
            .filter(|cell| !self.body.contains(cell))
            .collect();
        if free.is_empty() {
            return None;
        }
        free.get(self.rng.usize(..free.len())).copied()
    }

    pub fn head(&self) -> Option<Cell> {
        self.body.front().copied()
    }

    pub fn body(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub const fn food(&self) -> Cell {
        self.food
    }

    pub const fn heading(&self) -> Direction {
        self.heading
    }

    pub const fn is_crashed(&self) -> bool {
        self.crashed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(x: i32, y: i32) -> Cell {
        Cell { x, y }
    }

    fn game(body: &[Cell], heading: Direction, food: Cell) -> SnakeGame {
        SnakeGame::new(32, 24, body.iter().copied(), heading, food, Rng::with_seed(42))
    }

    #[test]
    fn wraps_around_every_edge() {
        let mut snake = game(&[cell(31, 10)], Direction::Right, cell(5, 5));
        assert_eq!(snake.step(), StepOutcome::Moved, "plain move");
        assert_eq!(snake.head(), Some(cell(0, 10)), "right edge wraps to the left");

        let mut snake = game(&[cell(4, 0)], Direction::Up, cell(5, 5));
        snake.step();
        assert_eq!(snake.head(), Some(cell(4, 23)), "top edge wraps to the bottom");
    }

    #[test]
    fn eating_grows_and_moves_the_food() {
        let mut snake = game(&[cell(4, 5)], Direction::Right, cell(5, 5));
        assert_eq!(snake.step(), StepOutcome::Ate, "food is right ahead");
        assert_eq!(snake.len(), 2, "grew by one");
        let food = snake.food();
        assert!(!snake.body().any(|segment| segment == food), "food respawns on a free cell");

        assert_eq!(snake.step(), StepOutcome::Moved, "next step is a plain move");
        assert_eq!(snake.len(), 2, "length kept while not eating");
    }

    #[test]
    fn food_takes_the_last_free_cell() {
        let mut snake = SnakeGame::new(
            3,
            1,
            [cell(0, 0)],
            Direction::Right,
            cell(1, 0),
            Rng::with_seed(1),
        );
        assert_eq!(snake.step(), StepOutcome::Ate, "eats at (1, 0)");
        assert_eq!(snake.food(), cell(2, 0), "only (2, 0) is free");
    }

    #[test]
    fn running_into_the_body_ends_the_run() {
        // Head at (5, 5) heading down into its own body.
        let body = [cell(5, 5), cell(6, 5), cell(6, 6), cell(5, 6), cell(4, 6)];
        let mut snake = game(&body, Direction::Down, cell(0, 0));
        assert_eq!(snake.step(), StepOutcome::Crashed, "(5, 6) is taken");
        assert!(snake.is_crashed(), "run is over");
        assert_eq!(snake.step(), StepOutcome::Crashed, "stays over");
        assert_eq!(snake.head(), Some(cell(5, 5)), "no further movement");
    }

    #[test]
    fn reversing_is_rejected() {
        let mut snake = game(&[cell(10, 10)], Direction::Right, cell(5, 5));
        assert!(!snake.turn(Direction::Left), "straight back is refused");
        assert!(!snake.turn(Direction::Right), "same direction is not a turn");
        assert!(snake.turn(Direction::Up), "perpendicular turn is fine");
        assert!(
            !snake.turn(Direction::Left),
            "still judged against the last step, which went right"
        );
        assert_eq!(snake.heading(), Direction::Up, "pending turn kept");

        snake.step();
        assert!(snake.turn(Direction::Left), "after stepping up, left is a turn");
    }
}
