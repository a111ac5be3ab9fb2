use bevy::prelude::*;

use crate::config::MAX_SIGNAL;
use crate::entities::Cat;

/// Raw scanner reading at `cursor`: the strongest signal of any hidden,
/// uncaught cat within `radius`, in `0..=MAX_SIGNAL`.
pub fn signal_target<'a>(
    cats: impl IntoIterator<Item = &'a Cat>,
    cursor: Vec2,
    radius: f32,
    scale: f32,
) -> f32 {
    cats.into_iter()
        .filter(|cat| cat.is_hidden() && !cat.found())
        .map(|cat| cursor.distance(cat.center()))
        .filter(|distance| *distance < radius)
        .map(|distance| (radius - distance) / scale)
        .fold(0.0, f32::max)
        .clamp(0.0, MAX_SIGNAL)
}

/// The displayed gauge level, which eases toward the raw reading.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Scanner {
    pub level: f32,
}

impl Scanner {
    pub fn approach(&mut self, target: f32, damping: f32) {
        self.level += (target - self.level) * damping;
    }

    pub fn radar_spinning(&self) -> bool {
        self.level > 10.0
    }

    pub fn pinging(&self) -> bool {
        self.level > 60.0
    }

    pub fn alert(&self) -> bool {
        self.level > 50.0
    }

    pub fn cursor_ring_visible(&self) -> bool {
        self.level > 5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{CatId, CatState, ObstacleId};

    fn cat(center: Vec2, state: CatState) -> Cat {
        Cat {
            id: CatId(1),
            position: center - Vec2::splat(20.0),
            velocity: Vec2::ZERO,
            size: 40.0,
            angle: 0.0,
            spin: 0.0,
            state,
            last_teleport: None,
        }
    }

    const HIDDEN: CatState = CatState::Hidden {
        obstacle: ObstacleId(1),
    };

    #[test]
    fn strongest_hidden_cat_wins() {
        let cats = [
            cat(Vec2::new(100.0, 100.0), HIDDEN),
            cat(Vec2::new(200.0, 100.0), HIDDEN),
        ];
        let reading = signal_target(&cats, Vec2::new(150.0, 100.0), 250.0, 2.5);
        assert!((reading - 80.0).abs() < 1e-4, "both at 50 px read (250 - 50) / 2.5");

        let reading = signal_target(&cats, Vec2::new(100.0, 100.0), 250.0, 2.5);
        assert!((reading - MAX_SIGNAL).abs() < 1e-4, "on top of a cat reads full");
    }

    #[test]
    fn roaming_and_distant_cats_are_silent() {
        let cats = [
            cat(Vec2::new(100.0, 100.0), CatState::Roaming),
            cat(Vec2::new(600.0, 100.0), HIDDEN),
        ];
        let reading = signal_target(&cats, Vec2::new(100.0, 100.0), 250.0, 2.5);
        assert!(reading.abs() < 1e-6, "only hidden cats within the radius count");
    }

    #[test]
    fn level_eases_toward_the_target() {
        let mut scanner = Scanner::default();
        scanner.approach(100.0, 0.1);
        assert!((scanner.level - 10.0).abs() < 1e-4, "first step covers a tenth");
        scanner.approach(100.0, 0.1);
        assert!((scanner.level - 19.0).abs() < 1e-4, "second step covers a tenth of the rest");
    }
}
