use bevy::prelude::*;

use crate::entities::{CatId, CatState, ObstacleId};
use crate::session::{Session, SessionEvent, WinState, spread};
use crate::visual::bob_offset;

/// An obstacle following the pointer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drag {
    pub obstacle: ObstacleId,
    pub obstacle_start: Vec2,
    pub pointer_start: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    Obstacle(ObstacleId),
    Cat(CatId),
}

impl Session {
    /// Topmost thing under `point`: obstacles first, newest on top, then
    /// roaming cats where they are drawn this frame.
    pub fn pick(&self, point: Vec2) -> Option<PointerTarget> {
        if let Some(obstacle) = self.obstacles.iter().rev().find(|o| o.contains(point)) {
            return Some(PointerTarget::Obstacle(obstacle.id));
        }
        self.cats
            .iter()
            .rev()
            .filter(|cat| cat.is_roaming())
            .find(|cat| cat.contains(point, bob_offset(self.now, cat.id)))
            .map(|cat| PointerTarget::Cat(cat.id))
    }

    /// A press starts a drag on an obstacle or captures a cat.
    pub fn pointer_pressed(&mut self, point: Vec2) -> Option<PointerTarget> {
        self.cursor = Some(point);
        let target = self.pick(point)?;
        match target {
            PointerTarget::Obstacle(id) => {
                self.begin_drag(id, point);
            }
            PointerTarget::Cat(id) => {
                self.capture(id, point);
            }
        }
        Some(target)
    }

    /// Grabs obstacle `id` and raises it above the others.
    pub fn begin_drag(&mut self, id: ObstacleId, pointer: Vec2) -> bool {
        let Some(index) = self.obstacles.iter().position(|o| o.id == id) else {
            return false;
        };
        let obstacle = self.obstacles.remove(index);
        self.drag = Some(Drag {
            obstacle: id,
            obstacle_start: obstacle.position,
            pointer_start: pointer,
        });
        self.obstacles.push(obstacle);
        debug!("Grabbed obstacle {id}");
        true
    }

    /// Tracks the cursor and moves the dragged obstacle, uncovering its cat
    /// once it is far enough away.
    pub fn pointer_moved(&mut self, point: Vec2) {
        self.cursor = Some(point);
        let Some(drag) = self.drag else {
            return;
        };

        let field = self.field;
        let Some(obstacle) = self.obstacles.iter_mut().find(|o| o.id == drag.obstacle) else {
            return;
        };
        obstacle.position = field.clamp(
            drag.obstacle_start + point - drag.pointer_start,
            obstacle.size,
        );

        let Some(cat_id) = obstacle.assigned_cat else {
            return;
        };
        let Some(cat) = self
            .cats
            .iter_mut()
            .find(|cat| cat.id == cat_id && cat.is_hidden())
        else {
            return;
        };
        let displacement = obstacle.hiding_spot(cat.size).distance(cat.position);
        if displacement <= self.config.reveal_ratio * obstacle.size {
            return;
        }

        obstacle.assigned_cat = None;
        cat.state = CatState::Roaming;
        cat.velocity = Vec2::new(
            spread(&mut self.rng, self.config.reveal_speed),
            spread(&mut self.rng, self.config.reveal_speed),
        );
        let obstacle = obstacle.id;
        self.log.push(self.now, format!("INTERFERENCE CLEARED. SIGNAL #{cat_id} FOUND."));
        self.events.push(SessionEvent::Revealed {
            cat: cat_id,
            obstacle,
        });
    }

    pub fn pointer_released(&mut self) -> Option<ObstacleId> {
        let drag = self.drag.take()?;
        debug!("Released obstacle {}", drag.obstacle);
        Some(drag.obstacle)
    }

    /// Catches roaming cat `id`, clicked at `at`. Anything else is ignored.
    pub fn capture(&mut self, id: CatId, at: Vec2) -> bool {
        if self.win != WinState::Playing {
            return false;
        }
        let Some(cat) = self.cats.iter_mut().find(|cat| cat.id == id) else {
            return false;
        };
        if !cat.is_roaming() {
            return false;
        }

        cat.state = CatState::Found { since: None };
        self.found += 1;
        self.events.push(SessionEvent::Captured {
            cat: id,
            sound: (id.0 as usize).saturating_sub(1).checked_rem(self.config.sounds),
            at,
            marker: format!("+ SIGNAL_0x{:X}", id.0),
        });
        self.log.push(self.now, format!("SIGNAL ACQUIRED: ID_{id}"));

        if self.found == self.total() {
            self.log.push(self.now, "ROOT_ACCESS_GRANTED. DECRYPTING FLAG...");
            self.win = WinState::Pending {
                at: self.now + self.config.win_delay,
            };
        }
        true
    }
}
