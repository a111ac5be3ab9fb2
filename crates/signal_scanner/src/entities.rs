use core::fmt;
use core::time::Duration;

use bevy::prelude::*;
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CatId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObstacleId(pub u32);

impl fmt::Display for CatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Where a cat is in its life. A cat only ever moves Hidden -> Roaming -> Found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatState {
    /// Concealed under `obstacle`, invisible and not clickable.
    Hidden { obstacle: ObstacleId },
    /// Moving freely, can be captured.
    Roaming,
    /// Captured. `since` is stamped on the first frame after the capture
    /// and drives the exit animation.
    Found { since: Option<Duration> },
}

/// Top-left anchored in field coordinates, velocities in pixels per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Cat {
    pub id: CatId,
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: f32,
    /// Rotation in degrees, clockwise on screen.
    pub angle: f32,
    pub spin: f32,
    pub state: CatState,
    pub last_teleport: Option<Duration>,
}

impl Cat {
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(self.size / 2.0)
    }

    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CatState::Hidden { .. })
    }

    pub const fn is_roaming(&self) -> bool {
        matches!(self.state, CatState::Roaming)
    }

    pub const fn found(&self) -> bool {
        matches!(self.state, CatState::Found { .. })
    }

    pub const fn hiding_under(&self) -> Option<ObstacleId> {
        match self.state {
            CatState::Hidden { obstacle } => Some(obstacle),
            _ => None,
        }
    }

    /// Whether `point` falls on the cat drawn `lift` pixels below its logical position.
    pub fn contains(&self, point: Vec2, lift: f32) -> bool {
        let origin = self.position + Vec2::new(0.0, lift);
        Rect::from_corners(origin, origin + Vec2::splat(self.size)).contains(point)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub position: Vec2,
    pub size: f32,
    pub assigned_cat: Option<CatId>,
}

impl Obstacle {
    /// Top-left position that centers a cat of `cat_size` under this obstacle.
    pub fn hiding_spot(&self, cat_size: f32) -> Vec2 {
        self.position + Vec2::splat((self.size - cat_size) / 2.0)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        Rect::from_corners(self.position, self.position + Vec2::splat(self.size)).contains(point)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum PortalTint {
    Cyan,
    Purple,
    Yellow,
}

impl PortalTint {
    /// Tints cycle through the pairs.
    pub fn for_pair(pair: usize) -> Self {
        Self::iter().cycle().nth(pair).unwrap_or(Self::Cyan)
    }
}

/// One end of a tunnel. `pair` indexes the other end in the session's portal list.
#[derive(Debug, Clone, PartialEq)]
pub struct Portal {
    pub label: String,
    pub position: Vec2,
    pub pair: usize,
    pub tint: PortalTint,
}

impl Portal {
    pub fn center(&self) -> Vec2 {
        self.position + Vec2::splat(crate::config::PORTAL_SIZE / 2.0)
    }
}

/// The rectangle roaming entities live in: the window minus the HUD strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayField {
    pub size: Vec2,
    pub hud_height: f32,
}

impl PlayField {
    pub const fn min(&self) -> Vec2 {
        Vec2::new(0.0, self.hud_height)
    }

    /// Largest top-left position of an entity of `size` that keeps it inside.
    pub fn max_for(&self, size: f32) -> Vec2 {
        (self.size - Vec2::splat(size)).max(self.min())
    }

    pub fn clamp(&self, position: Vec2, size: f32) -> Vec2 {
        position.clamp(self.min(), self.max_for(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_at(position: Vec2, size: f32) -> Cat {
        Cat {
            id: CatId(1),
            position,
            velocity: Vec2::ZERO,
            size,
            angle: 0.0,
            spin: 0.0,
            state: CatState::Roaming,
            last_teleport: None,
        }
    }

    #[test]
    fn hiding_spot_centers_the_cat() {
        let obstacle = Obstacle {
            id: ObstacleId(1),
            position: Vec2::new(100.0, 200.0),
            size: 80.0,
            assigned_cat: None,
        };
        assert_eq!(
            obstacle.hiding_spot(40.0),
            Vec2::new(120.0, 220.0),
            "offset is half the size difference on both axes"
        );
    }

    #[test]
    fn cat_hit_box_follows_the_hover_lift() {
        let cat = cat_at(Vec2::new(10.0, 100.0), 40.0);
        assert!(cat.contains(Vec2::new(30.0, 141.0), 3.0), "lifted box covers y=141");
        assert!(!cat.contains(Vec2::new(30.0, 101.0), 3.0), "lifted box starts at y=103");
    }

    #[test]
    fn tints_cycle_per_pair() {
        assert_eq!(PortalTint::for_pair(0), PortalTint::Cyan, "first pair");
        assert_eq!(PortalTint::for_pair(2), PortalTint::Yellow, "third pair");
        assert_eq!(PortalTint::for_pair(3), PortalTint::Cyan, "fourth pair wraps");
    }

    #[test]
    fn clamp_keeps_entities_below_the_hud() {
        let field = PlayField {
            size: Vec2::new(1000.0, 600.0),
            hud_height: 60.0,
        };
        assert_eq!(
            field.clamp(Vec2::new(-5.0, 10.0), 50.0),
            Vec2::new(0.0, 60.0),
            "top-left corner clamps to the HUD edge"
        );
        assert_eq!(
            field.clamp(Vec2::new(990.0, 590.0), 50.0),
            Vec2::new(950.0, 550.0),
            "bottom-right corner keeps the entity whole"
        );
    }
}
