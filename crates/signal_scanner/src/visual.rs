use core::time::Duration;

use crate::config::{BOB_AMPLITUDE, GLITCH_DURATION};
use crate::entities::{Cat, CatId, CatState};

/// Vertical hover of a roaming cat, in field pixels (positive is down).
pub fn bob_offset(now: Duration, id: CatId) -> f32 {
    let millis = now.as_secs_f32() * 1000.0;
    (millis * 0.003 + id.0 as f32).sin() * BOB_AMPLITUDE
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatVisual {
    pub visible: bool,
    pub clickable: bool,
    /// Added to the logical `y` when drawing.
    pub lift: f32,
    pub scale: f32,
    pub opacity: f32,
    pub brightness: f32,
    pub blur: f32,
    /// Rerouted cats flicker for a moment after leaving a portal.
    pub glitching: bool,
}

impl CatVisual {
    const HIDDEN: Self = Self {
        visible: false,
        clickable: false,
        lift: 0.0,
        scale: 1.0,
        opacity: 0.0,
        brightness: 1.0,
        blur: 0.0,
        glitching: false,
    };
}

pub fn cat_visual(cat: &Cat, now: Duration, exit_animation: Duration) -> CatVisual {
    match cat.state {
        CatState::Hidden { .. } => CatVisual::HIDDEN,
        CatState::Roaming => CatVisual {
            visible: true,
            clickable: true,
            lift: bob_offset(now, cat.id),
            scale: 1.0,
            opacity: 1.0,
            brightness: 1.0,
            blur: 0.0,
            glitching: cat
                .last_teleport
                .is_some_and(|at| now.saturating_sub(at) < GLITCH_DURATION),
        },
        CatState::Found { since } => {
            // Not stamped yet: the capture happened after the last tick.
            let elapsed = since.map_or(Duration::ZERO, |since| now.saturating_sub(since));
            if elapsed >= exit_animation {
                return CatVisual::HIDDEN;
            }
            let progress = elapsed.as_secs_f32() / exit_animation.as_secs_f32();
            CatVisual {
                visible: true,
                clickable: false,
                lift: -50.0 * progress,
                scale: 1.0 - 0.5 * progress,
                opacity: 1.0 - progress,
                brightness: 1.0 + 5.0 * progress,
                blur: 10.0 * progress,
                glitching: false,
            }
        }
    }
}
