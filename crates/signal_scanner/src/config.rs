use core::ops::Range;
use core::time::Duration;

use bevy::prelude::*;
use thiserror::Error;

/// Height of the HUD strip at the top of the field; nothing roams above it.
pub const HUD_HEIGHT: f32 = 60.0;
/// Portals are drawn as 48px rings, their center is `position + 24`.
pub const PORTAL_SIZE: f32 = 48.0;
/// Distance kept between portals and the field edges.
pub const PORTAL_MARGIN: f32 = 100.0;
/// Retries when a portal pair lands too close together.
pub const PORTAL_PLACEMENT_ATTEMPTS: usize = 16;
/// Lines kept in the on-screen log panel.
pub const LOG_DEPTH: usize = 7;
/// The scanner gauge reads 0..=100.
pub const MAX_SIGNAL: f32 = 100.0;
/// Amplitude of the vertical hover of roaming cats.
pub const BOB_AMPLITUDE: f32 = 3.0;
/// How long a rerouted cat flickers after leaving a portal.
pub const GLITCH_DURATION: Duration = Duration::from_millis(500);
/// Lifetime of the `+ SIGNAL_0x..` marker shown on capture.
pub const MARKER_LIFETIME: Duration = Duration::from_millis(1000);
/// Volume of the capture sounds.
pub const CAPTURE_VOLUME: f64 = 0.3;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SessionError {
    #[error("Cannot hide {hidden} cats with {cats} cats and {obstacles} obstacles")]
    TooManyHidden {
        hidden: usize,
        cats: usize,
        obstacles: usize,
    },

    #[error("The {what} size range {start}..{end} is empty")]
    EmptyRange {
        what: &'static str,
        start: f32,
        end: f32,
    },

    #[error("A {width}x{height} field leaves no room below the {hud}px HUD")]
    FieldTooSmall { width: f32, height: f32, hud: f32 },
}

/// Tunables of a scanner session.
///
/// The defaults are the canonical game: 18 cats, 6 of them hidden under 18
/// obstacles, 3 portal pairs.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ScannerConfig {
    pub cats: usize,
    pub obstacles: usize,
    pub hidden: usize,
    pub portal_pairs: usize,
    pub sounds: usize,
    pub hud_height: f32,
    pub cat_size: Range<f32>,
    pub obstacle_size: Range<f32>,
    /// Largest per-axis speed of freshly spawned cats, in px per frame.
    pub spawn_speed: f32,
    /// Largest per-axis speed of a cat that was just uncovered.
    pub reveal_speed: f32,
    /// Largest spin, in degrees per frame.
    pub spin_speed: f32,
    pub portal_radius: f32,
    pub portal_separation: f32,
    pub teleport_cooldown: Duration,
    pub exit_animation: Duration,
    pub scanner_radius: f32,
    pub scanner_scale: f32,
    pub scanner_damping: f32,
    /// Fraction of the obstacle size it must be dragged to uncover its cat.
    pub reveal_ratio: f32,
    pub win_delay: Duration,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            cats: 18,
            obstacles: 18,
            hidden: 6,
            portal_pairs: 3,
            sounds: 18,
            hud_height: HUD_HEIGHT,
            cat_size: 35.0..70.0,
            obstacle_size: 60.0..110.0,
            spawn_speed: 0.6,
            reveal_speed: 2.0,
            spin_speed: 0.25,
            portal_radius: 35.0,
            portal_separation: 150.0,
            teleport_cooldown: Duration::from_millis(2500),
            exit_animation: Duration::from_millis(500),
            scanner_radius: 250.0,
            scanner_scale: 2.5,
            scanner_damping: 0.1,
            reveal_ratio: 0.6,
            win_delay: Duration::from_millis(1200),
        }
    }
}

impl ScannerConfig {
    /// Checks that a session built from this config on `field` can be won.
    pub fn validate(&self, field: Vec2) -> Result<(), SessionError> {
        if self.hidden > self.cats || self.hidden > self.obstacles {
            return Err(SessionError::TooManyHidden {
                hidden: self.hidden,
                cats: self.cats,
                obstacles: self.obstacles,
            });
        }

        for (what, range) in [("cat", &self.cat_size), ("obstacle", &self.obstacle_size)] {
            if range.is_empty() || range.start <= 0.0 {
                return Err(SessionError::EmptyRange {
                    what,
                    start: range.start,
                    end: range.end,
                });
            }
        }

        let largest = self.obstacle_size.end.max(self.cat_size.end);
        if field.x < largest || field.y - self.hud_height < largest {
            return Err(SessionError::FieldTooSmall {
                width: field.x,
                height: field.y,
                hud: self.hud_height,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIELD: Vec2 = Vec2::new(1000.0, 600.0);

    #[test]
    fn default_config_is_playable() {
        assert_eq!(
            ScannerConfig::default().validate(FIELD),
            Ok(()),
            "canonical constants must validate"
        );
    }

    #[test]
    fn rejects_more_hidden_cats_than_obstacles() {
        let config = ScannerConfig {
            obstacles: 4,
            ..ScannerConfig::default()
        };
        assert_eq!(
            config.validate(FIELD),
            Err(SessionError::TooManyHidden {
                hidden: 6,
                cats: 18,
                obstacles: 4
            }),
            "six cats need six obstacles"
        );
    }

    #[test]
    fn rejects_empty_size_ranges() {
        let config = ScannerConfig {
            cat_size: 40.0..40.0,
            ..ScannerConfig::default()
        };
        assert!(
            matches!(
                config.validate(FIELD),
                Err(SessionError::EmptyRange { what: "cat", .. })
            ),
            "an empty cat size range cannot be sampled"
        );
    }

    #[test]
    fn rejects_fields_shorter_than_the_hud() {
        let config = ScannerConfig::default();
        assert!(
            matches!(
                config.validate(Vec2::new(1000.0, 100.0)),
                Err(SessionError::FieldTooSmall { .. })
            ),
            "obstacles must fit below the HUD"
        );
    }
}
