use core::ops::Range;
use core::time::Duration;

use bevy::prelude::*;
use fastrand::Rng;

use crate::config::{
    PORTAL_MARGIN, PORTAL_PLACEMENT_ATTEMPTS, PORTAL_SIZE, ScannerConfig, SessionError,
};
use crate::entities::{Cat, CatId, CatState, Obstacle, ObstacleId, PlayField, Portal, PortalTint};
use crate::interaction::Drag;
use crate::scanner::{Scanner, signal_target};
use crate::signal_log::SignalLog;

/// Something the presentation layer has to react to.
#[derive(Event, Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Captured {
        cat: CatId,
        /// Which capture sound to play, `None` when there are no sounds.
        sound: Option<usize>,
        at: Vec2,
        marker: String,
    },
    Revealed {
        cat: CatId,
        obstacle: ObstacleId,
    },
    Rerouted {
        cat: CatId,
        from: usize,
        to: usize,
    },
    Won,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WinState {
    Playing,
    /// Every cat is caught, the win is announced at `at`.
    Pending { at: Duration },
    Won,
}

/// One scanner game in field coordinates, advanced by [`Session::tick`].
/// The Bevy systems only feed it input and draw its state.
#[derive(Resource, Debug)]
pub struct Session {
    pub(crate) config: ScannerConfig,
    pub(crate) field: PlayField,
    pub(crate) cats: Vec<Cat>,
    /// Draw order, the last obstacle is on top.
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) portals: Vec<Portal>,
    pub(crate) log: SignalLog,
    pub(crate) events: Vec<SessionEvent>,
    pub(crate) found: usize,
    pub(crate) scanner: Scanner,
    pub(crate) cursor: Option<Vec2>,
    pub(crate) drag: Option<Drag>,
    pub(crate) win: WinState,
    pub(crate) now: Duration,
    pub(crate) rng: Rng,
}

pub(crate) fn sample(rng: &mut Rng, range: &Range<f32>) -> f32 {
    range.start + rng.f32() * (range.end - range.start)
}

/// Uniform in `(-max, max)`.
pub(crate) fn spread(rng: &mut Rng, max: f32) -> f32 {
    (rng.f32() - 0.5) * 2.0 * max
}

fn point_in(rng: &mut Rng, min: Vec2, max: Vec2) -> Vec2 {
    Vec2::new(
        min.x + rng.f32() * (max.x - min.x),
        min.y + rng.f32() * (max.y - min.y),
    )
}

fn place_portals(rng: &mut Rng, field: &PlayField, config: &ScannerConfig) -> Vec<Portal> {
    let min = Vec2::new(PORTAL_MARGIN, field.hud_height.max(PORTAL_MARGIN));
    let max = (field.size - Vec2::splat(PORTAL_MARGIN + PORTAL_SIZE)).max(min);

    let mut portals = Vec::with_capacity(config.portal_pairs * 2);
    for pair in 0..config.portal_pairs {
        let entry = point_in(rng, min, max);
        let mut exit = point_in(rng, min, max);
        for _ in 0..PORTAL_PLACEMENT_ATTEMPTS {
            if entry.distance(exit) >= config.portal_separation {
                break;
            }
            exit = point_in(rng, min, max);
        }

        let tint = PortalTint::for_pair(pair);
        let index = portals.len();
        portals.push(Portal {
            label: format!("PORT-{pair}A"),
            position: entry,
            pair: index + 1,
            tint,
        });
        portals.push(Portal {
            label: format!("PORT-{pair}B"),
            position: exit,
            pair: index,
            tint,
        });
    }
    portals
}

fn hide(cat: &mut Cat, obstacle: &mut Obstacle) {
    cat.position = obstacle.hiding_spot(cat.size);
    cat.velocity = Vec2::ZERO;
    cat.state = CatState::Hidden {
        obstacle: obstacle.id,
    };
    obstacle.assigned_cat = Some(cat.id);
}

/// Integrates one frame of motion and bounces off the field edges.
fn roam(cat: &mut Cat, field: &PlayField) {
    cat.position += cat.velocity;
    cat.angle += cat.spin;

    let min = field.min();
    let max = field.max_for(cat.size);
    if cat.position.x <= min.x {
        cat.position.x = min.x;
        cat.velocity.x = cat.velocity.x.abs();
    }
    if cat.position.x >= max.x {
        cat.position.x = max.x;
        cat.velocity.x = -cat.velocity.x.abs();
    }
    if cat.position.y <= min.y {
        cat.position.y = min.y;
        cat.velocity.y = cat.velocity.y.abs();
    }
    if cat.position.y >= max.y {
        cat.position.y = max.y;
        cat.velocity.y = -cat.velocity.y.abs();
    }
}

/// Moves `cat` through the first portal it touches, returning the entry
/// and exit indices.
fn teleport(
    cat: &mut Cat,
    portals: &[Portal],
    field: &PlayField,
    config: &ScannerConfig,
    now: Duration,
) -> Option<(usize, usize)> {
    let ready = cat
        .last_teleport
        .is_none_or(|at| now.saturating_sub(at) > config.teleport_cooldown);
    if !ready {
        return None;
    }

    let center = cat.center();
    let (entry, portal) = portals
        .iter()
        .enumerate()
        .find(|(_, portal)| center.distance(portal.center()) < config.portal_radius)?;
    let exit = portals.get(portal.pair)?;

    cat.position = field.clamp(exit.center() - Vec2::splat(cat.size / 2.0), cat.size);
    cat.last_teleport = Some(now);
    Some((entry, portal.pair))
}

impl Session {
    /// Spawns a fresh session on a field of `field` pixels.
    pub fn new(config: ScannerConfig, field: Vec2, mut rng: Rng) -> Result<Self, SessionError> {
        config.validate(field)?;
        let play = PlayField {
            size: field,
            hud_height: config.hud_height,
        };

        let mut cats: Vec<Cat> = (1..=config.cats)
            .map(|id| {
                let size = sample(&mut rng, &config.cat_size);
                Cat {
                    id: CatId(id as u32),
                    position: point_in(&mut rng, play.min(), play.max_for(size)),
                    velocity: Vec2::new(
                        spread(&mut rng, config.spawn_speed),
                        spread(&mut rng, config.spawn_speed),
                    ),
                    size,
                    angle: 0.0,
                    spin: spread(&mut rng, config.spin_speed),
                    state: CatState::Roaming,
                    last_teleport: None,
                }
            })
            .collect();

        let mut obstacles: Vec<Obstacle> = (1..=config.obstacles)
            .map(|id| {
                let size = sample(&mut rng, &config.obstacle_size);
                Obstacle {
                    id: ObstacleId(id as u32),
                    position: point_in(&mut rng, play.min(), play.max_for(size)),
                    size,
                    assigned_cat: None,
                }
            })
            .collect();

        let portals = place_portals(&mut rng, &play, &config);

        let mut cat_order: Vec<usize> = (0..cats.len()).collect();
        rng.shuffle(&mut cat_order);
        let mut obstacle_order: Vec<usize> = (0..obstacles.len()).collect();
        rng.shuffle(&mut obstacle_order);
        for (&cat, &obstacle) in cat_order.iter().zip(&obstacle_order).take(config.hidden) {
            if let (Some(cat), Some(obstacle)) = (cats.get_mut(cat), obstacles.get_mut(obstacle)) {
                hide(cat, obstacle);
            }
        }

        let mut log = SignalLog::default();
        log.push(Duration::ZERO, "SYSTEM_READY: SIGNAL SCANNER ONLINE");

        Ok(Self {
            config,
            field: play,
            cats,
            obstacles,
            portals,
            log,
            events: Vec::new(),
            found: 0,
            scanner: Scanner::default(),
            cursor: None,
            drag: None,
            win: WinState::Playing,
            now: Duration::ZERO,
            rng,
        })
    }

    /// Advances one frame. `now` is the time since the session started and
    /// `field` the current size of the window.
    pub fn tick(&mut self, now: Duration, field: Vec2) {
        self.now = now;
        self.field.size = field;
        let dragged = self.drag.map(|drag| drag.obstacle);

        for cat in &mut self.cats {
            match cat.state {
                CatState::Found { since: None } => {
                    cat.state = CatState::Found { since: Some(now) };
                }
                CatState::Found { .. } => {}
                CatState::Hidden { obstacle } => {
                    // A dragged obstacle leaves its cat behind until released.
                    if dragged == Some(obstacle) {
                        continue;
                    }
                    if let Some(obstacle) = self.obstacles.iter().find(|o| o.id == obstacle) {
                        cat.position = obstacle.hiding_spot(cat.size);
                    }
                }
                CatState::Roaming => {
                    roam(cat, &self.field);
                    let Some((from, to)) =
                        teleport(cat, &self.portals, &self.field, &self.config, now)
                    else {
                        continue;
                    };
                    let (Some(entry), Some(exit)) = (self.portals.get(from), self.portals.get(to))
                    else {
                        continue;
                    };
                    self.log.push(
                        now,
                        format!("PACKET RE-ROUTED: {} >> {}", entry.label, exit.label),
                    );
                    self.events.push(SessionEvent::Rerouted {
                        cat: cat.id,
                        from,
                        to,
                    });
                }
            }
        }

        let target = self.cursor.map_or(0.0, |cursor| {
            signal_target(
                &self.cats,
                cursor,
                self.config.scanner_radius,
                self.config.scanner_scale,
            )
        });
        self.scanner.approach(target, self.config.scanner_damping);

        if let WinState::Pending { at } = self.win {
            if now >= at {
                self.win = WinState::Won;
                self.events.push(SessionEvent::Won);
                info!("Signal scanner cleared in {:.1}s", now.as_secs_f32());
            }
        }
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, SessionEvent> {
        self.events.drain(..)
    }

    /// Whether hidden cats and assigned obstacles point at each other one to one.
    pub fn check_links(&self) -> bool {
        let obstacles_ok = self.obstacles.iter().all(|obstacle| {
            obstacle.assigned_cat.is_none_or(|id| {
                self.cats.iter().any(|cat| {
                    cat.id == id
                        && cat.state
                            == CatState::Hidden {
                                obstacle: obstacle.id,
                            }
                })
            })
        });
        let cats_ok = self.cats.iter().all(|cat| {
            cat.hiding_under().is_none_or(|id| {
                self.obstacles
                    .iter()
                    .any(|obstacle| obstacle.id == id && obstacle.assigned_cat == Some(cat.id))
            })
        });
        obstacles_ok && cats_ok
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    pub fn field(&self) -> PlayField {
        self.field
    }

    pub fn cats(&self) -> &[Cat] {
        &self.cats
    }

    pub fn cat(&self, id: CatId) -> Option<&Cat> {
        self.cats.iter().find(|cat| cat.id == id)
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn obstacle(&self, id: ObstacleId) -> Option<&Obstacle> {
        self.obstacles.iter().find(|obstacle| obstacle.id == id)
    }

    pub fn portals(&self) -> &[Portal] {
        &self.portals
    }

    pub fn log(&self) -> &SignalLog {
        &self.log
    }

    pub fn found_count(&self) -> usize {
        self.found
    }

    pub fn total(&self) -> usize {
        self.cats.len()
    }

    pub fn hidden_count(&self) -> usize {
        self.cats.iter().filter(|cat| cat.is_hidden()).count()
    }

    pub fn scanner(&self) -> Scanner {
        self.scanner
    }

    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn dragging(&self) -> Option<ObstacleId> {
        self.drag.map(|drag| drag.obstacle)
    }

    pub fn win_state(&self) -> WinState {
        self.win
    }

    pub fn is_won(&self) -> bool {
        self.win == WinState::Won
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn flag(&self) -> String {
        format!("FLAG{{CAT_{}_FOUND}}", self.total())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub const FIELD: Vec2 = Vec2::new(1000.0, 600.0);

    pub fn cat(id: u32, position: Vec2, size: f32, state: CatState) -> Cat {
        Cat {
            id: CatId(id),
            position,
            velocity: Vec2::ZERO,
            size,
            angle: 0.0,
            spin: 0.0,
            state,
            last_teleport: None,
        }
    }

    pub fn obstacle(id: u32, position: Vec2, size: f32, assigned_cat: Option<u32>) -> Obstacle {
        Obstacle {
            id: ObstacleId(id),
            position,
            size,
            assigned_cat: assigned_cat.map(CatId),
        }
    }

    pub fn portal_pair(entry: Vec2, exit: Vec2) -> Vec<Portal> {
        vec![
            Portal {
                label: "PORT-0A".to_string(),
                position: entry,
                pair: 1,
                tint: PortalTint::Cyan,
            },
            Portal {
                label: "PORT-0B".to_string(),
                position: exit,
                pair: 0,
                tint: PortalTint::Cyan,
            },
        ]
    }

    /// A session laid out by hand instead of at random.
    pub fn session(cats: Vec<Cat>, obstacles: Vec<Obstacle>, portals: Vec<Portal>) -> Session {
        let config = ScannerConfig {
            cats: cats.len(),
            obstacles: obstacles.len(),
            hidden: cats.iter().filter(|cat| cat.is_hidden()).count(),
            portal_pairs: portals.len() / 2,
            ..ScannerConfig::default()
        };
        Session {
            field: PlayField {
                size: FIELD,
                hud_height: config.hud_height,
            },
            config,
            cats,
            obstacles,
            portals,
            log: SignalLog::default(),
            events: Vec::new(),
            found: 0,
            scanner: Scanner::default(),
            cursor: None,
            drag: None,
            win: WinState::Playing,
            now: Duration::ZERO,
            rng: Rng::with_seed(7),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::{FIELD, cat, obstacle, portal_pair, session};
    use super::*;

    const FRAME: Duration = Duration::from_millis(16);

    fn fresh(seed: u64) -> Session {
        Session::new(ScannerConfig::default(), FIELD, Rng::with_seed(seed))
            .expect("default config must start")
    }

    #[test]
    fn new_session_hides_six_cats_one_to_one() {
        for seed in 0..20 {
            let session = fresh(seed);
            assert_eq!(session.total(), 18, "eighteen signals");
            assert_eq!(session.obstacles().len(), 18, "eighteen obstacles");
            assert_eq!(session.hidden_count(), 6, "six hidden cats");
            assert_eq!(
                session
                    .obstacles()
                    .iter()
                    .filter(|o| o.assigned_cat.is_some())
                    .count(),
                6,
                "six assigned obstacles"
            );
            assert!(session.check_links(), "links form a bijection");
        }
    }

    #[test]
    fn hidden_cats_sit_centered_under_their_obstacle() {
        let session = fresh(3);
        for cat in session.cats().iter().filter(|cat| cat.is_hidden()) {
            let obstacle = cat
                .hiding_under()
                .and_then(|id| session.obstacle(id))
                .expect("hidden cats have an obstacle");
            assert_eq!(
                cat.position,
                obstacle.position + Vec2::splat((obstacle.size - cat.size) / 2.0),
                "centered under the obstacle"
            );
            assert_eq!(cat.velocity, Vec2::ZERO, "hidden cats do not move");
        }
    }

    #[test]
    fn new_session_announces_itself_and_pairs_portals() {
        let session = fresh(11);
        assert_eq!(
            session.log().newest().map(|line| line.text.as_str()),
            Some("SYSTEM_READY: SIGNAL SCANNER ONLINE"),
            "boot line"
        );
        assert_eq!(session.portals().len(), 6, "three pairs");
        for (index, portal) in session.portals().iter().enumerate() {
            let paired = session.portals().get(portal.pair);
            assert_eq!(
                paired.map(|other| other.pair),
                Some(index),
                "pairing is symmetric"
            );
            assert_eq!(
                paired.map(|other| other.tint),
                Some(portal.tint),
                "both ends share a tint"
            );
        }
        assert_eq!(
            session.portals().first().map(|p| p.label.as_str()),
            Some("PORT-0A"),
            "labels follow the pair index"
        );
    }

    #[test]
    fn rejects_invalid_configs() {
        let config = ScannerConfig {
            hidden: 20,
            ..ScannerConfig::default()
        };
        assert!(
            Session::new(config, FIELD, Rng::with_seed(1)).is_err(),
            "cannot hide more cats than exist"
        );
    }

    #[test]
    fn roaming_cats_stay_in_bounds() {
        let mut session = fresh(5);
        for frame in 1..=2000 {
            session.tick(FRAME * frame, FIELD);
            for cat in session.cats().iter().filter(|cat| cat.is_roaming()) {
                assert!(
                    cat.position.x >= 0.0 && cat.position.x <= FIELD.x - cat.size,
                    "x within the field"
                );
                assert!(
                    cat.position.y >= 60.0 && cat.position.y <= FIELD.y - cat.size,
                    "y below the HUD and within the field"
                );
            }
        }
    }

    #[test]
    fn bounces_off_the_left_edge() {
        let mut roaming = cat(1, Vec2::new(0.0, 200.0), 40.0, CatState::Roaming);
        roaming.velocity = Vec2::new(-1.0, 0.0);
        let mut session = session(vec![roaming], Vec::new(), Vec::new());

        session.tick(FRAME, FIELD);
        let cat = session.cat(CatId(1)).expect("cat 1 exists");
        assert!(cat.position.x.abs() < 1e-6, "clamped to the edge");
        assert!((cat.velocity.x - 1.0).abs() < 1e-6, "heading back in");
    }

    #[test]
    fn hidden_cat_follows_its_obstacle() {
        let mut session = session(
            vec![cat(
                1,
                Vec2::new(120.0, 220.0),
                40.0,
                CatState::Hidden {
                    obstacle: ObstacleId(1),
                },
            )],
            vec![obstacle(1, Vec2::new(100.0, 200.0), 80.0, Some(1))],
            Vec::new(),
        );
        if let Some(obstacle) = session.obstacles.first_mut() {
            obstacle.position = Vec2::new(300.0, 300.0);
        }
        session.tick(FRAME, FIELD);
        assert_eq!(
            session.cat(CatId(1)).map(|cat| cat.position),
            Some(Vec2::new(320.0, 320.0)),
            "snapped under the moved obstacle"
        );
    }

    #[test]
    fn portal_reroutes_then_cools_down() {
        let entry = Vec2::new(200.0, 200.0);
        let exit = Vec2::new(700.0, 400.0);
        // Centered on the entry portal.
        let roaming = cat(1, entry + Vec2::splat(24.0 - 20.0), 40.0, CatState::Roaming);
        let mut session = session(vec![roaming], Vec::new(), portal_pair(entry, exit));

        session.tick(Duration::from_millis(100), FIELD);
        let cat = session.cat(CatId(1)).expect("cat 1 exists");
        assert_eq!(
            cat.center(),
            exit + Vec2::splat(24.0),
            "lands centered on the paired portal"
        );
        assert_eq!(
            cat.last_teleport,
            Some(Duration::from_millis(100)),
            "cooldown restarts"
        );
        assert_eq!(
            session.drain_events().collect::<Vec<_>>(),
            vec![SessionEvent::Rerouted {
                cat: CatId(1),
                from: 0,
                to: 1
            }],
            "one reroute"
        );
        assert_eq!(
            session.log().newest().map(|line| line.text.as_str()),
            Some("PACKET RE-ROUTED: PORT-0A >> PORT-0B"),
            "reroute is logged"
        );

        // Still on the exit portal but cooling down.
        session.tick(Duration::from_millis(2000), FIELD);
        assert_eq!(
            session.cat(CatId(1)).map(Cat::center),
            Some(exit + Vec2::splat(24.0)),
            "no teleport inside the cooldown"
        );
        assert!(session.drain_events().next().is_none(), "no new reroute");

        session.tick(Duration::from_millis(2700), FIELD);
        assert_eq!(
            session.cat(CatId(1)).map(Cat::center),
            Some(entry + Vec2::splat(24.0)),
            "teleports back once the cooldown elapsed"
        );
    }

    #[test]
    fn first_listed_portal_wins() {
        let center = Vec2::new(320.0, 320.0);
        let first_exit = Vec2::new(700.0, 400.0);
        let second_exit = Vec2::new(700.0, 150.0);
        // Portal centers sit 24 px past their position.
        let mut portals = portal_pair(center + Vec2::new(-14.0, -24.0), first_exit);
        // The second pair's entry is even closer to the cat.
        let closer = portal_pair(center + Vec2::new(-29.0, -24.0), second_exit);
        for (offset, mut portal) in closer.into_iter().enumerate() {
            portal.label = if offset == 0 { "PORT-1A" } else { "PORT-1B" }.to_string();
            portal.pair += 2;
            portals.push(portal);
        }
        let roaming = cat(1, center - Vec2::splat(20.0), 40.0, CatState::Roaming);
        let mut session = session(vec![roaming], Vec::new(), portals);

        session.tick(Duration::from_millis(100), FIELD);
        assert_eq!(
            session.cat(CatId(1)).map(Cat::center),
            Some(first_exit + Vec2::splat(24.0)),
            "exits through the first pair"
        );
        assert_eq!(
            session.drain_events().collect::<Vec<_>>(),
            vec![SessionEvent::Rerouted {
                cat: CatId(1),
                from: 0,
                to: 1
            }],
            "a single reroute from the first portal"
        );
    }

    #[test]
    fn found_cats_are_stamped_on_the_next_tick() {
        let mut session = session(
            vec![cat(
                1,
                Vec2::new(300.0, 300.0),
                40.0,
                CatState::Found { since: None },
            )],
            Vec::new(),
            Vec::new(),
        );
        session.tick(Duration::from_millis(40), FIELD);
        session.tick(Duration::from_millis(56), FIELD);
        assert_eq!(
            session.cat(CatId(1)).map(|cat| cat.state),
            Some(CatState::Found {
                since: Some(Duration::from_millis(40))
            }),
            "stamped once, on the first tick"
        );
    }

    #[test]
    fn win_is_reached_once_after_the_delay() {
        let mut session = session(
            vec![
                cat(1, Vec2::new(100.0, 100.0), 40.0, CatState::Roaming),
                cat(2, Vec2::new(500.0, 300.0), 40.0, CatState::Roaming),
            ],
            Vec::new(),
            Vec::new(),
        );
        session.tick(Duration::from_millis(1000), FIELD);
        assert!(session.capture(CatId(1), Vec2::ZERO), "first capture");
        assert!(session.capture(CatId(2), Vec2::ZERO), "second capture");
        assert_eq!(
            session.win_state(),
            WinState::Pending {
                at: Duration::from_millis(2200)
            },
            "win scheduled 1200 ms later"
        );
        assert_eq!(
            session.log().newest().map(|line| line.text.as_str()),
            Some("ROOT_ACCESS_GRANTED. DECRYPTING FLAG..."),
            "decrypting line follows the last capture"
        );

        session.tick(Duration::from_millis(2100), FIELD);
        assert!(!session.is_won(), "not before the delay");

        let mut wins = 0;
        for millis in [2200, 2300, 5000] {
            session.tick(Duration::from_millis(millis), FIELD);
            wins += session
                .drain_events()
                .filter(|event| *event == SessionEvent::Won)
                .count();
        }
        assert!(session.is_won(), "won after the delay");
        assert_eq!(wins, 1, "win announced exactly once");
        assert_eq!(session.flag(), "FLAG{CAT_2_FOUND}", "flag counts the signals");
    }

    #[test]
    fn scanner_rises_near_a_hidden_cat() {
        let mut session = session(
            vec![cat(
                1,
                Vec2::new(300.0, 300.0),
                40.0,
                CatState::Hidden {
                    obstacle: ObstacleId(1),
                },
            )],
            vec![obstacle(1, Vec2::new(280.0, 280.0), 80.0, Some(1))],
            Vec::new(),
        );
        session.tick(FRAME, FIELD);
        assert!(session.scanner().level.abs() < 1e-6, "silent without a cursor");

        session.pointer_moved(Vec2::new(320.0, 320.0));
        for frame in 2..100 {
            session.tick(FRAME * frame, FIELD);
        }
        assert!(session.scanner().level > 99.0, "settles at full strength");
    }
}
