//! Game session state
//!
//! One [`GameSession`] owns everything a game needs: head, body, fruits,
//! progression, stamina, announcements and the seeded RNG. All transitions are
//! in-place methods on the session; there is no global state.

use std::time::Duration;

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::announce::Announcement;
use super::body;
use super::collision::boundary_clamp;
use super::progression::Progression;
use super::stamina::Stamina;
use crate::config::SnakeConfig;
use crate::sizing::GameSizes;

/// A fruit on the field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fruit {
    pub id: u32,
    pub pos: Vec3,
}

/// Something that happened during a frame or clock callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    FruitCollected { count: u32 },
    StaminaGained { blocks: u32 },
    BoostStarted,
    BoostEnded,
    LevelUp { level: u32, fruit_target: u32 },
    BoundaryReset { score_lost: u64 },
}

/// Complete state of one game session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub config: SnakeConfig,
    /// Sizes in effect for the current life
    sizes: GameSizes,
    /// Sizes to apply at the next reset
    pending_sizes: Option<GameSizes>,
    /// Head position; `None` until the render target is mounted
    head: Option<Vec3>,
    body: Vec<Vec3>,
    fruits: Vec<Fruit>,
    progression: Progression,
    stamina: Stamina,
    pub level_up_notice: Announcement,
    pub reset_notice: Announcement,
    /// Frames simulated since the session started
    pub frame_count: u64,
    seed: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameSession {
    /// Create a session and run the initial reset. The head starts unmounted.
    pub fn new(seed: u64, config: SnakeConfig, sizes: GameSizes) -> Self {
        let progression = Progression::new(&config);
        let mut session = Self {
            config,
            sizes,
            pending_sizes: None,
            head: None,
            body: Vec::new(),
            fruits: Vec::new(),
            progression,
            stamina: Stamina::new(),
            level_up_notice: Announcement::default(),
            reset_notice: Announcement::default(),
            frame_count: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        session.reset();
        session
    }

    /// Place the head at the playfield origin once its render target exists
    pub fn mount_head(&mut self) {
        if self.head.is_none() {
            self.head = Some(self.config.origin);
        }
    }

    pub fn head(&self) -> Option<Vec3> {
        self.head
    }

    pub(crate) fn set_head(&mut self, pos: Vec3) {
        if let Some(head) = self.head.as_mut() {
            *head = pos;
        }
    }

    pub fn body(&self) -> &[Vec3] {
        &self.body
    }

    pub(crate) fn body_mut(&mut self) -> &mut Vec<Vec3> {
        &mut self.body
    }

    pub fn fruits(&self) -> &[Fruit] {
        &self.fruits
    }

    pub fn progression(&self) -> &Progression {
        &self.progression
    }

    pub(crate) fn progression_mut(&mut self) -> &mut Progression {
        &mut self.progression
    }

    pub fn stamina(&self) -> &Stamina {
        &self.stamina
    }

    pub(crate) fn stamina_mut(&mut self) -> &mut Stamina {
        &mut self.stamina
    }

    pub fn is_boosting(&self) -> bool {
        self.stamina.is_boosting()
    }

    pub fn sizes(&self) -> GameSizes {
        self.sizes
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Queue new sizes; they take effect at the next reset
    pub fn set_sizes(&mut self, sizes: GameSizes) {
        if sizes != self.sizes {
            self.pending_sizes = Some(sizes);
        } else {
            self.pending_sizes = None;
        }
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take all events recorded since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Allocate a new entity ID
    fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform random point inside the boundary around the origin
    fn random_fruit_pos(&mut self) -> Vec3 {
        let size = self.sizes.boundary_size;
        let half = self.sizes.half_boundary_size;
        let origin = self.config.origin;
        let x = self.rng.random::<f32>() * size - half;
        let z = self.rng.random::<f32>() * size - half;
        Vec3::new(origin.x + x, origin.y, origin.z + z)
    }

    /// Replace the whole fruit set with `count` freshly placed fruits.
    /// Positions are sampled independently and may coincide.
    pub fn spawn_fruits(&mut self, count: u32) {
        self.fruits.clear();
        for _ in 0..count {
            let pos = self.random_fruit_pos();
            let id = self.next_entity_id();
            self.fruits.push(Fruit { id, pos });
        }
    }

    /// Remove fruits by id
    pub(crate) fn remove_fruits(&mut self, collected: &[Fruit]) {
        self.fruits
            .retain(|f| !collected.iter().any(|c| c.id == f.id));
    }

    /// Add `count` body segments at the head (origin if unmounted)
    pub fn grow(&mut self, count: usize) {
        let head = self.head.unwrap_or(self.config.origin);
        self.body = body::grow(&self.body, head, count);
    }

    /// Boost key pressed
    pub fn press_boost(&mut self) {
        let interval = self.config.stamina_interval();
        if self.stamina.start_boost(interval) {
            self.progression.apply_boost(true, &self.config);
            log::debug!("Boost started ({} blocks)", self.stamina.blocks());
            self.emit(GameEvent::BoostStarted);
        }
    }

    /// Boost key released
    pub fn release_boost(&mut self) {
        self.end_boost();
    }

    pub(crate) fn end_boost(&mut self) {
        if self.stamina.stop_boost() {
            self.progression.apply_boost(false, &self.config);
            log::debug!("Boost ended ({} blocks)", self.stamina.blocks());
            self.emit(GameEvent::BoostEnded);
        }
    }

    /// Wall-clock callback, independent of the frame rate: fires the stamina
    /// depletion timer and ages announcements
    pub fn advance_clock(&mut self, dt: Duration) {
        let fired = self.stamina.advance_clock(dt);
        if fired > 0 {
            log::debug!("Stamina depleted to {}", self.stamina.blocks());
        }
        self.level_up_notice.advance(dt);
        self.reset_notice.advance(dt);
    }

    /// Return to initial conditions. The head stays where it is, pulled inside
    /// the boundary if new sizes shrank it.
    pub fn reset(&mut self) {
        if let Some(sizes) = self.pending_sizes.take() {
            self.sizes = sizes;
            let check =
                boundary_clamp(self.head, sizes.half_boundary_size, self.config.origin);
            if check.hit {
                self.head = Some(check.pos);
            }
        }

        self.body.clear();
        self.grow(self.config.grow_batch);
        self.progression = Progression::new(&self.config);
        self.stamina.reset();
        self.level_up_notice.hide();
        self.spawn_fruits(1);
        log::debug!("Session reset");
    }

    #[cfg(test)]
    pub(crate) fn place_fruits(&mut self, positions: &[Vec3]) {
        self.fruits.clear();
        for &pos in positions {
            let id = self.next_entity_id();
            self.fruits.push(Fruit { id, pos });
        }
    }
}
