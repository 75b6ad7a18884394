//! Score, levels and speed

use crate::config::SnakeConfig;

/// Outcome of a level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelUp {
    /// Level reached
    pub level: u32,
    /// Fruit count the fruit set must be respawned at
    pub fruit_target: u32,
    /// Whether this level added a fruit
    pub fruit_added: bool,
}

/// Score/level state for one life
#[derive(Debug, Clone, PartialEq)]
pub struct Progression {
    pub score: u64,
    /// Score at which the next level-up happens
    pub max_score: u64,
    pub level: u32,
    pub base_speed: f32,
    /// `base_speed`, multiplied while boosting
    pub speed: f32,
    /// Number of fruits kept on the field
    pub fruit_target: u32,
}

impl Progression {
    pub fn new(config: &SnakeConfig) -> Self {
        Self {
            score: 0,
            max_score: config.init_max_score,
            level: 1,
            base_speed: config.init_speed,
            speed: config.init_speed,
            fruit_target: 1,
        }
    }

    /// Award points for `count` fruits
    pub fn add_fruit_score(&mut self, count: u32, config: &SnakeConfig) {
        self.score += config.score_per_fruit * count as u64;
    }

    /// Recompute the effective speed from the base speed and boost state
    pub fn apply_boost(&mut self, boosting: bool, config: &SnakeConfig) {
        self.speed = if boosting {
            self.base_speed * config.boost_multiplier
        } else {
            self.base_speed
        };
    }

    pub fn level_up_due(&self) -> bool {
        self.score >= self.max_score
    }

    /// Apply one level-up. Fires at most once per call even if the score has
    /// overshot several thresholds; later frames catch up.
    ///
    /// Speed is recomputed with the new base speed immediately so the level
    /// takes effect on the frame it is reached.
    pub fn level_up(&mut self, boosting: bool, config: &SnakeConfig) -> LevelUp {
        let next_level = self.level + 1;
        let fruit_added = next_level.is_multiple_of(config.levels_to_increment_fruit);
        if fruit_added {
            self.fruit_target += config.increment_fruit_count;
        }

        self.level = next_level;
        self.base_speed += config.increment_base_speed;
        self.apply_boost(boosting, config);
        self.max_score += config.init_max_score;

        LevelUp {
            level: self.level,
            fruit_target: self.fruit_target,
            fruit_added,
        }
    }
}
