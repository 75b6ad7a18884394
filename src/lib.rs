//! Box Snake - A top-down 3D Snake arcade game
//!
//! Core modules:
//! - `sim`: Deterministic per-frame simulation (movement, collisions, body chain, stamina, levels)
//! - `input`: Key intents, keyboard mapping and analog stick translation
//! - `sizing`: Responsive boundary/cube sizing
//! - `config`: Data-driven game balance
//! - `renderer`: WebGPU rendering of colored boxes

pub mod config;
pub mod input;
pub mod renderer;
pub mod sim;
pub mod sizing;

pub use config::{ConfigError, SnakeConfig};
pub use input::{AnalogStick, Intent, KeyState};
pub use sizing::GameSizes;

/// Game configuration constants
pub mod consts {
    /// Edge length of a head/body/fruit cube on large screens
    pub const BLOCK_SIZE: f32 = 20.0;
    /// Edge length of the square playfield on large screens
    pub const BOUNDARY_SIZE: f32 = 1000.0;
    /// Cube scale below the small-screen breakpoint
    pub const CUBE_DIM_SMALL_MULTIPLIER: f32 = 0.75;
    /// Small-screen breakpoint in rem (root font size units)
    pub const BREAKPOINT_SM_REM: f32 = 40.0;

    /// Movement per frame at level 1
    pub const INIT_SPEED: f32 = 5.0;
    /// Speed multiplier while boosting
    pub const BOOST_MULTIPLIER: f32 = 3.0;
    /// Base speed gained per level
    pub const INCREMENT_BASE_SPEED: f32 = 3.0;

    pub const MAX_STAMINA_BLOCKS: u32 = 4;
    /// Milliseconds of boosting per stamina block
    pub const STAMINA_DEPLETION_MS: u64 = 2500;
    pub const FRUIT_PER_STAMINA_BLOCK: u32 = 5;

    /// Score needed for level 2; also the per-level threshold increment
    pub const INIT_MAX_SCORE: u64 = 50;
    pub const SCORE_PER_FRUIT: u64 = 5;
    pub const INCREMENT_FRUIT_COUNT: u32 = 1;
    /// Every Nth level adds a fruit
    pub const LEVELS_TO_INCREMENT_FRUIT: u32 = 3;

    /// Segments added at reset and per collected fruit
    pub const GROW_BATCH: usize = 3;

    pub const LEVEL_UP_TIMEOUT_MS: u64 = 2000;
    pub const RESET_NOTICE_TIMEOUT_MS: u64 = 2000;

    pub const COLOR_HEAD: u32 = 0x00ff00;
    pub const COLOR_BODY: u32 = 0x00aa00;
    pub const COLOR_FRUIT: u32 = 0xff0000;
    pub const COLOR_BOUNDARY: u32 = 0xffffff;

    /// Height of the flat boundary box
    pub const BOUNDARY_THICKNESS: f32 = 0.1;
}

/// Convert a 0xRRGGBB color to linear RGBA floats
#[inline]
pub fn hex_to_rgba(hex: u32) -> [f32; 4] {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    [r, g, b, 1.0]
}
