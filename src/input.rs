//! Input intents
//!
//! Keyboard, on-screen buttons and the analog stick all write into a single
//! [`KeyState`]. The simulation reads it once per frame as a snapshot.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The closed set of player intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    Forward,
    Back,
    Left,
    Right,
    Boost,
}

impl Intent {
    pub const MOVEMENT: [Intent; 4] = [Intent::Forward, Intent::Back, Intent::Left, Intent::Right];

    /// Map `KeyboardEvent.key` text to an intent; unknown keys are ignored
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_lowercase().as_str() {
            "w" | "arrowup" => Some(Intent::Forward),
            "s" | "arrowdown" => Some(Intent::Back),
            "a" | "arrowleft" => Some(Intent::Left),
            "d" | "arrowright" => Some(Intent::Right),
            "shift" => Some(Intent::Boost),
            _ => None,
        }
    }
}

/// Current state of every intent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub boost: bool,
}

impl KeyState {
    pub fn get(&self, intent: Intent) -> bool {
        match intent {
            Intent::Forward => self.forward,
            Intent::Back => self.back,
            Intent::Left => self.left,
            Intent::Right => self.right,
            Intent::Boost => self.boost,
        }
    }

    fn slot(&mut self, intent: Intent) -> &mut bool {
        match intent {
            Intent::Forward => &mut self.forward,
            Intent::Back => &mut self.back,
            Intent::Left => &mut self.left,
            Intent::Right => &mut self.right,
            Intent::Boost => &mut self.boost,
        }
    }

    /// Set an intent; returns true if it was previously off
    pub fn press(&mut self, intent: Intent) -> bool {
        let slot = self.slot(intent);
        let changed = !*slot;
        *slot = true;
        changed
    }

    /// Clear an intent; returns true if it was previously on
    pub fn release(&mut self, intent: Intent) -> bool {
        let slot = self.slot(intent);
        let changed = *slot;
        *slot = false;
        changed
    }

    /// Clear the four movement intents, leaving boost untouched.
    /// Returns true if any of them was on.
    pub fn clear_movement(&mut self) -> bool {
        let mut changed = false;
        for intent in Intent::MOVEMENT {
            changed |= self.release(intent);
        }
        changed
    }

    pub fn any_movement(&self) -> bool {
        Intent::MOVEMENT.iter().any(|&i| self.get(i))
    }
}

/// On-screen analog stick that translates a drag offset into movement intents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalogStick {
    /// Stick radius in CSS px
    pub radius: f32,
    /// Offsets shorter than this (px) count as centered
    pub dead_zone: f32,
    /// Minimum component of the unit direction to engage an axis
    pub axis_threshold: f32,
}

impl Default for AnalogStick {
    fn default() -> Self {
        Self {
            radius: 40.0,
            dead_zone: 8.0,
            // sin(22.5°): eight-way steering
            axis_threshold: 0.38,
        }
    }
}

impl AnalogStick {
    /// Steer from a drag offset relative to the stick center (screen coords,
    /// +y is down). Returns true if any movement intent changed.
    pub fn steer(&self, keys: &mut KeyState, dx: f32, dy: f32) -> bool {
        let offset = Vec2::new(dx, dy);
        let len = offset.length();
        if !len.is_finite() || len <= self.dead_zone || len == 0.0 {
            return self.release(keys);
        }

        let dir = offset / len;
        let mut changed = false;
        changed |= set(keys, Intent::Forward, dir.y < -self.axis_threshold);
        changed |= set(keys, Intent::Back, dir.y > self.axis_threshold);
        changed |= set(keys, Intent::Left, dir.x < -self.axis_threshold);
        changed |= set(keys, Intent::Right, dir.x > self.axis_threshold);
        changed
    }

    /// Stick let go: all movement intents clear
    pub fn release(&self, keys: &mut KeyState) -> bool {
        keys.clear_movement()
    }

    /// Knob position for display, clamped to the stick radius
    pub fn knob_offset(&self, dx: f32, dy: f32) -> Vec2 {
        Vec2::new(dx, dy).clamp_length_max(self.radius)
    }
}

fn set(keys: &mut KeyState, intent: Intent, on: bool) -> bool {
    if on {
        keys.press(intent)
    } else {
        keys.release(intent)
    }
}
