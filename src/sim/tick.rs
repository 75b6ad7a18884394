//! Per-frame simulation step
//!
//! Runs once per rendered frame, to completion, in a fixed order. The renderer
//! only ever sees the state before or after a whole step.

use glam::Vec3;

use super::body;
use super::collision::{boundary_clamp, collect_fruits};
use super::state::{GameEvent, GameSession};
use crate::input::KeyState;

/// What a frame did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Head not mounted yet; nothing changed
    Skipped,
    /// Head left the playfield and the session was reset
    Reset,
    /// Normal frame
    Advanced,
}

/// Per-frame head displacement from the held intents.
///
/// Forward is -z. Each held direction adds `speed` on its axis on its own, so
/// diagonals are not normalized and move faster than straight lines.
pub fn velocity(keys: &KeyState, speed: f32) -> Vec3 {
    let mut vel = Vec3::ZERO;
    if keys.forward {
        vel.z -= speed;
    }
    if keys.back {
        vel.z += speed;
    }
    if keys.left {
        vel.x -= speed;
    }
    if keys.right {
        vel.x += speed;
    }
    vel
}

/// Advance the session by one frame
pub fn tick(session: &mut GameSession, keys: &KeyState) -> FrameOutcome {
    let Some(head) = session.head() else {
        return FrameOutcome::Skipped;
    };
    session.frame_count += 1;

    // The depletion timer may have emptied the meter since the last frame
    if session.stamina().blocks() == 0 {
        session.end_boost();
    }

    // Move
    let head = head + velocity(keys, session.progression().speed);
    session.set_head(head);

    // Boundary: pin the head, reset, and end the frame
    let sizes = session.sizes();
    let check = boundary_clamp(Some(head), sizes.half_boundary_size, session.config.origin);
    if check.hit {
        session.set_head(check.pos);
        let score_lost = session.progression().score;
        session.reset();
        let timeout = session.config.reset_notice_timeout();
        session.reset_notice.show(timeout);
        log::debug!("Boundary hit at {:?}, lost {} points", check.pos, score_lost);
        session.emit(GameEvent::BoundaryReset { score_lost });
        return FrameOutcome::Reset;
    }

    // Body follows the head
    body::advance_in_place(session.body_mut(), head);

    // Fruit
    let collected = collect_fruits(session.fruits(), Some(head), sizes.cube_dim);
    if !collected.is_empty() {
        let count = collected.len() as u32;
        let config = session.config.clone();
        session.progression_mut().add_fruit_score(count, &config);
        session.grow(config.grow_batch * collected.len());
        session.stamina_mut().record_fruit(count);
        session.remove_fruits(&collected);
        session.emit(GameEvent::FruitCollected { count });
    }

    // Stamina gain
    let (per_block, max_blocks) = (
        session.config.fruit_per_stamina_block,
        session.config.max_stamina_blocks,
    );
    if session.stamina_mut().apply_gain(per_block, max_blocks) {
        let blocks = session.stamina().blocks();
        log::debug!("Stamina block earned ({} blocks)", blocks);
        session.emit(GameEvent::StaminaGained { blocks });
    }

    if session.fruits().is_empty() {
        let target = session.progression().fruit_target;
        session.spawn_fruits(target);
    }

    // Level up, at most once per frame
    if session.progression().level_up_due() {
        let boosting = session.is_boosting();
        let config = session.config.clone();
        let up = session.progression_mut().level_up(boosting, &config);
        session.spawn_fruits(up.fruit_target);
        session.level_up_notice.show(config.level_up_timeout());
        log::info!(
            "Level {} reached ({} fruit, speed {})",
            up.level,
            up.fruit_target,
            session.progression().speed
        );
        session.emit(GameEvent::LevelUp {
            level: up.level,
            fruit_target: up.fruit_target,
        });
    }

    FrameOutcome::Advanced
}
