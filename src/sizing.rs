//! Responsive playfield sizing
//!
//! Screens narrower than the small breakpoint get a half-size boundary and
//! smaller cubes. Sizes are only picked up by the simulation on reset.

use serde::{Deserialize, Serialize};

use crate::config::SnakeConfig;

/// Playfield dimensions handed to the simulation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameSizes {
    /// Full edge length of the square boundary
    pub boundary_size: f32,
    /// Half of `boundary_size` (clamp extent around the origin)
    pub half_boundary_size: f32,
    /// Edge length of head/body/fruit cubes, also the fruit pickup distance
    pub cube_dim: f32,
}

impl GameSizes {
    /// Sizes for large screens
    pub fn large(config: &SnakeConfig) -> Self {
        Self::from_boundary(config.boundary_size, config.block_size)
    }

    /// Sizes for screens below the breakpoint
    pub fn small(config: &SnakeConfig) -> Self {
        Self::from_boundary(
            config.boundary_size / 2.0,
            config.block_size * config.cube_dim_small_multiplier,
        )
    }

    fn from_boundary(boundary_size: f32, cube_dim: f32) -> Self {
        Self {
            boundary_size,
            half_boundary_size: boundary_size / 2.0,
            cube_dim,
        }
    }

    /// Pick sizes from the viewport width (CSS px) and root font size (px)
    pub fn for_viewport(width_px: f32, root_font_px: f32, config: &SnakeConfig) -> Self {
        if is_large_viewport(width_px, root_font_px, config.breakpoint_sm_rem) {
            Self::large(config)
        } else {
            Self::small(config)
        }
    }
}

/// Breakpoints are expressed in rem, relative to the root element font size
pub fn is_large_viewport(width_px: f32, root_font_px: f32, breakpoint_rem: f32) -> bool {
    width_px >= breakpoint_rem * root_font_px
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_viewport() {
        let config = SnakeConfig::default();
        let sizes = GameSizes::for_viewport(1280.0, 16.0, &config);
        assert_eq!(sizes.boundary_size, 1000.0);
        assert_eq!(sizes.half_boundary_size, 500.0);
        assert_eq!(sizes.cube_dim, 20.0);
    }

    #[test]
    fn test_small_viewport() {
        let config = SnakeConfig::default();
        let sizes = GameSizes::for_viewport(375.0, 16.0, &config);
        assert_eq!(sizes.boundary_size, 500.0);
        assert_eq!(sizes.half_boundary_size, 250.0);
        assert_eq!(sizes.cube_dim, 15.0);
    }

    #[test]
    fn test_breakpoint_is_inclusive() {
        // 40rem at 16px = 640px
        assert!(is_large_viewport(640.0, 16.0, 40.0));
        assert!(!is_large_viewport(639.0, 16.0, 40.0));
        // Larger root font pushes the breakpoint out
        assert!(!is_large_viewport(640.0, 20.0, 40.0));
    }
}
