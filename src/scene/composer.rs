//! Avatar placement inside the host scene.
//!
//! One-time setup per load: the model is uniformly scaled inside a wrapper
//! transform, and the wrapper is lowered so the avatar is framed correctly
//! in view. The composed world transform is what a renderer attaches to its
//! scene graph.

use glam::{Affine3A, Vec3};

use crate::config::PlacementConfig;

/// Wrapper/model transform pair for framing the avatar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Uniform model scale
    pub scale: f32,
    /// Vertical offset of the wrapper
    pub lift: f32,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            scale: 1.5,
            lift: -1.5,
        }
    }
}

impl Placement {
    pub fn from_config(config: &PlacementConfig) -> Self {
        Self {
            scale: config.scale,
            lift: config.lift,
        }
    }

    /// Model-local transform: uniform scale about the origin.
    pub fn model_transform(&self) -> Affine3A {
        Affine3A::from_scale(Vec3::splat(self.scale))
    }

    /// Wrapper transform: vertical offset only.
    pub fn wrapper_transform(&self) -> Affine3A {
        Affine3A::from_translation(Vec3::new(0.0, self.lift, 0.0))
    }

    /// Composed transform a renderer attaches to its scene.
    pub fn world_transform(&self) -> Affine3A {
        self.wrapper_transform() * self.model_transform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_framing() {
        let placement = Placement::default();
        assert_eq!(placement.scale, 1.5);
        assert_eq!(placement.lift, -1.5);
    }

    #[test]
    fn test_world_transform() {
        let placement = Placement::default();
        let world = placement.world_transform();

        // Model origin lands at the wrapper offset
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, -1.5, 0.0)).length() < 1e-6);

        // A point one unit up scales before the wrapper offset applies
        let up = world.transform_point3(Vec3::Y);
        assert!((up - Vec3::new(0.0, 0.0, 0.0)).length() < 1e-6);
    }

    #[test]
    fn test_from_config() {
        let config = PlacementConfig {
            scale: 2.0,
            lift: -0.5,
        };
        let placement = Placement::from_config(&config);
        let p = placement.world_transform().transform_point3(Vec3::Y);
        assert!((p - Vec3::new(0.0, 1.5, 0.0)).length() < 1e-6);
    }
}
