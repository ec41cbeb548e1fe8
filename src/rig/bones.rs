//! Bone rotation manipulation.
//!
//! Holds every bone's live Euler rotation alongside the rest rotation
//! captured at load time. All operations tolerate unknown bone names as
//! silent no-ops so the same controls work across differently-rigged models.

use glam::Vec3;
use std::collections::BTreeMap;
use std::f32::consts::PI;

/// A rotation axis of a bone transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

#[derive(Debug, Clone)]
struct BoneNode {
    /// Live rotation, Euler XYZ in radians
    rotation: Vec3,
    /// Rest rotation as loaded from the asset
    rest: Vec3,
}

/// The skeleton's rotation state: live and rest Euler angles per bone.
#[derive(Debug, Clone, Default)]
pub struct BoneRig {
    bones: BTreeMap<String, BoneNode>,
}

impl BoneRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bone with its rest rotation. The live rotation starts at
    /// rest. Re-registering an existing name is ignored.
    pub fn insert(&mut self, name: &str, rest: Vec3) {
        self.bones
            .entry(name.to_string())
            .or_insert(BoneNode { rotation: rest, rest });
    }

    pub fn len(&self) -> usize {
        self.bones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bones.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.bones.contains_key(name)
    }

    /// Bone names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bones.keys().map(|s| s.as_str())
    }

    /// Current live rotation of a bone.
    pub fn rotation(&self, name: &str) -> Option<Vec3> {
        self.bones.get(name).map(|b| b.rotation)
    }

    /// Rest rotation captured at load time.
    pub fn rest(&self, name: &str) -> Option<Vec3> {
        self.bones.get(name).map(|b| b.rest)
    }

    /// Add `delta` radians to one axis of a bone's live rotation.
    ///
    /// Deltas accumulate without clamping or wrapping.
    pub fn rotate_relative(&mut self, name: &str, axis: Axis, delta: f32) {
        let Some(bone) = self.bones.get_mut(name) else {
            tracing::debug!("rotate_relative: no bone named '{}'", name);
            return;
        };
        match axis {
            Axis::X => bone.rotation.x += delta,
            Axis::Y => bone.rotation.y += delta,
            Axis::Z => bone.rotation.z += delta,
        }
    }

    /// Set a bone's live rotation to an absolute value.
    pub fn set_absolute(&mut self, name: &str, rotation: Vec3) {
        let Some(bone) = self.bones.get_mut(name) else {
            tracing::debug!("set_absolute: no bone named '{}'", name);
            return;
        };
        bone.rotation = rotation;
    }

    /// Restore one bone to its rest rotation.
    pub fn reset_one(&mut self, name: &str) {
        let Some(bone) = self.bones.get_mut(name) else {
            tracing::debug!("reset_one: no bone named '{}'", name);
            return;
        };
        bone.rotation = bone.rest;
    }

    /// Restore every bone to its rest rotation.
    pub fn reset_all(&mut self) {
        for bone in self.bones.values_mut() {
            bone.rotation = bone.rest;
        }
    }

    /// Bones whose live rotation deviates from rest by more than `epsilon`
    /// on any axis, with their live rotations.
    pub fn deviations(&self, epsilon: f32) -> impl Iterator<Item = (&str, Vec3)> {
        self.bones.iter().filter_map(move |(name, bone)| {
            let d = bone.rotation - bone.rest;
            if d.x.abs() > epsilon || d.y.abs() > epsilon || d.z.abs() > epsilon {
                Some((name.as_str(), bone.rotation))
            } else {
                None
            }
        })
    }

    /// Bring the arms from the T-pose down to a relaxed stance.
    ///
    /// Applies a fixed combination of relative rotations to the shoulder and
    /// forearm bend bones. Each step is skipped when its bone is absent from
    /// the rig.
    pub fn arms_neutral(&mut self) {
        if self.contains("lShldrBend") {
            self.rotate_relative("lShldrBend", Axis::Z, PI / 4.8);
            self.rotate_relative("lShldrBend", Axis::Y, -PI / 5.0);
        }
        self.rotate_relative("lForearmBend", Axis::Z, -PI / 9.0);
        if self.contains("rShldrBend") {
            self.rotate_relative("rShldrBend", Axis::Z, -PI / 2.8);
            self.rotate_relative("rShldrBend", Axis::Y, PI / 7.0);
        }
        self.rotate_relative("rForearmBend", Axis::Z, -PI / 14.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_8;

    fn arm_rig() -> BoneRig {
        let mut rig = BoneRig::new();
        rig.insert("lShldrBend", Vec3::ZERO);
        rig.insert("rShldrBend", Vec3::ZERO);
        rig.insert("lForearmBend", Vec3::ZERO);
        rig.insert("rForearmBend", Vec3::ZERO);
        rig.insert("head", Vec3::new(0.1, 0.0, -0.2));
        rig
    }

    #[test]
    fn test_insert_starts_at_rest() {
        let rig = arm_rig();
        assert_eq!(rig.rotation("head"), Some(Vec3::new(0.1, 0.0, -0.2)));
        assert_eq!(rig.rest("head"), rig.rotation("head"));
    }

    #[test]
    fn test_relative_rotation_accumulates() {
        let mut rig = arm_rig();
        for _ in 0..6 {
            rig.rotate_relative("lShldrBend", Axis::X, FRAC_PI_8);
        }
        let rot = rig.rotation("lShldrBend").unwrap();
        assert!((rot.x - 6.0 * FRAC_PI_8).abs() < 1e-6);
        assert_eq!(rot.y, 0.0);
        assert_eq!(rot.z, 0.0);
    }

    #[test]
    fn test_unknown_bone_is_noop() {
        let mut rig = arm_rig();
        rig.rotate_relative("tail", Axis::Y, 1.0);
        rig.set_absolute("tail", Vec3::ONE);
        rig.reset_one("tail");
        assert_eq!(rig.len(), 5);
        assert!(rig.rotation("tail").is_none());
    }

    #[test]
    fn test_reset_one_and_all() {
        let mut rig = arm_rig();
        rig.set_absolute("head", Vec3::new(1.0, 2.0, 3.0));
        rig.rotate_relative("lShldrBend", Axis::Z, 0.5);

        rig.reset_one("head");
        assert_eq!(rig.rotation("head"), Some(Vec3::new(0.1, 0.0, -0.2)));
        assert_eq!(rig.rotation("lShldrBend"), Some(Vec3::new(0.0, 0.0, 0.5)));

        rig.reset_all();
        assert_eq!(rig.rotation("lShldrBend"), Some(Vec3::ZERO));
        assert!(rig.deviations(1e-3).next().is_none());
    }

    #[test]
    fn test_arms_neutral_constants() {
        let mut rig = arm_rig();
        rig.arms_neutral();

        let l = rig.rotation("lShldrBend").unwrap();
        assert!((l.z - PI / 4.8).abs() < 1e-6);
        assert!((l.y + PI / 5.0).abs() < 1e-6);

        let r = rig.rotation("rShldrBend").unwrap();
        assert!((r.z + PI / 2.8).abs() < 1e-6);
        assert!((r.y - PI / 7.0).abs() < 1e-6);

        let lf = rig.rotation("lForearmBend").unwrap();
        assert!((lf.z + PI / 9.0).abs() < 1e-6);

        let rf = rig.rotation("rForearmBend").unwrap();
        assert!((rf.z + PI / 14.0).abs() < 1e-6);
    }

    #[test]
    fn test_arms_neutral_skips_missing_bones() {
        let mut rig = BoneRig::new();
        rig.insert("rForearmBend", Vec3::ZERO);
        rig.arms_neutral();

        let rf = rig.rotation("rForearmBend").unwrap();
        assert!((rf.z + PI / 14.0).abs() < 1e-6);
        assert_eq!(rig.len(), 1);
    }

    #[test]
    fn test_deviations_respect_epsilon() {
        let mut rig = arm_rig();
        rig.rotate_relative("head", Axis::Y, 0.0005);
        assert!(rig.deviations(1e-3).next().is_none());

        rig.rotate_relative("head", Axis::Y, 0.002);
        let deviated: Vec<_> = rig.deviations(1e-3).map(|(n, _)| n.to_string()).collect();
        assert_eq!(deviated, vec!["head".to_string()]);
    }
}
