//! Sparse expression and pose presets.
//!
//! Both codecs persist only what deviates from the default: expressions
//! keep non-zero morph values, poses keep bones moved away from rest. The
//! wire format is plain JSON, `{mesh: {target: value}}` for expressions and
//! `{bone: {"x": .., "y": .., "z": ..}}` for poses.
//!
//! Applying an expression resets every parameter first so sequential
//! applies never accumulate. Applying a pose touches only the named bones.
//! The asymmetry is deliberate.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::PresetError;

use super::bones::BoneRig;
use super::params::MorphStore;

/// A bone counts as posed when any axis deviates from rest by more than
/// this, in radians.
pub const POSE_EPSILON: f32 = 0.001;

/// Sparse snapshot of morph parameters: `mesh → (target → value)`,
/// non-zero entries only.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExpressionPreset(pub BTreeMap<String, BTreeMap<String, f32>>);

impl ExpressionPreset {
    /// Snapshot every non-zero parameter of the store.
    pub fn encode(store: &MorphStore) -> Self {
        let mut preset: BTreeMap<String, BTreeMap<String, f32>> = BTreeMap::new();
        for (key, value) in store.iter() {
            if value != 0.0 {
                preset
                    .entry(key.mesh.clone())
                    .or_default()
                    .insert(key.target.clone(), value);
            }
        }
        Self(preset)
    }

    /// Set every preset entry that matches a live parameter. Keys with no
    /// matching parameter are ignored, which keeps preset files usable
    /// across differently-rigged models. With `clamp`, values are limited
    /// to [0, 1] at this boundary.
    pub fn decode(&self, store: &mut MorphStore, clamp: bool) {
        for (mesh, targets) in &self.0 {
            for (target, &value) in targets {
                let value = if clamp { value.clamp(0.0, 1.0) } else { value };
                store.set(mesh, target, value);
            }
        }
    }

    /// Replace the whole expression: zero everything, then decode. The
    /// reset must come first so two sequential applies never accumulate.
    pub fn apply(&self, store: &mut MorphStore, clamp: bool) {
        store.reset_all();
        self.decode(store, clamp);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of individual `(mesh, target)` entries.
    pub fn len(&self) -> usize {
        self.0.values().map(|t| t.len()).sum()
    }

    pub fn from_json(s: &str) -> Result<Self, PresetError> {
        serde_json::from_str(s).map_err(|e| PresetError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, PresetError> {
        serde_json::to_string_pretty(self).map_err(|e| PresetError::Parse(e.to_string()))
    }
}

/// Euler rotation of one bone, radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoneAngles {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl From<Vec3> for BoneAngles {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

impl From<BoneAngles> for Vec3 {
    fn from(a: BoneAngles) -> Self {
        Vec3::new(a.x, a.y, a.z)
    }
}

/// Sparse snapshot of bone rotations: only bones moved away from rest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PosePreset(pub BTreeMap<String, BoneAngles>);

impl PosePreset {
    /// Snapshot every bone deviating from rest beyond [`POSE_EPSILON`],
    /// emitting the literal live angles.
    pub fn encode(rig: &BoneRig) -> Self {
        Self(
            rig.deviations(POSE_EPSILON)
                .map(|(name, rotation)| (name.to_string(), rotation.into()))
                .collect(),
        )
    }

    /// Set each named bone to its absolute rotation. Bones absent from the
    /// rig are skipped; bones absent from the preset keep their current
    /// rotation. A pose load is not a reset.
    pub fn apply(&self, rig: &mut BoneRig) {
        for (name, &angles) in &self.0 {
            rig.set_absolute(name, angles.into());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn from_json(s: &str) -> Result<Self, PresetError> {
        serde_json::from_str(s).map_err(|e| PresetError::Parse(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, PresetError> {
        serde_json::to_string_pretty(self).map_err(|e| PresetError::Parse(e.to_string()))
    }
}
