//! Rig state: morph parameters, bone rotations, and preset codecs

pub mod bones;
pub mod model;
pub mod params;
pub mod preset;
pub mod presets;

pub use bones::{Axis, BoneRig};
pub use model::{MorphMesh, RigModel};
pub use params::{MorphKey, MorphStore};
pub use preset::{BoneAngles, ExpressionPreset, PosePreset, POSE_EPSILON};
