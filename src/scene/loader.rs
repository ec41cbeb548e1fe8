//! GLB/glTF rig loader using the `gltf` crate.
//!
//! Extracts exactly what the control surface needs from a rigged model:
//! every mesh with morph targets (with its name→index dictionary) and every
//! skin joint as a named bone with its rest rotation. Geometry, materials,
//! and textures stay with the external renderer.

use glam::{EulerRot, Quat, Vec3};
use std::path::Path;

use crate::error::{ModelError, MorphlabError};
use crate::rig::{BoneRig, MorphMesh, RigModel};

/// Load a rigged model and build its control-surface representation.
pub fn load_rig<P: AsRef<Path>>(path: P) -> Result<RigModel, MorphlabError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ModelError::NotFound(path.display().to_string()).into());
    }

    let (document, _buffers, _images) =
        gltf::import(path).map_err(|e| ModelError::Load(e.to_string()))?;

    // Meshes with morph targets
    let mut meshes = Vec::new();
    for mesh in document.meshes() {
        let morph_count = mesh
            .primitives()
            .next()
            .map(|p| p.morph_targets().count())
            .unwrap_or(0);
        if morph_count == 0 {
            continue;
        }

        let name = mesh.name().unwrap_or("UnnamedMesh");
        let names = fill_target_names(target_names_from_extras(&mesh), morph_count);
        meshes.push(MorphMesh::new(name, &names));
    }

    // Skin joints become the controllable bones
    let mut bones = BoneRig::new();
    for skin in document.skins() {
        for joint in skin.joints() {
            let name = match joint.name() {
                Some(n) => n.to_string(),
                None => format!("node{}", joint.index()),
            };
            let (_, rotation, _) = joint.transform().decomposed();
            bones.insert(&name, euler_xyz(rotation));
        }
    }

    if meshes.is_empty() && bones.is_empty() {
        tracing::warn!("Model has no morph targets and no skeleton: {}", path.display());
    } else {
        tracing::info!(
            "Loaded rig: {} morph meshes, {} bones",
            meshes.len(),
            bones.len()
        );
    }

    Ok(RigModel::new(meshes, bones))
}

/// Read morph target names from the mesh `extras.targetNames` array.
fn target_names_from_extras(mesh: &gltf::Mesh) -> Vec<String> {
    mesh.extras()
        .as_ref()
        .and_then(|extras| names_from_extras_json(extras.get()))
        .unwrap_or_default()
}

fn names_from_extras_json(raw: &str) -> Option<Vec<String>> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let names = value.get("targetNames")?.as_array()?;
    Some(
        names
            .iter()
            .filter_map(|n| n.as_str().map(String::from))
            .collect(),
    )
}

/// Pad or truncate the extras names to the actual morph target count,
/// generating positional `target_N` names for the gaps.
fn fill_target_names(mut names: Vec<String>, count: usize) -> Vec<String> {
    if names.len() > count {
        names.truncate(count);
    }
    for i in names.len()..count {
        names.push(format!("target_{}", i));
    }
    names
}

/// glTF rotation quaternion → Euler XYZ radians.
fn euler_xyz(rotation: [f32; 4]) -> Vec3 {
    let (x, y, z) = Quat::from_array(rotation).to_euler(EulerRot::XYZ);
    Vec3::new(x, y, z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_names_from_extras_json() {
        let raw = r#"{"targetNames": ["browDown", "jawOpen"]}"#;
        assert_eq!(
            names_from_extras_json(raw),
            Some(vec!["browDown".to_string(), "jawOpen".to_string()])
        );

        assert_eq!(names_from_extras_json(r#"{"other": 1}"#), None);
        assert_eq!(names_from_extras_json("not json"), None);
    }

    #[test]
    fn test_fill_target_names() {
        let names = fill_target_names(vec!["a".to_string()], 3);
        assert_eq!(names, vec!["a", "target_1", "target_2"]);

        let names = fill_target_names(vec!["a".to_string(), "b".to_string()], 1);
        assert_eq!(names, vec!["a"]);

        let names = fill_target_names(Vec::new(), 2);
        assert_eq!(names, vec!["target_0", "target_1"]);
    }

    #[test]
    fn test_euler_identity() {
        let e = euler_xyz([0.0, 0.0, 0.0, 1.0]);
        assert!(e.length() < 1e-6);
    }

    #[test]
    fn test_euler_quarter_turn_x() {
        // 90° about X: q = (sin 45°, 0, 0, cos 45°)
        let s = FRAC_PI_2 / 2.0;
        let e = euler_xyz([s.sin(), 0.0, 0.0, s.cos()]);
        assert!((e.x - FRAC_PI_2).abs() < 1e-5);
        assert!(e.y.abs() < 1e-5);
        assert!(e.z.abs() < 1e-5);
    }

    #[test]
    fn test_missing_file() {
        let err = load_rig("no/such/model.glb").unwrap_err();
        assert!(matches!(
            err,
            MorphlabError::Model(ModelError::NotFound(_))
        ));
    }
}
