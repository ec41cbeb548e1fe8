//! Loaded-rig representation.
//!
//! `RigModel` is what the loader hands back and what the frame sync writes
//! into: meshes with a morph-target dictionary and a live influence array,
//! plus the skeleton. It is deliberately constructible without any asset
//! file so the state logic stays testable.

use std::collections::{BTreeMap, HashMap};

use super::bones::BoneRig;

/// One mesh with morph targets: a name→index dictionary and the live
/// influence slots a renderer would consume.
#[derive(Debug, Clone)]
pub struct MorphMesh {
    name: String,
    targets: BTreeMap<String, usize>,
    influences: Vec<f32>,
}

impl MorphMesh {
    /// Build a mesh whose targets are indexed by their position in `names`.
    pub fn new<S: AsRef<str>>(name: &str, target_names: &[S]) -> Self {
        let targets: BTreeMap<String, usize> = target_names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.as_ref().to_string(), i))
            .collect();

        Self {
            name: name.to_string(),
            influences: vec![0.0; target_names.len()],
            targets,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of morph targets on this mesh.
    pub fn target_count(&self) -> usize {
        self.influences.len()
    }

    /// The morph-target dictionary, sorted by name.
    pub fn targets(&self) -> impl Iterator<Item = (&str, usize)> {
        self.targets.iter().map(|(n, &i)| (n.as_str(), i))
    }

    pub fn target_index(&self, target: &str) -> Option<usize> {
        self.targets.get(target).copied()
    }

    /// Live influence value for a named target.
    pub fn influence(&self, target: &str) -> Option<f32> {
        self.target_index(target).map(|i| self.influences[i])
    }

    /// Raw influence slots, indexed per the dictionary.
    pub fn influences(&self) -> &[f32] {
        &self.influences
    }

    pub(crate) fn set_influence_at(&mut self, index: usize, value: f32) {
        if let Some(slot) = self.influences.get_mut(index) {
            *slot = value;
        }
    }
}

/// A loaded avatar rig: morph meshes plus the skeleton.
#[derive(Debug, Clone, Default)]
pub struct RigModel {
    meshes: Vec<MorphMesh>,
    by_name: HashMap<String, usize>,
    bones: BoneRig,
}

impl RigModel {
    pub fn new(meshes: Vec<MorphMesh>, bones: BoneRig) -> Self {
        let by_name = meshes
            .iter()
            .enumerate()
            .map(|(i, m)| (m.name.clone(), i))
            .collect();

        Self {
            meshes,
            by_name,
            bones,
        }
    }

    pub fn meshes(&self) -> &[MorphMesh] {
        &self.meshes
    }

    pub fn mesh(&self, name: &str) -> Option<&MorphMesh> {
        self.by_name.get(name).map(|&i| &self.meshes[i])
    }

    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut MorphMesh> {
        let i = *self.by_name.get(name)?;
        Some(&mut self.meshes[i])
    }

    pub fn bones(&self) -> &BoneRig {
        &self.bones
    }

    pub fn bones_mut(&mut self) -> &mut BoneRig {
        &mut self.bones
    }

    /// Total number of morph parameters across all meshes.
    pub fn morph_count(&self) -> usize {
        self.meshes.iter().map(|m| m.target_count()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_dictionary() {
        let mesh = MorphMesh::new("Face", &["browDown", "jawOpen", "mouthSmile"]);
        assert_eq!(mesh.target_count(), 3);
        assert_eq!(mesh.target_index("jawOpen"), Some(1));
        assert_eq!(mesh.target_index("nose"), None);
        assert_eq!(mesh.influence("jawOpen"), Some(0.0));
    }

    #[test]
    fn test_model_lookup() {
        let model = RigModel::new(
            vec![
                MorphMesh::new("Face", &["jawOpen"]),
                MorphMesh::new("Body", &["muscleFlex"]),
            ],
            BoneRig::new(),
        );

        assert_eq!(model.morph_count(), 2);
        assert!(model.mesh("Face").is_some());
        assert!(model.mesh("Hair").is_none());
    }
}
