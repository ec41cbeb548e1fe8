//! Morph parameter store and per-frame sync.
//!
//! The store is the single source of truth for every `(mesh, target)`
//! slider value. Controls write into it synchronously; once per rendered
//! frame `flush` copies every value into the live influence slots of the
//! model. The store itself never clamps; range policy lives at the slider
//! widget and the preset decode boundary.

use std::collections::BTreeMap;

use super::model::RigModel;

/// Stable identifier of one morph parameter.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MorphKey {
    pub mesh: String,
    pub target: String,
}

impl MorphKey {
    pub fn new(mesh: &str, target: &str) -> Self {
        Self {
            mesh: mesh.to_string(),
            target: target.to_string(),
        }
    }
}

impl std::fmt::Display for MorphKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.mesh, self.target)
    }
}

/// Current value of every morph parameter, keyed by `(mesh, target)`.
#[derive(Debug, Clone, Default)]
pub struct MorphStore {
    values: BTreeMap<MorphKey, f32>,
}

impl MorphStore {
    /// Enumerate every morph parameter of the model, all at 0.0.
    pub fn from_model(model: &RigModel) -> Self {
        let mut values = BTreeMap::new();
        for mesh in model.meshes() {
            for (target, _) in mesh.targets() {
                values.insert(MorphKey::new(mesh.name(), target), 0.0);
            }
        }

        tracing::info!("Discovered {} morph parameters", values.len());
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, mesh: &str, target: &str) -> Option<f32> {
        self.values.get(&MorphKey::new(mesh, target)).copied()
    }

    /// Set a parameter. Values outside [0, 1] are accepted as-is. Unknown
    /// keys are ignored: the parameter set is fixed at discovery time.
    pub fn set(&mut self, mesh: &str, target: &str, value: f32) {
        match self.values.get_mut(&MorphKey::new(mesh, target)) {
            Some(slot) => *slot = value,
            None => tracing::debug!("set: no morph parameter '{}.{}'", mesh, target),
        }
    }

    /// Zero every parameter.
    pub fn reset_all(&mut self) {
        for value in self.values.values_mut() {
            *value = 0.0;
        }
    }

    /// Parameters in `(mesh, target)` order.
    pub fn iter(&self) -> impl Iterator<Item = (&MorphKey, f32)> {
        self.values.iter().map(|(k, &v)| (k, v))
    }

    /// Mutable iteration for direct widget binding.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&MorphKey, &mut f32)> {
        self.values.iter_mut()
    }

    /// The per-frame sync: copy every stored value into the owning mesh's
    /// influence slot. A mesh or target that no longer resolves is skipped
    /// silently; worst case that parameter has no visible effect.
    pub fn flush(&self, model: &mut RigModel) {
        for (key, value) in &self.values {
            let Some(mesh) = model.mesh_mut(&key.mesh) else {
                tracing::debug!("flush: no mesh named '{}'", key.mesh);
                continue;
            };
            let Some(index) = mesh.target_index(&key.target) else {
                tracing::debug!("flush: no target '{}' on mesh '{}'", key.target, key.mesh);
                continue;
            };
            mesh.set_influence_at(index, *value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rig::bones::BoneRig;
    use crate::rig::model::MorphMesh;

    fn face_model() -> RigModel {
        RigModel::new(
            vec![
                MorphMesh::new("Face", &["browDown", "jawOpen"]),
                MorphMesh::new("Body", &["muscleFlex"]),
            ],
            BoneRig::new(),
        )
    }

    #[test]
    fn test_discovery_defaults_to_zero() {
        let model = face_model();
        let store = MorphStore::from_model(&model);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("Face", "jawOpen"), Some(0.0));
        assert_eq!(store.get("Face", "nose"), None);
    }

    #[test]
    fn test_flush_writes_every_slot() {
        let mut model = face_model();
        let mut store = MorphStore::from_model(&model);
        store.set("Face", "jawOpen", 0.75);
        store.set("Body", "muscleFlex", 0.25);

        store.flush(&mut model);

        assert_eq!(model.mesh("Face").unwrap().influence("jawOpen"), Some(0.75));
        assert_eq!(model.mesh("Face").unwrap().influence("browDown"), Some(0.0));
        assert_eq!(
            model.mesh("Body").unwrap().influence("muscleFlex"),
            Some(0.25)
        );
    }

    #[test]
    fn test_set_unknown_key_is_noop() {
        let model = face_model();
        let mut store = MorphStore::from_model(&model);
        store.set("Hair", "curl", 1.0);
        assert_eq!(store.len(), 3);
        assert_eq!(store.get("Hair", "curl"), None);
    }

    #[test]
    fn test_store_accepts_out_of_range_values() {
        let mut model = face_model();
        let mut store = MorphStore::from_model(&model);
        store.set("Face", "jawOpen", 1.8);
        store.set("Face", "browDown", -0.5);

        assert_eq!(store.get("Face", "jawOpen"), Some(1.8));

        store.flush(&mut model);
        assert_eq!(model.mesh("Face").unwrap().influence("jawOpen"), Some(1.8));
        assert_eq!(
            model.mesh("Face").unwrap().influence("browDown"),
            Some(-0.5)
        );
    }

    #[test]
    fn test_flush_skips_vanished_mesh() {
        // Store discovered against a richer model than the one flushed into.
        let rich = face_model();
        let mut store = MorphStore::from_model(&rich);
        store.set("Body", "muscleFlex", 0.9);
        store.set("Face", "jawOpen", 0.4);

        let mut lean = RigModel::new(vec![MorphMesh::new("Face", &["jawOpen"])], BoneRig::new());
        store.flush(&mut lean);

        assert_eq!(lean.mesh("Face").unwrap().influence("jawOpen"), Some(0.4));
    }

    #[test]
    fn test_reset_all() {
        let model = face_model();
        let mut store = MorphStore::from_model(&model);
        store.set("Face", "jawOpen", 0.6);
        store.reset_all();
        assert!(store.iter().all(|(_, v)| v == 0.0));
    }
}
