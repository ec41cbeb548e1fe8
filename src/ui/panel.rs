//! Control panel widgets: morph sliders and expression/pose actions.

#![cfg(feature = "native-ui")]

use eframe::egui;

use crate::io::{DialogStore, PresetPicker, PresetSink};
use crate::rig::presets;
use crate::rig::{Axis, ExpressionPreset, PosePreset};

use super::app::MorphlabApp;

/// Slider granularity for morph parameters.
const MORPH_STEP: f64 = 0.01;

impl MorphlabApp {
    pub(super) fn controls_panel(&mut self, ui: &mut egui::Ui) {
        self.morph_sliders(ui);
        ui.separator();
        self.expression_actions(ui);
        ui.separator();
        self.pose_actions(ui);
    }

    /// One slider per discovered morph parameter, grouped per mesh.
    fn morph_sliders(&mut self, ui: &mut egui::Ui) {
        ui.heading("Morph Targets");

        if self.store.is_empty() {
            ui.weak("no morph targets in this model");
            return;
        }

        let mesh_names: Vec<String> = self
            .model
            .meshes()
            .iter()
            .map(|m| m.name().to_string())
            .collect();

        for mesh_name in &mesh_names {
            egui::CollapsingHeader::new(mesh_name)
                .default_open(true)
                .show(ui, |ui| {
                    for (key, value) in self.store.iter_mut() {
                        if key.mesh == *mesh_name {
                            ui.add(
                                egui::Slider::new(value, 0.0..=1.0)
                                    .step_by(MORPH_STEP)
                                    .text(&key.target),
                            );
                        }
                    }
                });
        }
    }

    fn expression_actions(&mut self, ui: &mut egui::Ui) {
        ui.heading("Expression Actions");

        ui.horizontal_wrapped(|ui| {
            if ui.button("Save Expression").clicked() {
                self.save_expression();
            }
            if ui.button("Load Expression").clicked() {
                self.load_expression();
            }
        });

        ui.horizontal_wrapped(|ui| {
            for name in presets::BUILTIN_NAMES {
                if ui.button(name).clicked() {
                    self.apply_builtin(name);
                }
            }
            if ui.button("Reset Neutral").clicked() {
                self.store.reset_all();
            }
        });
    }

    fn pose_actions(&mut self, ui: &mut egui::Ui) {
        ui.heading("Pose Actions");

        let selected_label = self
            .selected_bone
            .clone()
            .unwrap_or_else(|| "no bones found".to_string());
        egui::ComboBox::from_label("Bone")
            .selected_text(selected_label)
            .show_ui(ui, |ui| {
                for name in &self.bone_names {
                    ui.selectable_value(&mut self.selected_bone, Some(name.clone()), name);
                }
            });

        let steps = self.steps.clone();
        ui.horizontal(|ui| {
            if ui.button("+X").clicked() {
                self.rotate_selected(Axis::X, steps.step_x_plus);
            }
            if ui.button("-X").clicked() {
                self.rotate_selected(Axis::X, -steps.step_x_minus);
            }
            if ui.button("+Y").clicked() {
                self.rotate_selected(Axis::Y, steps.step_y_plus);
            }
            if ui.button("-Y").clicked() {
                self.rotate_selected(Axis::Y, -steps.step_y_minus);
            }
            if ui.button("+Z").clicked() {
                self.rotate_selected(Axis::Z, steps.step_z_plus);
            }
            if ui.button("-Z").clicked() {
                self.rotate_selected(Axis::Z, -steps.step_z_minus);
            }
        });

        ui.horizontal_wrapped(|ui| {
            if ui.button("Arms Neutral").clicked() {
                self.model.bones_mut().arms_neutral();
            }
            if ui.button("Reset Bone").clicked() {
                if let Some(name) = self.selected_bone.clone() {
                    self.model.bones_mut().reset_one(&name);
                }
            }
            if ui.button("Reset Pose").clicked() {
                self.model.bones_mut().reset_all();
            }
        });

        ui.horizontal_wrapped(|ui| {
            if ui.button("Save Pose").clicked() {
                self.save_pose();
            }
            if ui.button("Load Pose").clicked() {
                self.load_pose();
            }
        });
    }

    fn rotate_selected(&mut self, axis: Axis, delta: f32) {
        let Some(name) = self.selected_bone.clone() else {
            return;
        };
        self.model.bones_mut().rotate_relative(&name, axis, delta);
    }

    fn apply_builtin(&mut self, name: &str) {
        if let Some(preset) = presets::builtin(name) {
            preset.apply(&mut self.store, self.clamp_on_decode);
            self.last_error = None;
        }
    }

    fn save_expression(&mut self) {
        let preset = ExpressionPreset::encode(&self.store);
        let json = match preset.to_json() {
            Ok(json) => json,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return;
            }
        };

        match DialogStore.save("expression.json", &json) {
            Ok(Some(_)) => self.last_error = None,
            // Dialog dismissed: nothing happens
            Ok(None) => {}
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn load_expression(&mut self) {
        let contents = match DialogStore.pick("expression.json") {
            Ok(Some(contents)) => contents,
            Ok(None) => return,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return;
            }
        };

        match ExpressionPreset::from_json(&contents) {
            Ok(preset) => {
                preset.apply(&mut self.store, self.clamp_on_decode);
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn save_pose(&mut self) {
        let preset = PosePreset::encode(self.model.bones());
        let json = match preset.to_json() {
            Ok(json) => json,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return;
            }
        };

        match DialogStore.save("pose.json", &json) {
            Ok(Some(_)) => self.last_error = None,
            Ok(None) => {}
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }

    fn load_pose(&mut self) {
        let contents = match DialogStore.pick("pose.json") {
            Ok(Some(contents)) => contents,
            Ok(None) => return,
            Err(e) => {
                self.last_error = Some(e.to_string());
                return;
            }
        };

        match PosePreset::from_json(&contents) {
            Ok(preset) => {
                preset.apply(self.model.bones_mut());
                self.last_error = None;
            }
            Err(e) => self.last_error = Some(e.to_string()),
        }
    }
}
