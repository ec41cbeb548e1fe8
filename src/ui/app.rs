//! Main egui application: the control panel plus the per-frame sync loop.

#![cfg(feature = "native-ui")]

use eframe::egui;

use crate::config::{Config, ControlsConfig};
use crate::rig::{MorphStore, RigModel, POSE_EPSILON};
use crate::scene::Placement;

/// The native control-panel window.
pub struct MorphlabApp {
    /// Loaded rig: live influence slots + skeleton
    pub(super) model: RigModel,
    /// Parameter store the sliders write into
    pub(super) store: MorphStore,
    /// Placement of the avatar in the host scene
    pub(super) placement: Placement,
    /// Clamp policy for decoding preset files
    pub(super) clamp_on_decode: bool,
    /// Per-button bone rotation steps
    pub(super) steps: ControlsConfig,
    /// Bone names, cached at load for the selector
    pub(super) bone_names: Vec<String>,
    /// Transient selection targeted by the rotate/reset buttons
    pub(super) selected_bone: Option<String>,
    /// Last preset error, shown until the next successful action
    pub(super) last_error: Option<String>,
}

impl MorphlabApp {
    pub fn new(model: RigModel, config: &Config) -> Self {
        let store = MorphStore::from_model(&model);
        let bone_names: Vec<String> = model.bones().names().map(String::from).collect();
        let selected_bone = bone_names.first().cloned();

        Self {
            model,
            store,
            placement: Placement::from_config(&config.placement),
            clamp_on_decode: config.presets.clamp_on_decode,
            steps: config.controls.clone(),
            bone_names,
            selected_bone,
            last_error: None,
        }
    }

    /// Launch the native window. Blocks until the window is closed.
    pub fn run(model: RigModel, config: &Config) -> eframe::Result {
        let app = Self::new(model, config);

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title("morphlab")
                .with_inner_size([1024.0, 720.0]),
            ..Default::default()
        };

        eframe::run_native("morphlab", options, Box::new(move |_cc| Ok(Box::new(app))))
    }

    fn inspector(&self, ui: &mut egui::Ui) {
        ui.heading("Live State");
        ui.label(format!(
            "scale {:.2}, lift {:.2}",
            self.placement.scale, self.placement.lift
        ));
        ui.separator();

        egui::ScrollArea::vertical()
            .auto_shrink([false; 2])
            .show(ui, |ui| {
                ui.label(format!(
                    "{} morph parameters across {} meshes",
                    self.store.len(),
                    self.model.meshes().len()
                ));

                let mut any = false;
                for mesh in self.model.meshes() {
                    for (target, index) in mesh.targets() {
                        let value = mesh.influences()[index];
                        if value != 0.0 {
                            ui.monospace(format!("{}.{} = {:.2}", mesh.name(), target, value));
                            any = true;
                        }
                    }
                }
                if !any {
                    ui.weak("all influences at zero");
                }

                ui.separator();
                ui.label(format!("{} bones", self.model.bones().len()));

                let mut posed = false;
                for (name, rotation) in self.model.bones().deviations(POSE_EPSILON) {
                    ui.monospace(format!(
                        "{} = [{:.3}, {:.3}, {:.3}]",
                        name, rotation.x, rotation.y, rotation.z
                    ));
                    posed = true;
                }
                if !posed {
                    ui.weak("rest pose");
                }
            });
    }
}

impl eframe::App for MorphlabApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.label("morphlab");
                ui.separator();
                ui.label(format!("v{}", crate::VERSION));
            });
        });

        egui::SidePanel::left("controls")
            .min_width(280.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false; 2])
                    .show(ui, |ui| {
                        self.controls_panel(ui);
                    });
            });

        // The sync pass: every stored value lands in its influence slot
        // once per rendered frame, before the inspector reads them back.
        self.store.flush(&mut self.model);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.inspector(ui);

            if let Some(ref err) = self.last_error {
                ui.separator();
                ui.colored_label(egui::Color32::RED, err);
            }
        });

        // Repaint continuously so the sync loop runs per frame
        ctx.request_repaint();
    }
}
