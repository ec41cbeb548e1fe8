//! Native egui control panel for morphlab.
//!
//! Provides a desktop window with:
//! - One slider per discovered morph parameter, grouped per mesh
//! - Expression actions (save/load/built-ins/reset)
//! - Bone selector with rotate/gesture/reset/save/load pose actions
//! - A live state inspector in place of the external renderer
//!
//! Enabled via `--features native-ui`.

mod app;
mod panel;

pub use app::MorphlabApp;
