//! morphlab - Morph-Target & Pose Lab for Rigged GLB Avatars
//!
//! A small state-synchronization core around a rigged 3D model:
//! - Enumerates every morph target and bone of a loaded GLB
//! - Keeps a parameter store the control panel writes into
//! - Flushes stored values into live mesh influence slots once per frame
//! - Edits bone rotations relative to a rest-pose snapshot
//! - Persists expressions and poses as sparse JSON presets
//!
//! Rendering is left to an external engine: morphlab owns the influence
//! arrays and bone rotations a renderer consumes, plus the placement
//! transform that frames the avatar.

pub mod config;
pub mod error;
pub mod io;
pub mod rig;
pub mod scene;

#[cfg(feature = "native-ui")]
pub mod ui;

pub use config::Config;
pub use error::{MorphlabError, Result};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
