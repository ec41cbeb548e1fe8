//! Scene-side glue: asset loading and avatar placement

pub mod composer;
pub mod loader;

pub use composer::Placement;
pub use loader::load_rig;
