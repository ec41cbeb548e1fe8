//! morphlab - Morph-Target & Pose Lab for Rigged GLB Avatars
//!
//! Main entry point for the CLI application.

use clap::Parser;
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use morphlab::{
    config::Config,
    io::{DirStore, PresetSink},
    rig::{presets, ExpressionPreset, MorphStore, PosePreset, RigModel},
    scene,
};

/// morphlab - inspect and pose rigged GLB avatars
#[derive(Parser, Debug)]
#[command(name = "morphlab", version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Model file path (overrides config)
    #[arg(short, long)]
    model: Option<String>,

    /// List discovered morph parameters and exit
    #[arg(long)]
    list_morphs: bool,

    /// List rig bones with rest rotations and exit
    #[arg(long)]
    list_bones: bool,

    /// Check an expression preset file against the loaded rig and exit
    #[arg(long, value_name = "FILE")]
    check_expression: Option<PathBuf>,

    /// Check a pose preset file against the loaded rig and exit
    #[arg(long, value_name = "FILE")]
    check_pose: Option<PathBuf>,

    /// Export a built-in expression into the presets directory and exit
    #[arg(long, value_name = "NAME")]
    export_builtin: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Launch the native control-panel window
    #[cfg(feature = "native-ui")]
    #[arg(long)]
    ui: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(log_level.into())
                .from_env_lossy(),
        )
        .init();

    info!("Starting {} v{}", morphlab::NAME, morphlab::VERSION);

    // Load configuration
    let mut config = if let Some(ref path) = args.config {
        Config::from_file(path)?
    } else {
        Config::load()?
    };

    // Apply CLI overrides
    if let Some(ref model) = args.model {
        config.model.path = model.clone();
    }

    config.validate()?;

    if let Some(ref name) = args.export_builtin {
        export_builtin(&config, name)?;
        return Ok(());
    }

    info!("Model: {}", config.model.path);

    let model = scene::load_rig(&config.model.path)?;

    if args.list_morphs {
        list_morphs(&model);
        return Ok(());
    }

    if args.list_bones {
        list_bones(&model);
        return Ok(());
    }

    if let Some(ref path) = args.check_expression {
        check_expression(&model, path)?;
        return Ok(());
    }

    if let Some(ref path) = args.check_pose {
        check_pose(&model, path)?;
        return Ok(());
    }

    #[cfg(feature = "native-ui")]
    if args.ui {
        info!("Launching control panel");
        if let Err(e) = morphlab::ui::MorphlabApp::run(model, &config) {
            tracing::error!("UI error: {}", e);
        }
        return Ok(());
    }

    // No action requested: print a rig summary
    println!(
        "{}: {} morph parameters across {} meshes, {} bones",
        config.model.path,
        model.morph_count(),
        model.meshes().len(),
        model.bones().len()
    );
    println!("Use --list-morphs, --list-bones, or --ui to go further.");

    Ok(())
}

fn list_morphs(model: &RigModel) {
    for mesh in model.meshes() {
        println!("{} ({} targets)", mesh.name(), mesh.target_count());
        for (target, index) in mesh.targets() {
            println!("  [{:3}] {}", index, target);
        }
    }
}

fn list_bones(model: &RigModel) {
    for name in model.bones().names() {
        if let Some(rest) = model.bones().rest(name) {
            println!(
                "{}  rest [{:.3}, {:.3}, {:.3}]",
                name, rest.x, rest.y, rest.z
            );
        }
    }
}

/// Write a built-in expression as a starter preset file.
fn export_builtin(config: &Config, name: &str) -> anyhow::Result<()> {
    let Some(preset) = presets::builtin(name) else {
        anyhow::bail!(
            "unknown built-in '{}', available: {}",
            name,
            presets::BUILTIN_NAMES.join(", ")
        );
    };

    let store = DirStore::new(&config.presets.dir);
    let json = preset.to_json()?;
    if let Some(path) = store.save(&format!("{}.json", name), &json)? {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Report which expression entries would apply to this rig and which would
/// be ignored.
fn check_expression(model: &RigModel, path: &PathBuf) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(path)?;
    let preset = ExpressionPreset::from_json(&contents)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    let store = MorphStore::from_model(model);
    let mut applied = 0usize;
    let mut ignored = 0usize;

    for (mesh, targets) in &preset.0 {
        for (target, value) in targets {
            if store.get(mesh, target).is_some() {
                applied += 1;
                println!("applies  {}.{} = {}", mesh, target, value);
            } else {
                ignored += 1;
                println!("ignored  {}.{}", mesh, target);
            }
        }
    }

    println!("{} entries apply, {} ignored", applied, ignored);
    Ok(())
}

/// Report which pose entries name bones of this rig.
fn check_pose(model: &RigModel, path: &PathBuf) -> anyhow::Result<()> {
    let contents = std::fs::read_to_string(path)?;
    let preset = PosePreset::from_json(&contents)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    let mut applied = 0usize;
    let mut ignored = 0usize;

    for (name, angles) in &preset.0 {
        if model.bones().contains(name) {
            applied += 1;
            println!(
                "applies  {} = [{:.3}, {:.3}, {:.3}]",
                name, angles.x, angles.y, angles.z
            );
        } else {
            ignored += 1;
            println!("ignored  {}", name);
        }
    }

    println!("{} bones apply, {} ignored", applied, ignored);
    Ok(())
}
