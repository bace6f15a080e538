use anyhow::{bail, Context, Result};
use layout_ai_config::config::{AppConfig, GameTypeProfile};
use layout_ai_config::types::LayoutData;
use layout_ai_core::prompt::LAYOUT_SCHEMA;
use layout_ai_core::repair::FinalizeOutcome;
use serde::Serialize;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read raw model output from a file, or from stdin for `-` or no path
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

pub fn load_profile(explicit: Option<&PathBuf>, config: &AppConfig) -> Result<GameTypeProfile> {
    let Some(path) = explicit.or(config.default_profile.as_ref()) else {
        bail!("No profile given; pass --profile or set default_profile in the config");
    };
    GameTypeProfile::load(path).with_context(|| format!("Failed to load profile {}", path.display()))
}

/// Schema text for the system message
pub fn load_schema(config: &AppConfig) -> Result<String> {
    match &config.schema_file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read schema {}", path.display())),
        None => Ok(LAYOUT_SCHEMA.to_string()),
    }
}

/// Replace grid cells with world positions for grid profiles
pub fn to_world_coords(layout: &mut LayoutData, profile: &GameTypeProfile) {
    if !profile.is_grid() {
        return;
    }
    let grid = &profile.grid;
    for object in &mut layout.objects {
        let cell = grid.cell_of(&object.position);
        object.position = grid.cell_to_world(cell, object.position.y);
    }
}

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}

/// Print a finalized layout, or the whole outcome with `--json`
pub fn print_outcome(
    mut outcome: FinalizeOutcome,
    profile: &GameTypeProfile,
    world_coords: bool,
    json: bool,
) -> Result<()> {
    if world_coords {
        to_world_coords(&mut outcome.layout, profile);
    }
    if json {
        print_json(&outcome)
    } else {
        print_json(&outcome.layout)
    }
}
