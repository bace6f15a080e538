use crate::support::{print_json, read_input};
use anyhow::{bail, Context, Result};
use layout_ai_config::config::GameTypeProfile;
use layout_ai_core::{finalize_layout, recover_layout, validate};
use std::path::Path;

pub fn run(
    input: Option<&Path>,
    profile: &GameTypeProfile,
    finalize: bool,
    json_output: bool,
) -> Result<()> {
    let raw = read_input(input)?;
    let mut layout = recover_layout(&raw)
        .context("Could not recover a layout")?
        .layout;
    if finalize {
        layout = finalize_layout(layout, profile).layout;
    }

    let report = validate(&layout, profile);
    if json_output {
        print_json(&report)?;
    } else {
        println!("{}", report.message);
    }

    if !report.ok {
        bail!("Layout invalid: {}", report.message);
    }
    Ok(())
}
