use crate::support::{print_json, read_input};
use anyhow::{Context, Result};
use layout_ai_core::recover_layout;
use serde_json::json;
use std::path::Path;

pub fn run(input: Option<&Path>, json_output: bool) -> Result<()> {
    let raw = read_input(input)?;
    let recovered = recover_layout(&raw).context("Could not recover a layout")?;
    tracing::info!(
        "Recovered {} objects via {:?}",
        recovered.layout.objects.len(),
        recovered.path
    );

    if json_output {
        print_json(&json!({
            "path": recovered.path,
            "layout": recovered.layout,
        }))
    } else {
        print_json(&recovered.layout)
    }
}
