use crate::cli::OutputArgs;
use crate::support::{print_outcome, read_input};
use anyhow::{Context, Result};
use layout_ai_config::config::GameTypeProfile;
use layout_ai_core::{finalize_layout, recover_layout};
use std::path::Path;

pub fn run(input: Option<&Path>, profile: &GameTypeProfile, output: &OutputArgs) -> Result<()> {
    let raw = read_input(input)?;
    let recovered = recover_layout(&raw).context("Could not recover a layout")?;
    let outcome = finalize_layout(recovered.layout, profile);

    match &outcome.repair {
        Some(report) => tracing::info!(
            "Repaired layout: route of {} cells, {} relocated, {} pruned, {} capped",
            report.route.len(),
            report.relocated,
            report.pruned,
            outcome.capped
        ),
        None => tracing::info!(
            "Fitted layout to arena (factor {:.3}), {} capped",
            outcome.fit_factor.unwrap_or(1.0),
            outcome.capped
        ),
    }

    print_outcome(outcome, profile, output.world_coords, output.json)
}
