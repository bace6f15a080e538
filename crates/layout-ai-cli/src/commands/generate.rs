use crate::cli::OutputArgs;
use crate::commands::prompt::messages;
use crate::support::print_outcome;
use anyhow::{Context, Result};
use layout_ai_config::config::{GameTypeProfile, SourceConfig};
use layout_ai_core::source::create_source;
use layout_ai_core::{finalize_layout, recover_layout, validate};

pub fn run(
    request: &str,
    profile: &GameTypeProfile,
    source: &SourceConfig,
    schema: &str,
    output: &OutputArgs,
) -> Result<()> {
    let source = create_source(source)?;
    let (system, user) = messages(request, profile, schema);

    tracing::info!("Requesting layout from {} source", source.kind().as_str());
    let raw = source
        .complete(&system, &user)
        .context("Layout source failed")?;
    let recovered = recover_layout(&raw).context("Could not recover a layout")?;
    tracing::debug!("Recovered layout via {:?}", recovered.path);

    let outcome = finalize_layout(recovered.layout, profile);
    let report = validate(&outcome.layout, profile);
    if report.ok {
        tracing::info!("Generated {} objects", outcome.layout.objects.len());
    } else {
        tracing::warn!("Generated layout is invalid: {}", report.message);
    }

    print_outcome(outcome, profile, output.world_coords, output.json)
}
