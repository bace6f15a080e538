use anyhow::Result;
use layout_ai_config::config::GameTypeProfile;
use layout_ai_core::prompt::{build_system_message, build_user_message, Capabilities};

/// System and user messages for a request against a profile
pub fn messages(request: &str, profile: &GameTypeProfile, schema: &str) -> (String, String) {
    let capabilities = Capabilities::from_profile(profile).to_json();
    (
        build_system_message(schema),
        build_user_message(request, &capabilities),
    )
}

pub fn run(request: &str, profile: &GameTypeProfile, schema: &str) -> Result<()> {
    let (system, user) = messages(request, profile, schema);
    println!("=== system ===");
    println!("{system}");
    println!("=== user ===");
    println!("{user}");
    Ok(())
}
