pub mod error;
pub mod prompt;
pub mod recovery;
pub mod repair;
pub mod source;
pub mod validation;

pub use layout_ai_config::{config, types};

pub use error::ParseError;
pub use prompt::{build_system_message, build_user_message, Capabilities, LAYOUT_SCHEMA};
pub use recovery::{recover_layout, Recovered, RecoveryPath};
pub use repair::{
    classify_role, enforce_catalog_caps, finalize_layout, fit_to_arena, repair_grid_layout,
    FinalizeOutcome, RepairReport, Role,
};
pub use source::{create_source, FakeSource, FileSource, LayoutSource, SourceKind};
pub use validation::{validate, ValidationReport};
