pub use layout_ai_config::{config, types};
pub use layout_ai_core::{error, prompt, recovery, repair, source, validation};

pub use layout_ai_core::{
    finalize_layout, recover_layout, repair_grid_layout, validate, FinalizeOutcome, ParseError,
    Recovered, RecoveryPath, RepairReport, ValidationReport,
};
