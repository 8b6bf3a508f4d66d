//! Roll configuration and group consensus engine for Rollcall.
//!
//! Turns a moderator's roll request into an immutable execution config
//! (optionally adjusted through an interactive dialog collaborator), and
//! collapses a group's individual totals into one verdict under one of four
//! consensus methods. Nothing here rolls dice or renders anything.

pub mod config;
pub mod consensus;
pub mod dialog;
pub mod error;
pub mod evaluator;
pub mod intercept;
pub mod orchestrate;
pub mod request;
pub mod roll_mode;
pub mod settings;
pub mod variant;

pub use config::{RollExecutionConfig, RollSpec, build_execution_config};
pub use consensus::{
    ConsensusDetails, ConsensusMethod, GroupConsensusOutcome, GroupRoll, RollEntry, evaluate,
};
pub use dialog::{
    AdvantageMode, ConfigDialog, DialogOutcome, DialogSeed, FinalizedRoll, Settlement,
    process_outcome, run_interactive_config,
};
pub use error::{MechError, MechResult};
pub use evaluator::{RollEvaluator, roll_group};
pub use intercept::should_intercept;
pub use orchestrate::RollOrchestrator;
pub use request::{RequestId, RollRequest, ValidatedRequest};
pub use roll_mode::{RollMode, resolve_roll_mode};
pub use settings::Settings;
pub use variant::{ConfigVariant, DialogHints, RollConfigState};
