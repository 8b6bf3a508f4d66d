//! Running a roll request through validation, the dialog, and processing.

use tracing::Instrument;

use rc_core::ActorLookup;

use crate::config::{RollExecutionConfig, build_execution_config};
use crate::dialog::{ConfigDialog, DialogSeed, process_outcome, run_interactive_config};
use crate::error::MechResult;
use crate::request::RollRequest;
use crate::settings::Settings;
use crate::variant::{ConfigVariant, RollConfigState};

/// Drives a roll request from submission to final execution config.
#[derive(Debug, Clone, Copy)]
pub struct RollOrchestrator<'a> {
    settings: &'a Settings,
}

impl<'a> RollOrchestrator<'a> {
    /// Create an orchestrator over the given settings.
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Prepare a request, collapsing validation failures to `None`.
    ///
    /// `None` means "nothing to roll": the request was invalid or the user
    /// cancelled the dialog.
    pub async fn prepare<L, D>(
        &self,
        request: RollRequest,
        lookup: &L,
        dialog: &D,
    ) -> Option<RollExecutionConfig>
    where
        L: ActorLookup + ?Sized,
        D: ConfigDialog + ?Sized,
    {
        let id = request.id;
        match self.try_prepare(request, lookup, dialog).await {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(request = %id, error = %e, "roll request rejected");
                None
            }
        }
    }

    /// Prepare a request, reporting validation failures.
    ///
    /// `Ok(None)` means the dialog was cancelled.
    pub async fn try_prepare<L, D>(
        &self,
        request: RollRequest,
        lookup: &L,
        dialog: &D,
    ) -> MechResult<Option<RollExecutionConfig>>
    where
        L: ActorLookup + ?Sized,
        D: ConfigDialog + ?Sized,
    {
        let span = tracing::debug_span!(
            "prepare",
            request = %request.id,
            category = %request.category
        );

        self.run(request, lookup, dialog).instrument(span).await
    }

    async fn run<L, D>(
        &self,
        request: RollRequest,
        lookup: &L,
        dialog: &D,
    ) -> MechResult<Option<RollExecutionConfig>>
    where
        L: ActorLookup + ?Sized,
        D: ConfigDialog + ?Sized,
    {
        let validated = request.validate(lookup)?;
        let config = build_execution_config(&validated, self.settings);
        let state = RollConfigState::from_request(&validated);
        let variant = ConfigVariant::for_category(validated.request().category);
        let hints = ConfigVariant::hints_for(&validated, &state);
        let seed = DialogSeed {
            config,
            state,
            variant,
            hints,
        };

        let outcome = if self.settings.skip_dialogs {
            tracing::debug!("dialogs disabled, accepting seed as-is");
            seed.accept()
        } else {
            run_interactive_config(dialog, &seed).await
        };

        Ok(process_outcome(
            &outcome,
            validated.actors(),
            validated.request(),
            self.settings,
        ))
    }
}
