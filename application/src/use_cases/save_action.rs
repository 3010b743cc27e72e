//! Save action: concludes in-place editing of a domain object.
//!
//! Depending on the object's lifecycle state, saving takes one of two paths:
//!
//! ```text
//! perform()
//!    │
//!    ├─ persisted? ── yes ──▶ editor.save() ──▶ original object ─┐
//!    │                                                           │
//!    └─ no (virtual) ──▶ ResolveParent                           │
//!                          ↓                                     │
//!                        CollectInput (create wizard dialog)     │
//!                          ↓                                     │
//!                        ResolveParentAgain                      │
//!                          ↓                                     │
//!                        Clone into parent                       │
//!                          ↓                                     │
//!                        CancelSession ──▶ clone ────────────────┤
//!                          ╎ any step fails                      │
//!                          └──────────────▶ None ────────────────┤
//!                                                                ▼
//!                                            navigate to the saved object
//! ```
//!
//! Failures while finalizing a new object (a cancelled form, an unknown
//! parent, a rejected copy) are expected outcomes: they resolve to `Ok(None)`
//! and leave the editor open. A failed commit of an existing object is
//! reported as [`SaveError::Commit`].

use crate::config::SaveBehavior;
use crate::ports::copy::{CopyError, CopyService};
use crate::ports::dialog::{DialogError, DialogService};
use crate::ports::object_service::{LazyObjectService, ObjectService, ObjectServiceError};
use crate::ports::policy::PolicyService;
use crate::ports::save_events::{NoSaveEventLogger, SaveEvent, SaveEventLogger};
use crate::use_cases::create_wizard::{CreateWizard, WizardError};
use editsave_domain::{
    ActionKey, CapabilityKind, DomainObject, EditorCapability, EditorError, ObjectHandle, ObjectId,
};
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Context the action is invoked in.
#[derive(Debug, Clone, Default)]
pub struct ActionContext {
    pub domain_object: Option<ObjectHandle>,
}

impl ActionContext {
    pub fn new(domain_object: ObjectHandle) -> Self {
        Self {
            domain_object: Some(domain_object),
        }
    }
}

/// Errors surfaced by [`SaveAction::perform`].
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Save is not applicable: no object in edit mode")]
    NotApplicable,

    #[error("Commit failed: {0}")]
    Commit(#[source] EditorError),
}

/// Named states of the new-object finalize sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinalizeStep {
    ResolveParent,
    CollectInput,
    ResolveParentAgain,
    Clone,
    CancelSession,
}

impl FinalizeStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            FinalizeStep::ResolveParent => "resolve_parent",
            FinalizeStep::CollectInput => "collect_input",
            FinalizeStep::ResolveParentAgain => "resolve_parent_again",
            FinalizeStep::Clone => "clone",
            FinalizeStep::CancelSession => "cancel_session",
        }
    }
}

impl fmt::Display for FinalizeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reasons a finalize step can fail.
#[derive(Error, Debug)]
pub enum FinalizeError {
    #[error("Object {0} has no location")]
    NoLocation(ObjectId),

    #[error(transparent)]
    Lookup(#[from] ObjectServiceError),

    #[error(transparent)]
    Dialog(#[from] DialogError),

    #[error(transparent)]
    Wizard(#[from] WizardError),

    #[error(transparent)]
    Copy(#[from] CopyError),

    #[error(transparent)]
    Editor(#[from] EditorError),
}

/// A finalize error tagged with the step it happened in.
#[derive(Error, Debug)]
#[error("{step}: {source}")]
struct StepFailure {
    step: FinalizeStep,
    source: FinalizeError,
}

impl StepFailure {
    fn is_user_cancel(&self) -> bool {
        matches!(&self.source, FinalizeError::Dialog(e) if e.is_cancelled())
    }
}

trait AtStep<T> {
    fn at(self, step: FinalizeStep) -> Result<T, StepFailure>;
}

impl<T, E: Into<FinalizeError>> AtStep<T> for Result<T, E> {
    fn at(self, step: FinalizeStep) -> Result<T, StepFailure> {
        self.map_err(|e| StepFailure {
            step,
            source: e.into(),
        })
    }
}

/// Collaborators shared by every save action of a host.
pub struct SaveServices {
    object_service: LazyObjectService,
    dialog: Arc<dyn DialogService>,
    copy: Arc<dyn CopyService>,
    policy: Arc<dyn PolicyService>,
    events: Arc<dyn SaveEventLogger>,
}

impl SaveServices {
    pub fn new(
        object_service: LazyObjectService,
        dialog: Arc<dyn DialogService>,
        copy: Arc<dyn CopyService>,
        policy: Arc<dyn PolicyService>,
    ) -> Self {
        Self {
            object_service,
            dialog,
            copy,
            policy,
            events: Arc::new(NoSaveEventLogger),
        }
    }

    pub fn with_event_logger(mut self, events: Arc<dyn SaveEventLogger>) -> Self {
        self.events = events;
        self
    }
}

/// The "Save" action triggered when leaving edit mode.
///
/// One instance handles one save attempt: [`perform`](SaveAction::perform)
/// consumes it.
pub struct SaveAction {
    services: Arc<SaveServices>,
    domain_object: Option<ObjectHandle>,
    behavior: SaveBehavior,
}

impl SaveAction {
    pub fn new(services: Arc<SaveServices>, context: ActionContext) -> Self {
        Self {
            services,
            domain_object: context.domain_object,
            behavior: SaveBehavior::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: SaveBehavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Whether the action applies: the context must carry an object that is
    /// currently being edited.
    pub fn applies_to(context: Option<&ActionContext>) -> bool {
        context
            .and_then(|c| c.domain_object.as_ref())
            .is_some_and(|object| object.has_capability(CapabilityKind::Editor))
    }

    /// Save changes and conclude editing.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(object))` - The saved object, now shown in place of the editor
    /// * `Ok(None)` - Finalizing a new object did not complete; editing continues
    /// * `Err(SaveError::Commit(_))` - Committing an existing object failed
    /// * `Err(SaveError::NotApplicable)` - No object in edit mode
    pub async fn perform(self) -> Result<Option<ObjectHandle>, SaveError> {
        let object = self
            .domain_object
            .clone()
            .ok_or(SaveError::NotApplicable)?;
        let editor = object.editor().ok_or(SaveError::NotApplicable)?;

        let saved = if object.is_persisted() {
            Some(self.commit_existing(&object, editor.as_ref()).await?)
        } else {
            self.finalize_new(&object, editor.as_ref()).await
        };

        Ok(self.return_to_browse(saved).await)
    }

    /// Commit in-place edits through the editing session.
    async fn commit_existing(
        &self,
        object: &ObjectHandle,
        editor: &dyn EditorCapability,
    ) -> Result<ObjectHandle, SaveError> {
        info!("Committing edits to {}", object.id());
        self.log(
            "save_started",
            json!({ "object": object.id(), "path": "commit", "dirty": editor.is_dirty() }),
        );

        if let Err(e) = editor.save().await {
            warn!("Commit of {} failed: {}", object.id(), e);
            self.log(
                "commit_failed",
                json!({ "object": object.id(), "error": e.to_string() }),
            );
            return Err(SaveError::Commit(e));
        }

        Ok(editor.original_object())
    }

    /// Finalize a virtual object, converting any failure into `None`.
    async fn finalize_new(
        &self,
        object: &ObjectHandle,
        editor: &dyn EditorCapability,
    ) -> Option<ObjectHandle> {
        info!("Finalizing new object {}", object.id());
        self.log(
            "save_started",
            json!({ "object": object.id(), "path": "finalize" }),
        );

        match self.run_finalize(object, editor).await {
            Ok(clone) => {
                info!("Saved {} as {}", object.id(), clone.id());
                Some(clone)
            }
            Err(failure) => {
                if failure.is_user_cancel() {
                    info!("Save of {} cancelled by user", object.id());
                } else {
                    warn!("Save of {} abandoned at {}", object.id(), failure);
                }
                self.log(
                    "finalize_abandoned",
                    json!({
                        "object": object.id(),
                        "step": failure.step.as_str(),
                        "error": failure.source.to_string(),
                    }),
                );
                None
            }
        }
    }

    async fn run_finalize(
        &self,
        object: &ObjectHandle,
        editor: &dyn EditorCapability,
    ) -> Result<ObjectHandle, StepFailure> {
        let parent = self
            .resolve_parent(object)
            .await
            .at(FinalizeStep::ResolveParent)?;

        let populated = self
            .collect_input(object, parent)
            .await
            .at(FinalizeStep::CollectInput)?;

        // The form may have picked a different destination.
        let parent = self
            .resolve_parent(&populated)
            .await
            .at(FinalizeStep::ResolveParentAgain)?;

        let clone = self
            .clone_into_parent(&populated, &parent)
            .await
            .at(FinalizeStep::Clone)?;

        // The clone now holds the content; the virtual object is discarded.
        editor.cancel().await.at(FinalizeStep::CancelSession)?;

        Ok(clone)
    }

    async fn resolve_parent(&self, object: &DomainObject) -> Result<ObjectHandle, FinalizeError> {
        let location = object
            .location_id()
            .ok_or_else(|| FinalizeError::NoLocation(object.id().clone()))?;
        debug!("Resolving parent {} of {}", location, object.id());
        Ok(self.services.object_service.get_object(&location).await?)
    }

    async fn collect_input(
        &self,
        object: &ObjectHandle,
        parent: ObjectHandle,
    ) -> Result<ObjectHandle, FinalizeError> {
        let wizard = CreateWizard::new(
            Arc::clone(object),
            parent,
            Arc::clone(&self.services.policy),
        );
        let structure = wizard.form_structure(self.behavior.prompt_location);
        let initial = wizard.initial_form_value();

        let value = self
            .services
            .dialog
            .get_user_input(&structure, &initial)
            .await?;

        Ok(wizard.populate_object_from_input(value)?)
    }

    async fn clone_into_parent(
        &self,
        object: &ObjectHandle,
        parent: &ObjectHandle,
    ) -> Result<ObjectHandle, FinalizeError> {
        let is_original = |candidate: &DomainObject| candidate.location().is_original();
        Ok(self.services.copy.perform(object, parent, &is_original).await?)
    }

    /// Replace the editing view with a view of the saved object.
    ///
    /// Passes `saved` through unchanged; navigation problems are only logged.
    async fn return_to_browse(&self, saved: Option<ObjectHandle>) -> Option<ObjectHandle> {
        if let Some(object) = saved.as_ref() {
            match object.action() {
                Some(action) => {
                    if let Err(e) = action.perform(ActionKey::NAVIGATE).await {
                        warn!("Could not navigate to {}: {}", object.id(), e);
                    }
                }
                None => warn!(
                    "{} has no {} capability; staying on the current view",
                    object.id(),
                    CapabilityKind::Action
                ),
            }
        } else {
            debug!("Save did not complete; remaining in edit mode");
        }

        self.log(
            "save_completed",
            json!({ "saved": saved.as_ref().map(|o| o.id().clone()) }),
        );
        saved
    }

    fn log(&self, event_type: &'static str, payload: Value) {
        self.services
            .events
            .log(SaveEvent::new(event_type, payload));
    }
}
