//! Buffered editing sessions.
//!
//! Opening an object for editing produces an *editable* counterpart: a
//! separate domain object whose model starts as a copy of the original's.
//! Edits go to the editable object only. [`BufferedEditor::save`] copies the
//! edited model onto the original and persists it; [`BufferedEditor::cancel`]
//! simply closes the session.

use crate::store::{InMemoryObjectStore, StoreError};
use async_trait::async_trait;
use editsave_domain::{
    DomainObject, EditorCapability, EditorError, ObjectHandle, ObjectId, ObjectModel,
};
use std::sync::{Arc, Mutex, Weak};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Active,
    Saved,
    Cancelled,
}

/// Editing session that buffers edits until saved.
pub struct BufferedEditor {
    editable: Weak<DomainObject>,
    original: ObjectHandle,
    baseline: ObjectModel,
    store: Arc<InMemoryObjectStore>,
    state: Mutex<SessionState>,
}

impl BufferedEditor {
    pub fn is_active(&self) -> bool {
        *self.lock_state() == SessionState::Active
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, SessionState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl EditorCapability for BufferedEditor {
    async fn save(&self) -> Result<(), EditorError> {
        let mut state = self.lock_state();
        if *state != SessionState::Active {
            return Err(EditorError::Inactive);
        }
        let editable = self.editable.upgrade().ok_or(EditorError::Inactive)?;

        let edited = editable.model();
        self.original.mutate(|model| *model = edited);
        self.store.persist(&self.original);
        *state = SessionState::Saved;

        info!("Saved edits to {}", self.original.id());
        Ok(())
    }

    async fn cancel(&self) -> Result<(), EditorError> {
        let mut state = self.lock_state();
        if *state != SessionState::Active {
            return Err(EditorError::Inactive);
        }
        *state = SessionState::Cancelled;

        debug!("Discarded editing session for {}", self.original.id());
        Ok(())
    }

    fn original_object(&self) -> ObjectHandle {
        Arc::clone(&self.original)
    }

    fn is_dirty(&self) -> bool {
        self.editable
            .upgrade()
            .is_some_and(|editable| editable.with_model(|m| !m.same_content(&self.baseline)))
    }
}

/// Opens editing sessions on stored or new objects.
pub struct EditSessionFactory {
    store: Arc<InMemoryObjectStore>,
}

impl EditSessionFactory {
    pub fn new(store: Arc<InMemoryObjectStore>) -> Self {
        Self { store }
    }

    /// Open a stored object for editing.
    pub fn edit(&self, id: &ObjectId) -> Result<ObjectHandle, StoreError> {
        let model = self
            .store
            .model(id)
            .ok_or_else(|| StoreError::NotFound(id.clone()))?;
        let context = model.location.clone();
        let original = self.store.instantiate(id.clone(), model, context);
        Ok(self.editable(original))
    }

    /// Create a virtual object of `type_key` inside `parent`, in edit mode.
    ///
    /// The object is not stored; it only becomes persistent once the save
    /// workflow clones it into its parent.
    pub fn create(&self, type_key: &str, parent: &ObjectId) -> Result<ObjectHandle, StoreError> {
        if !self.store.contains(parent) {
            return Err(StoreError::NotFound(parent.clone()));
        }

        let type_name = self
            .store
            .type_definition(type_key)
            .map(|t| t.name.clone())
            .unwrap_or_else(|| type_key.to_string());
        let model = ObjectModel::new(format!("Unnamed {}", type_name), type_key)
            .with_location(parent.clone());

        let id = self.store.generate_id();
        debug!("Creating virtual {} {} in {}", type_key, id, parent);
        let original = self.store.instantiate(id, model, Some(parent.clone()));
        Ok(self.editable(original))
    }

    fn editable(&self, original: ObjectHandle) -> ObjectHandle {
        let id = original.id().clone();
        let model = original.model();
        let context = original.context();
        let capabilities = self.store.capabilities_for(&id, &model.type_key);
        let store = Arc::clone(&self.store);

        Arc::new_cyclic(|editable| {
            let editor = BufferedEditor {
                editable: editable.clone(),
                original,
                baseline: model.clone(),
                store,
                state: Mutex::new(SessionState::Active),
            };
            let mut object = DomainObject::new(id, model)
                .with_capabilities(capabilities.with_editor(Arc::new(editor)));
            if let Some(context) = context {
                object = object.with_context(context);
            }
            object
        })
    }
}
