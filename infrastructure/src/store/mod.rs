//! In-memory object store, optionally seeded from a JSON workspace file.
//!
//! The store keeps plain [`ObjectModel`]s. Every lookup instantiates a fresh
//! [`DomainObject`] with the capabilities objects have while browsing
//! (navigation and, when known, their type definition).

use crate::navigation::{NavigateAction, NavigationTracker};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use editsave_application::{ObjectService, ObjectServiceError};
use editsave_domain::{
    Capabilities, DomainObject, ObjectHandle, ObjectId, ObjectModel, TypeDefinition,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, info};

/// Type key of plain containers.
pub const FOLDER_TYPE: &str = "folder";

/// Errors raised by the object store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not read workspace {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Could not write workspace {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid workspace file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Object not found: {0}")]
    NotFound(ObjectId),
}

/// On-disk layout of a workspace: object models keyed by id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkspaceFile {
    #[serde(default)]
    pub objects: BTreeMap<ObjectId, ObjectModel>,
}

impl WorkspaceFile {
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let write_err = |source| StoreError::Write {
            path: path.to_path_buf(),
            source,
        };
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| write_err(std::io::Error::other(e)))?;
        std::fs::write(path, content).map_err(write_err)
    }
}

/// Object store holding models in memory.
pub struct InMemoryObjectStore {
    models: RwLock<HashMap<ObjectId, ObjectModel>>,
    types: HashMap<String, TypeDefinition>,
    navigation: Arc<NavigationTracker>,
}

impl InMemoryObjectStore {
    pub fn new(navigation: Arc<NavigationTracker>) -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
            types: HashMap::new(),
            navigation,
        }
    }

    pub fn with_types(mut self, types: impl IntoIterator<Item = TypeDefinition>) -> Self {
        self.types
            .extend(types.into_iter().map(|t| (t.key.clone(), t)));
        self
    }

    pub fn with_workspace(self, workspace: WorkspaceFile) -> Self {
        {
            let mut models = self.write();
            models.extend(workspace.objects);
            info!("Loaded {} objects into the store", models.len());
        }
        self
    }

    /// Snapshot of every stored model.
    pub fn to_workspace(&self) -> WorkspaceFile {
        WorkspaceFile {
            objects: self
                .read()
                .iter()
                .map(|(id, model)| (id.clone(), model.clone()))
                .collect(),
        }
    }

    pub fn insert(&self, id: ObjectId, model: ObjectModel) {
        self.write().insert(id, model);
    }

    /// Insert an empty, persisted folder under `id` unless the id is taken.
    ///
    /// Returns whether a folder was created.
    pub fn ensure_folder(&self, id: &ObjectId, name: &str) -> bool {
        let mut models = self.write();
        if models.contains_key(id) {
            return false;
        }
        models.insert(
            id.clone(),
            ObjectModel::new(name, FOLDER_TYPE).with_persisted(Utc::now()),
        );
        info!("Created folder {} ({})", id, name);
        true
    }

    pub fn model(&self, id: &ObjectId) -> Option<ObjectModel> {
        self.read().get(id).cloned()
    }

    pub fn contains(&self, id: &ObjectId) -> bool {
        self.read().contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn type_definition(&self, key: &str) -> Option<&TypeDefinition> {
        self.types.get(key)
    }

    pub fn navigation(&self) -> &Arc<NavigationTracker> {
        &self.navigation
    }

    pub fn generate_id(&self) -> ObjectId {
        ObjectId::new(uuid::Uuid::new_v4().to_string())
    }

    /// Capabilities of a browsed object: navigation plus its type, if known.
    pub fn capabilities_for(&self, id: &ObjectId, type_key: &str) -> Capabilities {
        let mut capabilities = Capabilities::new().with_action(Arc::new(NavigateAction::new(
            id.clone(),
            Arc::clone(&self.navigation),
        )));
        if let Some(definition) = self.types.get(type_key) {
            capabilities = capabilities.with_type(definition.clone());
        }
        capabilities
    }

    /// Build a domain object for `model`, reached through `context`.
    pub fn instantiate(
        &self,
        id: ObjectId,
        model: ObjectModel,
        context: Option<ObjectId>,
    ) -> ObjectHandle {
        let capabilities = self.capabilities_for(&id, &model.type_key);
        let mut object = DomainObject::new(id, model).with_capabilities(capabilities);
        if let Some(context) = context {
            object = object.with_context(context);
        }
        object.into_handle()
    }

    /// Stamp `object` as persisted now and store its model.
    pub fn persist(&self, object: &DomainObject) -> DateTime<Utc> {
        let now = Utc::now();
        object.mutate(|model| model.persisted = Some(now));
        self.insert(object.id().clone(), object.model());
        debug!("Persisted {}", object.id());
        now
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ObjectId, ObjectModel>> {
        self.models.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ObjectId, ObjectModel>> {
        self.models.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl ObjectService for InMemoryObjectStore {
    async fn get_objects(
        &self,
        ids: &[ObjectId],
    ) -> Result<HashMap<ObjectId, ObjectHandle>, ObjectServiceError> {
        let found: Vec<(ObjectId, ObjectModel)> = {
            let models = self.read();
            ids.iter()
                .filter_map(|id| models.get(id).map(|m| (id.clone(), m.clone())))
                .collect()
        };

        Ok(found
            .into_iter()
            .map(|(id, model)| (id.clone(), self.instantiate(id, model, None)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use editsave_domain::{ActionKey, CapabilityKind};

    fn store() -> InMemoryObjectStore {
        InMemoryObjectStore::new(Arc::new(NavigationTracker::new()))
            .with_types([TypeDefinition::new("folder", "Folder")])
    }

    #[tokio::test]
    async fn test_get_objects_skips_unknown_ids() {
        let store = store();
        store.insert(ObjectId::new("mine"), ObjectModel::new("My Items", "folder"));

        let found = store
            .get_objects(&[ObjectId::new("mine"), ObjectId::new("missing")])
            .await
            .unwrap();

        assert_eq!(found.len(), 1);
        let mine = &found[&ObjectId::new("mine")];
        assert!(mine.has_capability(CapabilityKind::Action));
        assert!(mine.has_capability(CapabilityKind::Type));
        assert!(!mine.has_capability(CapabilityKind::Editor));
    }

    #[tokio::test]
    async fn test_instantiated_objects_navigate() {
        let store = store();
        let object = store.instantiate(
            ObjectId::new("mine"),
            ObjectModel::new("My Items", "folder"),
            None,
        );

        object
            .action()
            .unwrap()
            .perform(ActionKey::NAVIGATE)
            .await
            .unwrap();

        assert_eq!(store.navigation().current(), Some(ObjectId::new("mine")));
    }

    #[test]
    fn test_ensure_folder_keeps_existing() {
        let store = store();
        let mine = ObjectId::new("mine");

        assert!(store.ensure_folder(&mine, "My Items"));
        assert!(store.model(&mine).unwrap().is_persisted());

        store.insert(mine.clone(), ObjectModel::new("Renamed", "folder"));
        assert!(!store.ensure_folder(&mine, "My Items"));
        assert_eq!(store.model(&mine).unwrap().name, "Renamed");
    }

    #[test]
    fn test_persist_stamps_and_stores() {
        let store = store();
        let object = store.instantiate(ObjectId::new("a"), ObjectModel::new("A", "folder"), None);
        assert!(!store.contains(object.id()));

        let at = store.persist(&object);

        assert_eq!(object.model().persisted, Some(at));
        assert_eq!(store.model(object.id()).unwrap().persisted, Some(at));
    }

    #[test]
    fn test_workspace_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workspace.json");

        let store = store();
        store.insert(
            ObjectId::new("mine"),
            ObjectModel::new("My Items", "folder").with_persisted(Utc::now()),
        );
        store.to_workspace().save(&path).unwrap();

        let loaded = store_from(&path);
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded.model(&ObjectId::new("mine")).unwrap().name, "My Items");
    }

    fn store_from(path: &Path) -> InMemoryObjectStore {
        store().with_workspace(WorkspaceFile::load(path).unwrap())
    }

    #[test]
    fn test_load_invalid_workspace_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = WorkspaceFile::load(&path).unwrap_err();
        assert!(matches!(err, StoreError::Parse { .. }));
        assert!(err.to_string().contains("broken.json"));
    }
}
