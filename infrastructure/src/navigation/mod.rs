//! Navigation: which object the user is currently looking at.

use async_trait::async_trait;
use editsave_domain::{ActionCapability, ActionError, ActionKey, ObjectId};
use std::sync::{Arc, Mutex};
use tracing::info;

/// Tracks the currently displayed object and the navigation history.
#[derive(Debug, Default)]
pub struct NavigationTracker {
    history: Mutex<Vec<ObjectId>>,
}

impl NavigationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the current view with a view of `id`.
    pub fn navigate_to(&self, id: ObjectId) {
        info!("Navigating to {}", id);
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(id);
    }

    pub fn current(&self) -> Option<ObjectId> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .last()
            .cloned()
    }

    pub fn history(&self) -> Vec<ObjectId> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

/// Action capability that supports `navigate` for one object.
pub struct NavigateAction {
    target: ObjectId,
    tracker: Arc<NavigationTracker>,
}

impl NavigateAction {
    pub fn new(target: ObjectId, tracker: Arc<NavigationTracker>) -> Self {
        Self { target, tracker }
    }
}

#[async_trait]
impl ActionCapability for NavigateAction {
    fn supports(&self, key: ActionKey) -> bool {
        key == ActionKey::NAVIGATE
    }

    async fn perform(&self, key: ActionKey) -> Result<(), ActionError> {
        if !self.supports(key) {
            return Err(ActionError::Unsupported(key));
        }
        self.tracker.navigate_to(self.target.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_navigate_updates_current() {
        let tracker = Arc::new(NavigationTracker::new());
        assert!(tracker.current().is_none());

        let action = NavigateAction::new(ObjectId::new("plot"), tracker.clone());
        action.perform(ActionKey::NAVIGATE).await.unwrap();

        assert_eq!(tracker.current(), Some(ObjectId::new("plot")));
        assert_eq!(tracker.history().len(), 1);
    }
}
