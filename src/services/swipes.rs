use std::collections::BTreeSet;
use std::sync::Arc;

use crate::core::keys::StoreKey;
use crate::core::procedure::SWIPE_AND_CHECK_MATCH;
use crate::error::{Result, SwipeError};
use crate::models::SwipeAction;
use crate::services::store::SwipeStore;

/// Swipe and match operations on top of a [`SwipeStore`]
///
/// The service holds no state of its own. All swipe decisions happen inside
/// the store's atomic procedure.
#[derive(Clone)]
pub struct MatchService {
    store: Arc<dyn SwipeStore>,
}

impl MatchService {
    pub fn new(store: Arc<dyn SwipeStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn SwipeStore> {
        &self.store
    }

    /// Prepare the store for swiping
    ///
    /// Fails when the store is unreachable or the procedure cannot be
    /// registered. With `reset` set, all existing swipes and matches are
    /// dropped afterwards.
    pub async fn setup(&self, reset: bool) -> Result<()> {
        self.store.ping().await?;
        self.store.register_procedures().await?;

        if reset {
            self.store.reset().await?;
            tracing::info!("Store reset, starting from an empty swipe history");
        }

        Ok(())
    }

    /// Record `from_user`'s action toward `to_user`
    ///
    /// Returns `true` when this swipe created a match between the two users.
    pub async fn submit_swipe(
        &self,
        from_user: &str,
        to_user: &str,
        action: SwipeAction,
    ) -> Result<bool> {
        validate_user(from_user)?;
        validate_user(to_user)?;
        if from_user == to_user {
            return Err(SwipeError::SameUser(from_user.to_string()));
        }

        let keys = [StoreKey::swipes(from_user, to_user)];
        let args = [
            from_user.to_string(),
            to_user.to_string(),
            action.as_str().to_string(),
        ];

        let result = self
            .store
            .run_atomic_procedure(SWIPE_AND_CHECK_MATCH, &keys, &args)
            .await?;

        match result {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SwipeError::Procedure(format!(
                "unexpected reply from {}: {}",
                SWIPE_AND_CHECK_MATCH, other
            ))),
        }
    }

    /// Same as [`MatchService::submit_swipe`] with an unparsed action
    pub async fn submit_swipe_raw(&self, from_user: &str, to_user: &str, action: &str) -> Result<bool> {
        let action: SwipeAction = action.parse()?;
        self.submit_swipe(from_user, to_user, action).await
    }

    /// Users `user` has matched with, empty if none
    pub async fn list_matches(&self, user: &str) -> Result<BTreeSet<String>> {
        validate_user(user)?;
        self.store.members_of(&StoreKey::matches(user)).await
    }
}

fn validate_user(user: &str) -> Result<()> {
    if user.is_empty() {
        return Err(SwipeError::InvalidUser("user id must not be empty".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::memory::MemoryStore;

    async fn service() -> MatchService {
        let service = MatchService::new(Arc::new(MemoryStore::new()));
        service.setup(true).await.unwrap();
        service
    }

    #[tokio::test]
    async fn test_swipe_match() {
        let service = service().await;

        assert!(!service.submit_swipe("alice", "bob", SwipeAction::Like).await.unwrap());
        assert!(service.submit_swipe("bob", "alice", SwipeAction::Like).await.unwrap());

        assert!(service.list_matches("alice").await.unwrap().contains("bob"));
        assert!(service.list_matches("bob").await.unwrap().contains("alice"));
    }

    #[tokio::test]
    async fn test_same_user_rejected_before_store() {
        let store = Arc::new(MemoryStore::new());
        let service = MatchService::new(store.clone());
        store.set_available(false);

        let err = service
            .submit_swipe("alice", "alice", SwipeAction::Like)
            .await
            .unwrap_err();
        assert_eq!(err, SwipeError::SameUser("alice".to_string()));
    }

    #[tokio::test]
    async fn test_empty_user_rejected() {
        let service = service().await;

        let err = service.submit_swipe("", "bob", SwipeAction::Like).await.unwrap_err();
        assert!(matches!(err, SwipeError::InvalidUser(_)));
        assert!(service.list_matches("").await.is_err());
    }

    #[tokio::test]
    async fn test_raw_action_parsing() {
        let service = service().await;

        let err = service.submit_swipe_raw("alice", "bob", "maybe").await.unwrap_err();
        assert_eq!(err, SwipeError::InvalidAction("maybe".to_string()));
        assert!(!service.submit_swipe_raw("alice", "bob", "like").await.unwrap());
    }

    #[tokio::test]
    async fn test_setup_fails_when_unreachable() {
        let store = Arc::new(MemoryStore::new());
        store.set_available(false);
        let service = MatchService::new(store);

        assert!(service.setup(false).await.unwrap_err().is_connection());
    }

    #[tokio::test]
    async fn test_swipe_without_setup_is_procedure_error() {
        let service = MatchService::new(Arc::new(MemoryStore::new()));

        let err = service
            .submit_swipe("alice", "bob", SwipeAction::Like)
            .await
            .unwrap_err();
        assert!(matches!(err, SwipeError::Procedure(_)));
    }

    #[test]
    fn test_list_matches_empty_blocking() {
        let service = MatchService::new(Arc::new(MemoryStore::new()));
        let matches = tokio_test::block_on(service.list_matches("nobody")).unwrap();
        assert!(matches.is_empty());
    }
}
