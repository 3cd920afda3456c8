//! User repository.

use std::sync::Arc;

use docbase_core::config::StoreConfig;
use docbase_core::traits::DocumentStore;
use docbase_entity::user::{USER_KIND, User};

use crate::repository::DocumentRepository;

/// Repository for documents of kind `User`.
pub type UserRepository = DocumentRepository<User>;

impl DocumentRepository<User> {
    /// Create the user repository over the shared store.
    pub fn users(store: Arc<dyn DocumentStore>, config: &StoreConfig) -> Self {
        Self::from_config(store, config, USER_KIND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryDocumentStore;

    #[test]
    fn test_users_repository_kind() {
        let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
        let repo = UserRepository::users(store, &StoreConfig::default());
        assert_eq!(repo.kind().as_str(), "User");
        assert_eq!(repo.collection(), "documents");
        assert_eq!(repo.max_item_count(), 100);
    }
}
