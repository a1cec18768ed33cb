use async_trait::async_trait;
use mockall::mock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::user::errors::CacheError;
use crate::user::errors::PasswordError;
use crate::user::errors::UserError;
use crate::user::ports::CredentialVerifier;
use crate::user::ports::UserCache;
use crate::user::ports::UserRepository;

mock! {
    pub TestUserRepository {}

    #[async_trait]
    impl UserRepository for TestUserRepository {
        async fn create(&self, user: User) -> Result<User, UserError>;
        async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserError>;
        async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
        async fn find_by_refresh_token(&self, token: &str) -> Result<Option<UserProfile>, UserError>;
        async fn list_all(&self) -> Result<Vec<UserProfile>, UserError>;
        async fn update(&self, id: &UserId, changes: UserChanges) -> Result<u64, UserError>;
        async fn swap_refresh_token(&self, id: &UserId, current: &str, next: &str) -> Result<bool, UserError>;
        async fn delete(&self, id: &UserId) -> Result<bool, UserError>;
    }
}

mock! {
    pub TestUserCache {}

    #[async_trait]
    impl UserCache for TestUserCache {
        async fn get(&self, key: &str) -> Result<Option<String>, CacheError>;
        async fn set(&self, key: &str, value: String) -> Result<(), CacheError>;
        async fn del(&self, key: &str) -> Result<(), CacheError>;
        async fn reset_all(&self) -> Result<(), CacheError>;
    }
}

mock! {
    pub TestCredentialVerifier {}

    impl CredentialVerifier for TestCredentialVerifier {
        fn hash(&self, plaintext: &str) -> Result<String, PasswordError>;
        fn verify(&self, plaintext: &str, hash: &str) -> bool;
        fn verify_decoy(&self, plaintext: &str);
    }
}

/// Cache that never holds anything, for tests that only exercise the repository.
pub fn empty_cache() -> MockTestUserCache {
    let mut cache = MockTestUserCache::new();
    cache.expect_get().returning(|_| Ok(None));
    cache.expect_set().returning(|_, _| Ok(()));
    cache.expect_del().returning(|_| Ok(()));
    cache
}
