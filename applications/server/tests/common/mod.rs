/// Common test utilities and fixtures
use async_trait::async_trait;
use axum::Router;
use portal_core::{Account, AccountStore, NewAccount, PublicAccount, StoreError};
use portal_server::{
    config::ServerSettings, create_router, AppState, AuthService, CredentialEncoder,
    CredentialService,
};
use portal_storage::SqliteAccountStore;
use std::{path::PathBuf, sync::Arc};
use tempfile::TempDir;

/// Lowest cost bcrypt accepts; keeps tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing";

/// Test account credentials
pub mod fixtures {
    pub const ALICE_NAME: &str = "Alice";
    pub const ALICE_EMAIL: &str = "alice@example.com";
    pub const ALICE_PASSWORD: &str = "Secret123!";

    pub const BOB_NAME: &str = "Bob";
    pub const BOB_EMAIL: &str = "bob@example.com";
    pub const BOB_PASSWORD: &str = "HunterTwo2!";
}

/// File-backed store in a temp dir (NOT in-memory: each pooled connection
/// to `:memory:` would get its own empty database)
pub async fn create_test_store() -> (Arc<SqliteAccountStore>, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let url = format!("sqlite://{}", temp_dir.path().join("users.db").display());
    let store = SqliteAccountStore::open(&url).await.unwrap();
    (Arc::new(store), temp_dir)
}

pub fn create_credential_service(store: Arc<dyn AccountStore>) -> CredentialService {
    CredentialService::new(store, CredentialEncoder::bcrypt(TEST_BCRYPT_COST))
}

pub fn create_test_auth_service() -> Arc<AuthService> {
    Arc::new(AuthService::new(TEST_JWT_SECRET.to_string(), 1))
}

/// Router wired to a real store plus the pieces tests poke at directly
pub struct TestApp {
    pub router: Router,
    pub credentials: Arc<CredentialService>,
    pub auth_service: Arc<AuthService>,
    pub web_dir: PathBuf,
    _temp_dir: TempDir,
}

pub async fn create_test_app(expose_debug_routes: bool) -> TestApp {
    let (store, temp_dir) = create_test_store().await;
    build_app(store, temp_dir, expose_debug_routes)
}

/// Same router, but every store operation fails
pub fn create_failing_app() -> TestApp {
    let temp_dir = TempDir::new().unwrap();
    build_app(Arc::new(FailingStore), temp_dir, true)
}

fn build_app(store: Arc<dyn AccountStore>, temp_dir: TempDir, expose_debug_routes: bool) -> TestApp {
    let web_dir = temp_dir.path().join("public");
    std::fs::create_dir_all(&web_dir).unwrap();
    std::fs::write(web_dir.join("index.html"), "<h1>Login</h1>").unwrap();
    std::fs::write(web_dir.join("signup.html"), "<h1>Sign up</h1>").unwrap();
    std::fs::write(web_dir.join("dashboard.html"), "<h1>Dashboard</h1>").unwrap();
    std::fs::write(web_dir.join("script.js"), "console.log('login');").unwrap();

    let credentials = Arc::new(create_credential_service(store));
    let auth_service = create_test_auth_service();

    let settings = ServerSettings {
        host: "127.0.0.1".to_string(),
        port: 0,
        web_dir: web_dir.clone(),
        expose_debug_routes,
    };

    let app_state = AppState::new(Arc::clone(&credentials), Arc::clone(&auth_service));
    let router = create_router(app_state, &settings);

    TestApp {
        router,
        credentials,
        auth_service,
        web_dir,
        _temp_dir: temp_dir,
    }
}

/// Store double whose storage engine is never available
pub struct FailingStore;

#[async_trait]
impl AccountStore for FailingStore {
    async fn create_account(&self, _account: NewAccount) -> portal_core::Result<Account> {
        Err(StoreError::unavailable("disk I/O error"))
    }

    async fn find_by_email(&self, _email: &str) -> portal_core::Result<Option<Account>> {
        Err(StoreError::unavailable("disk I/O error"))
    }

    async fn list_accounts(&self) -> portal_core::Result<Vec<PublicAccount>> {
        Err(StoreError::unavailable("disk I/O error"))
    }

    async fn ping(&self) -> portal_core::Result<()> {
        Err(StoreError::unavailable("disk I/O error"))
    }
}
