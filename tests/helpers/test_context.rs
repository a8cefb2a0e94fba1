//! Test context for unified test setup
//!
//! Wires the services over a [`MemoryStore`], in-memory sessions and the
//! identity service mock, the same way `main` wires them for production.

use std::sync::Arc;

use axum::Router;
use uuid::Uuid;
use ClubPortal::{
    config::{AdminLoginPolicy, AllowedAdmin, Settings},
    create_routes,
    models::{Event, EventStatus, Identity, LocalAdmin, RemoteUser, Role},
    session::{MemorySessionStorage, Session, SessionManager},
    services::{GoTrueClient, ServiceFactory},
    AppState, ClubStore, MemoryStore,
};

use super::{event_request, IdentityMockServer, ADMIN_EMAIL, ADMIN_PASSWORD, STUDENT_EMAIL, TEST_ANON_KEY};

pub struct TestContext {
    pub store: Arc<MemoryStore>,
    pub identity: IdentityMockServer,
    pub settings: Settings,
    pub services: ServiceFactory,
}

impl TestContext {
    /// Context with the default role-table admin login
    pub async fn new() -> Self {
        Self::with_policy(AdminLoginPolicy::RoleTable).await
    }

    pub async fn with_policy(policy: AdminLoginPolicy) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let identity = IdentityMockServer::new().await;
        let settings = Self::create_test_settings(&identity, policy);

        let store = Arc::new(MemoryStore::new());
        let sessions = SessionManager::new(
            Arc::new(MemorySessionStorage::new()),
            settings.auth.session_ttl_seconds,
        )
        .expect("valid session ttl");
        let client = GoTrueClient::new(&settings.auth).expect("valid identity settings");
        let services = ServiceFactory::new(&settings, store.clone(), Arc::new(client), sessions);

        Self {
            store,
            identity,
            settings,
            services,
        }
    }

    fn create_test_settings(identity: &IdentityMockServer, policy: AdminLoginPolicy) -> Settings {
        let mut settings = Settings::default();
        settings.auth.identity_url = identity.uri();
        settings.auth.anon_key = TEST_ANON_KEY.to_string();
        settings.auth.timeout_seconds = 5;
        settings.auth.admin_login = policy;
        settings.auth.allowed_admins = vec![AllowedAdmin {
            email: ADMIN_EMAIL.to_string(),
            password: ADMIN_PASSWORD.to_string(),
            username: "Club Lead".to_string(),
        }];
        settings.rate_limit.login_attempts_per_minute = 100;
        settings.rate_limit.login_burst = 100;
        settings
    }

    /// HTTP router over this context's services
    pub fn app(&self) -> Router {
        create_routes(AppState::new(self.services.clone(), self.settings.clone()))
    }

    pub fn sessions(&self) -> &SessionManager {
        self.services.sessions()
    }

    pub async fn seed_event(&self, title: &str, status: EventStatus) -> Event {
        self.store
            .create_event(event_request(title, status))
            .await
            .expect("event seeded")
    }

    /// Signed in student without roles
    pub async fn student_session(&self) -> Session {
        let identity = Identity::RemoteUser(RemoteUser {
            id: Uuid::new_v4(),
            email: Some(STUDENT_EMAIL.to_string()),
            roles: vec![],
        });
        self.sessions()
            .establish(identity, None)
            .await
            .expect("student session")
    }

    /// Signed in remote user holding the admin role
    pub async fn remote_admin_session(&self) -> Session {
        let user_id = Uuid::new_v4();
        self.store.grant_role(user_id, Role::Admin).await.expect("role granted");
        let identity = Identity::RemoteUser(RemoteUser {
            id: user_id,
            email: Some(ADMIN_EMAIL.to_string()),
            roles: vec![Role::Admin],
        });
        self.sessions()
            .establish(identity, None)
            .await
            .expect("admin session")
    }

    /// Locally issued admin identity
    pub async fn local_admin_session(&self) -> Session {
        let identity = Identity::LocalAdmin(LocalAdmin {
            id: "admin-1741600000000".to_string(),
            email: ADMIN_EMAIL.to_string(),
            username: "Club Lead".to_string(),
            is_admin: true,
        });
        self.sessions()
            .establish(identity, None)
            .await
            .expect("local admin session")
    }
}
