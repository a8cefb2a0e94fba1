//! Authentication service
//!
//! Student sign up / sign in against the identity service, admin login under
//! the configured policy, and sign out.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::config::{AdminLoginPolicy, AuthConfig};
use crate::database::ClubStore;
use crate::middleware::LoginThrottle;
use crate::models::{Identity, LocalAdmin, RemoteUser, Role};
use crate::services::identity::{AuthUser, IdentityProvider};
use crate::session::{Session, SessionManager};
use crate::utils::errors::{ClubPortalError, IdentityError, Result};
use crate::utils::helpers::local_admin_id;
use crate::utils::logging::log_auth_event;
use crate::validation::validate_credentials;

pub const ADMIN_REQUIRED: &str = "You need administrator privileges to access this page.";
const NOT_AUTHORIZED: &str = "Invalid credentials or not authorized.";

/// Result of a sign up; `session` is absent until the email is confirmed
#[derive(Debug, Clone)]
pub struct SignUpOutcome {
    pub user: AuthUser,
    pub session: Option<Session>,
}

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn ClubStore>,
    identity: Arc<dyn IdentityProvider>,
    sessions: SessionManager,
    throttle: LoginThrottle,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(
        store: Arc<dyn ClubStore>,
        identity: Arc<dyn IdentityProvider>,
        sessions: SessionManager,
        throttle: LoginThrottle,
        config: AuthConfig,
    ) -> Self {
        Self {
            store,
            identity,
            sessions,
            throttle,
            config,
        }
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn throttle(&self) -> &LoginThrottle {
        &self.throttle
    }

    /// Create an account on the identity service
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome> {
        let email = validate_credentials(email, password)?;

        let result = self.identity.sign_up(&email, password).await.map_err(|e| {
            log_auth_event(&email, "sign_up", false, Some(&e.to_string()));
            ClubPortalError::from(e)
        })?;
        log_auth_event(&email, "sign_up", true, None);

        let session = match result.session {
            Some(remote) => {
                let identity = self.remote_identity(&remote.user).await?;
                Some(self.sessions.establish(identity, Some(remote.access_token)).await?)
            }
            None => None,
        };

        Ok(SignUpOutcome {
            user: result.user,
            session,
        })
    }

    /// Password sign in for any user
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        let email = validate_credentials(email, password)?;
        self.throttle.check(&email)?;

        let remote = self
            .identity
            .sign_in_with_password(&email, password)
            .await
            .map_err(|e| {
                log_auth_event(&email, "sign_in", false, Some(&e.to_string()));
                ClubPortalError::from(e)
            })?;

        let identity = self.remote_identity(&remote.user).await?;
        let session = self.sessions.establish(identity, Some(remote.access_token)).await?;
        log_auth_event(&email, "sign_in", true, None);

        Ok(session)
    }

    /// Admin dashboard login under the configured policy
    pub async fn admin_login(&self, email: &str, password: &str) -> Result<Session> {
        let email = validate_credentials(email, password)?;
        self.throttle.check(&email)?;

        let session = match self.config.admin_login {
            AdminLoginPolicy::RoleTable => self.role_table_login(&email, password).await,
            AdminLoginPolicy::AllowList => self.allow_list_login(&email, password).await,
        };

        match &session {
            Ok(_) => log_auth_event(&email, "admin_login", true, None),
            Err(e) => log_auth_event(&email, "admin_login", false, Some(&e.to_string())),
        }
        session
    }

    async fn role_table_login(&self, email: &str, password: &str) -> Result<Session> {
        let remote = self
            .identity
            .sign_in_with_password(email, password)
            .await
            .map_err(|e| match e {
                IdentityError::InvalidCredentials => ClubPortalError::Authentication(NOT_AUTHORIZED.to_string()),
                other => other.into(),
            })?;

        let is_admin = match self.store.has_role(remote.user.id, Role::Admin).await {
            Ok(is_admin) => is_admin,
            Err(e) => {
                self.revoke_remote(&remote.access_token).await;
                return Err(e);
            }
        };

        if !is_admin {
            warn!(email = %email, "Admin login without admin role, signing out");
            self.revoke_remote(&remote.access_token).await;
            return Err(ClubPortalError::AccessDenied(ADMIN_REQUIRED.to_string()));
        }

        let identity = Identity::RemoteUser(RemoteUser {
            id: remote.user.id,
            email: remote.user.email.clone(),
            roles: vec![Role::Admin],
        });
        self.sessions.establish(identity, Some(remote.access_token)).await
    }

    async fn allow_list_login(&self, email: &str, password: &str) -> Result<Session> {
        let admin = self
            .config
            .allowed_admins
            .iter()
            .find(|admin| admin.email == email && admin.password == password)
            .ok_or_else(|| ClubPortalError::Authentication(NOT_AUTHORIZED.to_string()))?;

        info!(email = %admin.email, "Admin found in allow list");
        let identity = Identity::LocalAdmin(LocalAdmin {
            id: local_admin_id(Utc::now()),
            email: admin.email.clone(),
            username: admin.username.clone(),
            is_admin: true,
        });
        self.sessions.establish(identity, None).await
    }

    /// End a session; remote sessions are also revoked on the identity
    /// service. Unknown tokens are ignored.
    pub async fn sign_out(&self, token: &str) -> Result<()> {
        let Some(session) = self.sessions.end(token).await? else {
            return Ok(());
        };

        if let Some(access_token) = &session.access_token {
            self.identity.sign_out(access_token).await?;
        }

        if let Some(email) = session.identity.email() {
            log_auth_event(email, "sign_out", true, None);
        }
        Ok(())
    }

    async fn remote_identity(&self, user: &AuthUser) -> Result<Identity> {
        let mut roles = Vec::new();
        if self.store.has_role(user.id, Role::Admin).await? {
            roles.push(Role::Admin);
        }

        Ok(Identity::RemoteUser(RemoteUser {
            id: user.id,
            email: user.email.clone(),
            roles,
        }))
    }

    async fn revoke_remote(&self, access_token: &str) {
        if let Err(e) = self.identity.sign_out(access_token).await {
            warn!(error = %e, "Failed to revoke remote session");
        }
    }
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("admin_login", &self.config.admin_login)
            .finish_non_exhaustive()
    }
}
