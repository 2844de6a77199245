// auth/mod.rs - credential lookup seam between the HTTP layer and storage

use async_trait::async_trait;

use crate::database::service::find_user_by_credentials;
use crate::database::{AuthUser, DatabaseError, DatabaseManager};

/// Placeholder handed back on a successful login. It is not a credential and
/// nothing in this service validates it.
pub const PLACEHOLDER_TOKEN: &str = "fake-jwt-token";

/// Message returned with every rejected login
pub const INVALID_CREDENTIALS: &str = "Identifiants invalides";

/// Source of user records for the login handler.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Return the user whose email and password equal the given values
    /// exactly, if any.
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthUser>, DatabaseError>;

    /// Check that the backing storage is reachable
    async fn ping(&self) -> Result<(), DatabaseError>;
}

#[async_trait]
impl CredentialStore for DatabaseManager {
    async fn find_by_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<AuthUser>, DatabaseError> {
        find_user_by_credentials(self, email, password).await
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        self.health_check().await
    }
}
