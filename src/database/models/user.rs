use sqlx::FromRow;

/// Row of `auth_users` as returned by a credential lookup. The password
/// column is matched in SQL and never selected.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AuthUser {
    pub email: String,
    pub role: String,
}
