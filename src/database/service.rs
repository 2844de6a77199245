use crate::database::manager::{DatabaseError, DatabaseManager};
use crate::database::models::user::AuthUser;

const FIND_BY_CREDENTIALS: &str = "SELECT email, role
     FROM auth_users
     WHERE email = $1 AND password = $2
     LIMIT 1";

/// Look up the user whose email and password both equal the given values.
///
/// Opens its own connection and closes it before returning, whether or not
/// the query succeeded.
pub async fn find_user_by_credentials(
    db: &DatabaseManager,
    email: &str,
    password: &str,
) -> Result<Option<AuthUser>, DatabaseError> {
    let mut conn = db.connect().await?;

    let user = sqlx::query_as::<_, AuthUser>(FIND_BY_CREDENTIALS)
        .bind(email)
        .bind(password)
        .fetch_optional(&mut conn)
        .await;

    db.release(conn).await;

    Ok(user?)
}
