use sqlx::PgPool;

use crate::database::models::User;
use crate::database::DatabaseError;

pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn by_username(&self, username: &str) -> Result<User, DatabaseError> {
        sqlx::query_as::<_, User>(
            "SELECT u.id, u.username, u.password AS password_hash, u.salt, u.created_at
             FROM users AS u
             WHERE u.username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(DatabaseError::NotFound)
    }
}
