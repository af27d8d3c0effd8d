use quiz_core::model::{UserAccount, Username};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, ser};
use crate::repository::{StorageError, UserRepository};

#[async_trait::async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, user: &UserAccount) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO users (username, password_hash, country)
            VALUES (?1, ?2, ?3)
            ",
        )
        .bind(user.username.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.country.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| match e.as_database_error() {
            Some(db) if db.is_unique_violation() => StorageError::Conflict,
            _ => conn(e),
        })?;

        Ok(())
    }

    async fn get_user(&self, username: &Username) -> Result<Option<UserAccount>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT username, password_hash, country
            FROM users
            WHERE username = ?1
            ",
        )
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(UserAccount {
            username: Username::new(row.try_get::<String, _>("username").map_err(ser)?)
                .map_err(ser)?,
            password_hash: row.try_get("password_hash").map_err(ser)?,
            country: row.try_get("country").map_err(ser)?,
        }))
    }
}
