//! Repository for user accounts

use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::map_unique;
use crate::schema::User;
use crate::Result;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at, last_login";

/// Repository for managing user records
pub struct UsersRepo {
    pool: SqlitePool,
}

impl UsersRepo {
    /// Create a new repository instance
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create a new user and return the user id
    pub async fn create(&self, username: &str, email: &str, password_hash: &str) -> Result<i64> {
        let result = sqlx::query(
            "INSERT INTO users (username, email, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(username)
        .bind(email)
        .bind(password_hash)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique(e, format!("user '{}' (username or email taken)", username)))?;

        Ok(result.last_insert_rowid())
    }

    /// Find a user by id
    pub async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE id = ?1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by username, including the password hash for
    /// authentication
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE username = ?1",
            USER_COLUMNS
        ))
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Find a user by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {} FROM users WHERE email = ?1",
            USER_COLUMNS
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update the last-login timestamp
    pub async fn update_last_login(&self, id: i64) -> Result<()> {
        sqlx::query("UPDATE users SET last_login = ?1 WHERE id = ?2")
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, Error};

    #[tokio::test]
    async fn test_create_and_find() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.users();

        let id = repo.create("alice", "alice@example.com", "hash").await.unwrap();

        let user = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(user.username, "alice");
        assert_eq!(user.email, "alice@example.com");
        assert!(user.last_login.is_none());

        let by_name = repo.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.id, id);
        assert_eq!(by_name.password_hash, "hash");

        let by_email = repo.find_by_email("alice@example.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, id);
    }

    #[tokio::test]
    async fn test_missing_user_is_none() {
        let db = Database::in_memory().await.unwrap();
        assert!(db.users().find_by_id(42).await.unwrap().is_none());
        assert!(db.users().find_by_username("ghost").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.users();

        repo.create("bob", "bob@example.com", "hash").await.unwrap();
        let err = repo.create("bob", "other@example.com", "hash").await.unwrap_err();
        assert!(matches!(err, Error::AlreadyExists(_)));
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let db = Database::in_memory().await.unwrap();
        let repo = db.users();

        let id = repo.create("carol", "carol@example.com", "hash").await.unwrap();
        repo.update_last_login(id).await.unwrap();

        let user = repo.find_by_id(id).await.unwrap().unwrap();
        assert!(user.last_login.is_some());
    }
}
