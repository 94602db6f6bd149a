// User service - user listing, lookup and creation
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{CreateUser, User};

pub struct UserService {
    db: Database,
}

impl UserService {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn list_users(&self) -> Result<Vec<User>> {
        let users = sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users ORDER BY username",
        )
        .fetch_all(&self.db.pg)
        .await?;

        Ok(users)
    }

    /// Get a user by username
    pub async fn get_user(&self, username: &str) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            "SELECT username, name, avatar_url FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.db.pg)
        .await?
        .ok_or_else(|| AppError::not_found("Username not found"))?;

        Ok(user)
    }

    pub async fn create_user(&self, input: CreateUser) -> Result<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, name, avatar_url)
            VALUES ($1, $2, $3)
            RETURNING username, name, avatar_url
            "#,
        )
        .bind(input.username)
        .bind(input.name)
        .bind(input.avatar_url)
        .fetch_one(&self.db.pg)
        .await?;

        tracing::info!(username = %user.username, "User created");

        Ok(user)
    }

    pub async fn user_exists(&self, username: &str) -> Result<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(&self.db.pg)
                .await?;

        Ok(exists)
    }
}
