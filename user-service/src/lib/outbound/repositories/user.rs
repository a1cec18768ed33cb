use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::PgPool;
use sqlx::Row;

use crate::domain::user::models::Name;
use crate::domain::user::models::User;
use crate::domain::user::models::UserChanges;
use crate::domain::user::models::UserId;
use crate::domain::user::models::UserProfile;
use crate::domain::user::models::Username;
use crate::domain::user::ports::UserRepository;
use crate::user::errors::UserError;

const PROFILE_COLUMNS: &str = "id, name, username, refresh_token, created_at, updated_at";

pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(e: sqlx::Error) -> UserError {
    UserError::DatabaseError(e.to_string())
}

/// Map a unique violation on the username constraint to a conflict.
fn write_error(e: sqlx::Error, username: Option<&Username>) -> UserError {
    if let (Some(db_err), Some(username)) = (e.as_database_error(), username) {
        if db_err.is_unique_violation() && db_err.constraint() == Some("users_username_key") {
            return UserError::UsernameAlreadyExists(username.as_str().to_string());
        }
    }
    database_error(e)
}

fn profile_from_row(row: &PgRow) -> Result<UserProfile, UserError> {
    Ok(UserProfile {
        id: UserId(row.try_get("id").map_err(database_error)?),
        name: Name::new(row.try_get("name").map_err(database_error)?)?,
        username: Username::new(row.try_get("username").map_err(database_error)?)?,
        refresh_token: row.try_get("refresh_token").map_err(database_error)?,
        created_at: row.try_get("created_at").map_err(database_error)?,
        updated_at: row.try_get("updated_at").map_err(database_error)?,
    })
}

fn user_from_row(row: &PgRow) -> Result<User, UserError> {
    let profile = profile_from_row(row)?;
    Ok(User {
        id: profile.id,
        name: profile.name,
        username: profile.username,
        password_hash: row.try_get("password_hash").map_err(database_error)?,
        refresh_token: profile.refresh_token,
        created_at: profile.created_at,
        updated_at: profile.updated_at,
    })
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, name, username, password_hash, refresh_token, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id.0)
        .bind(user.name.as_str())
        .bind(user.username.as_str())
        .bind(user.password_hash.as_str())
        .bind(user.refresh_token.as_deref())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, Some(&user.username)))?;

        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<UserProfile>, UserError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError> {
        let row = sqlx::query(&format!(
            "SELECT {}, password_hash FROM users WHERE username = $1",
            PROFILE_COLUMNS
        ))
        .bind(username.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<Option<UserProfile>, UserError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM users WHERE refresh_token = $1",
            PROFILE_COLUMNS
        ))
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.as_ref().map(profile_from_row).transpose()
    }

    async fn list_all(&self) -> Result<Vec<UserProfile>, UserError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM users ORDER BY created_at ASC",
            PROFILE_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(database_error)?;

        rows.iter().map(profile_from_row).collect()
    }

    async fn update(&self, id: &UserId, changes: UserChanges) -> Result<u64, UserError> {
        let (set_token, token) = match changes.refresh_token {
            Some(token) => (true, token),
            None => (false, None),
        };

        let result = sqlx::query(
            r#"
            UPDATE users
            SET name = COALESCE($2, name),
                username = COALESCE($3, username),
                password_hash = COALESCE($4, password_hash),
                refresh_token = CASE WHEN $5 THEN $6 ELSE refresh_token END,
                updated_at = now()
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .bind(changes.name.as_ref().map(|n| n.as_str()))
        .bind(changes.username.as_ref().map(|u| u.as_str()))
        .bind(changes.password_hash.as_deref())
        .bind(set_token)
        .bind(token)
        .execute(&self.pool)
        .await
        .map_err(|e| write_error(e, changes.username.as_ref()))?;

        Ok(result.rows_affected())
    }

    async fn swap_refresh_token(
        &self,
        id: &UserId,
        current: &str,
        next: &str,
    ) -> Result<bool, UserError> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET refresh_token = $3, updated_at = now()
            WHERE id = $1 AND refresh_token = $2
            "#,
        )
        .bind(id.0)
        .bind(current)
        .bind(next)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn delete(&self, id: &UserId) -> Result<bool, UserError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        Ok(result.rows_affected() > 0)
    }
}
