/**
 * PostgreSQL Repository
 *
 * `sqlx` implementation of `PosRepository`. Identifiers are exposed as
 * text so the rest of the crate treats them as opaque strings.
 */

use async_trait::async_trait;
use sqlx::PgPool;

use crate::backend::repository::{NewUser, PosRepository, RepositoryError, UserRecord};
use crate::shared::models::{Role, Store, UserSummary};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: String,
    name: String,
    role: String,
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    id: String,
    name: String,
    role: String,
    password_hash: String,
}

impl From<UserRow> for UserSummary {
    fn from(row: UserRow) -> Self {
        UserSummary {
            id: row.id,
            name: row.name,
            role: Role::from_stored(&row.role),
        }
    }
}

impl From<CredentialRow> for UserRecord {
    fn from(row: CredentialRow) -> Self {
        UserRecord {
            id: row.id,
            name: row.name,
            role: Role::from_stored(&row.role),
            password_hash: row.password_hash,
        }
    }
}

/// Repository backed by a PostgreSQL pool
#[derive(Debug, Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_insert_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            RepositoryError::Conflict(db.message().to_string())
        }
        _ => RepositoryError::Database(err),
    }
}

#[async_trait]
impl PosRepository for PgRepository {
    async fn list_stores(&self) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT id::text AS id, nombre
            FROM tiendas
            ORDER BY nombre
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, name)| Store { id, name })
            .collect())
    }

    async fn store_exists(&self, store_id: &str) -> Result<bool, RepositoryError> {
        let row = sqlx::query_scalar::<_, i32>(
            r#"
            SELECT 1
            FROM tiendas
            WHERE id::text = $1
            LIMIT 1
            "#,
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn list_active_users(&self) -> Result<Vec<UserSummary>, RepositoryError> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id::text AS id, nombre AS name, rol AS role
            FROM usuarios
            WHERE activo = true
            ORDER BY nombre
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(UserSummary::from).collect())
    }

    async fn find_active_user(&self, user_id: &str) -> Result<Option<UserRecord>, RepositoryError> {
        let row = sqlx::query_as::<_, CredentialRow>(
            r#"
            SELECT id::text AS id, nombre AS name, rol AS role, password_hash
            FROM usuarios
            WHERE id::text = $1
              AND activo = true
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(UserRecord::from))
    }

    async fn create_user(&self, user: NewUser) -> Result<UserSummary, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO usuarios (nombre, rol, activo, password_hash, email)
            VALUES ($1, $2, true, $3, $4)
            RETURNING id::text AS id, nombre AS name, rol AS role
            "#,
        )
        .bind(&user.name)
        .bind(user.role.as_str())
        .bind(&user.password_hash)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(map_insert_error)?;

        Ok(row.into())
    }

    async fn set_password_hash(
        &self,
        user_id: &str,
        password_hash: &str,
    ) -> Result<bool, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE usuarios
            SET password_hash = $1
            WHERE id::text = $2
            "#,
        )
        .bind(password_hash)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
