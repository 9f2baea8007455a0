//! `PostgreSQL` document store.
//!
//! All collections share one `documents` table:
//!
//! | column       | type        |                                  |
//! |--------------|-------------|----------------------------------|
//! | `collection` | `TEXT`      | part of the primary key          |
//! | `id`         | `TEXT`      | part of the primary key          |
//! | `seq`        | `BIGSERIAL` | insertion order for `find`       |
//! | `body`       | `JSONB`     | the whole document, `id` included |
//!
//! Filters become `body ->> 'field' = $n` clauses. Queries are assembled at
//! runtime with [`QueryBuilder`] since field names vary per call.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{PgPool, Postgres, QueryBuilder};

use super::{Collection, DocumentStore, Filter, RepositoryError, fields};

/// Document store backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `WHERE collection = $1 AND ...` for `filter`.
fn push_filter<'args>(
    builder: &mut QueryBuilder<'args, Postgres>,
    collection: Collection,
    filter: &'args Filter,
) {
    builder
        .push(" WHERE collection = ")
        .push_bind(collection.as_str());

    for (field, value) in filter.clauses() {
        if *field == fields::ID {
            builder.push(" AND id = ");
        } else {
            builder.push(" AND body ->> ").push_bind(*field).push(" = ");
        }
        builder.push_bind(value.as_str());
    }
}

fn map_write_error(collection: Collection, e: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = e
        && db_err.is_unique_violation()
    {
        let what = if db_err.constraint() == Some("documents_users_email_key") {
            "email"
        } else {
            "id"
        };
        return RepositoryError::Conflict(format!("{collection} {what} already exists"));
    }
    RepositoryError::Database(e)
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn insert_one(
        &self,
        collection: Collection,
        document: Value,
    ) -> Result<(), RepositoryError> {
        let id = document
            .get(fields::ID)
            .and_then(Value::as_str)
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!("{collection} document has no string id"))
            })?
            .to_owned();

        sqlx::query("INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)")
            .bind(collection.as_str())
            .bind(id)
            .bind(Json(document))
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;

        Ok(())
    }

    async fn find_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Option<Value>, RepositoryError> {
        let mut builder = QueryBuilder::new("SELECT body FROM documents");
        push_filter(&mut builder, collection, filter);
        builder.push(" ORDER BY seq LIMIT 1");

        let row = builder
            .build_query_scalar::<Json<Value>>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(|Json(body)| body))
    }

    async fn find(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<Vec<Value>, RepositoryError> {
        let mut builder = QueryBuilder::new("SELECT body FROM documents");
        push_filter(&mut builder, collection, filter);
        builder.push(" ORDER BY seq");

        let rows = builder
            .build_query_scalar::<Json<Value>>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|Json(body)| body).collect())
    }

    async fn update_one(
        &self,
        collection: Collection,
        filter: &Filter,
        patch: Map<String, Value>,
    ) -> Result<Option<Value>, RepositoryError> {
        let mut builder = QueryBuilder::new("UPDATE documents SET body = body || ");
        builder
            .push_bind(Json(Value::Object(patch)))
            .push(" WHERE collection = ")
            .push_bind(collection.as_str())
            .push(" AND id = (SELECT id FROM documents");
        push_filter(&mut builder, collection, filter);
        builder.push(" ORDER BY seq LIMIT 1) RETURNING body");

        let row = builder
            .build_query_scalar::<Json<Value>>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_write_error(collection, e))?;

        Ok(row.map(|Json(body)| body))
    }

    async fn delete_one(
        &self,
        collection: Collection,
        filter: &Filter,
    ) -> Result<bool, RepositoryError> {
        let mut builder = QueryBuilder::new("DELETE FROM documents WHERE collection = ");
        builder
            .push_bind(collection.as_str())
            .push(" AND id = (SELECT id FROM documents");
        push_filter(&mut builder, collection, filter);
        builder.push(" ORDER BY seq LIMIT 1)");

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
