//! Almacén de documentos sobre PostgreSQL
//!
//! Todas las colecciones comparten la tabla `documents` con el cuerpo en
//! una columna JSONB. El merge usa el operador `||` de JSONB, que sustituye
//! las claves de primer nivel.

use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{types::Json, FromRow, PgPool};

use super::{collections, unique_value, Document, DocumentStore, StoreError, OWNER_FIELD};

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: String,
    data: Json<Value>,
}

impl TryFrom<DocumentRow> for Document {
    type Error = StoreError;

    fn try_from(row: DocumentRow) -> Result<Self, Self::Error> {
        match row.data.0 {
            Value::Object(data) => Ok(Document::new(row.id, data)),
            other => Err(StoreError::Serialization(format!(
                "document '{}' is not an object: {}",
                row.id, other
            ))),
        }
    }
}

#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Crea la tabla y los índices si no existen
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data JSONB NOT NULL DEFAULT '{}'::jsonb,
                updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            "CREATE INDEX IF NOT EXISTS documents_owner_idx ON documents (collection, (data->>'userId'))",
        )
        .execute(&self.pool)
        .await?;

        // Un email por cuenta; respalda `insert_unique` frente a altas concurrentes
        sqlx::query(&format!(
            "CREATE UNIQUE INDEX IF NOT EXISTS documents_users_email_uidx \
             ON documents ((data->>'email')) WHERE collection = '{}'",
            collections::USERS
        ))
        .execute(&self.pool)
        .await?;

        log::info!("✅ Esquema de documentos verificado");
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Document::try_from).transpose()
    }

    async fn list_by_owner(
        &self,
        collection: &str,
        owner_id: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND data->>$2 = $3 ORDER BY id",
        )
        .bind(collection)
        .bind(OWNER_FIELD)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        log::debug!("📄 {} documentos en '{}' para {}", rows.len(), collection, owner_id);
        rows.into_iter().map(Document::try_from).collect()
    }

    async fn find_one(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, data FROM documents WHERE collection = $1 AND data->>$2 = $3 LIMIT 1",
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Document::try_from).transpose()
    }

    async fn merge(
        &self,
        collection: &str,
        id: &str,
        patch: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, data, updated_at)
            VALUES ($1, $2, $3, now())
            ON CONFLICT (collection, id)
            DO UPDATE SET data = documents.data || EXCLUDED.data, updated_at = now()
            RETURNING id, data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(patch)))
        .fetch_one(&self.pool)
        .await?;

        Document::try_from(row)
    }

    async fn insert_unique(
        &self,
        collection: &str,
        id: &str,
        unique_field: &str,
        data: Map<String, Value>,
    ) -> Result<Document, StoreError> {
        let value = unique_value(&data, unique_field)?.to_string();
        let row = sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (collection, id, data, updated_at)
            SELECT $1, $2, $3, now()
            WHERE NOT EXISTS (
                SELECT 1 FROM documents WHERE collection = $1 AND data->>$4 = $5
            )
            RETURNING id, data
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Json(Value::Object(data)))
        .bind(unique_field)
        .bind(&value)
        .fetch_optional(&self.pool)
        .await?;

        match row {
            Some(row) => Document::try_from(row),
            None => Err(StoreError::Duplicate(format!(
                "{}.{} = {}",
                collection, unique_field, value
            ))),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_row_must_be_object() {
        let row = DocumentRow {
            id: "x".to_string(),
            data: Json(json!("scalar")),
        };
        assert!(matches!(Document::try_from(row), Err(StoreError::Serialization(_))));

        let row = DocumentRow {
            id: "y".to_string(),
            data: Json(json!({ "userId": "a" })),
        };
        let doc = Document::try_from(row).unwrap();
        assert_eq!(doc.owner(), Some("a"));
    }
}
