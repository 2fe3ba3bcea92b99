//! Document store backed by PostgreSQL JSONB collections
//!
//! Every entity type maps to one table named after its collection
//! (`"Users"`, `"Callbacks"`) holding the serialized document in a `data`
//! column. Unique document fields become unique expression indexes.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::str::FromStr;
use std::time::Duration;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use sqlx::Row;

use crate::domain::persistence::{Entity, ObjectId};
use crate::domain::DomainError;

/// Document store connection settings
#[derive(Debug, Clone)]
pub struct DocumentStoreConfig {
    /// Server connection URL
    pub server_url: String,
    /// Database holding the collections; overrides any database in the URL
    pub database_name: String,
    /// Maximum number of pooled connections shared by all repositories
    pub max_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
}

impl Default for DocumentStoreConfig {
    fn default() -> Self {
        Self {
            server_url: "postgres://localhost:5432".to_string(),
            database_name: "httpcallback".to_string(),
            max_connections: 10,
            connect_timeout_secs: 10,
        }
    }
}

impl DocumentStoreConfig {
    pub fn new(server_url: impl Into<String>, database_name: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            database_name: database_name.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }
}

/// Pooled session to the document store
///
/// Cloning is cheap and every clone checks connections out of the same pool,
/// so one session serves all concurrently running requests.
#[derive(Debug, Clone)]
pub struct DocumentSession {
    pool: PgPool,
    database: String,
}

impl DocumentSession {
    /// Connects to the server; fails with `Connection` when no session can be established
    pub async fn open(config: &DocumentStoreConfig) -> Result<Self, DomainError> {
        let options = PgConnectOptions::from_str(&config.server_url)
            .map_err(|e| DomainError::connection(format!("Invalid document store url: {}", e)))?
            .database(&config.database_name);

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect_with(options)
            .await
            .map_err(|e| {
                DomainError::connection(format!(
                    "Failed to connect to document store database '{}': {}",
                    config.database_name, e
                ))
            })?;

        Ok(Self {
            pool,
            database: config.database_name.clone(),
        })
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    /// Handle on the collection that stores `E`
    pub fn collection<E: Entity>(&self) -> DocumentCollection<E> {
        DocumentCollection::new(self.pool.clone())
    }
}

/// One collection of JSON documents
pub struct DocumentCollection<E>
where
    E: Entity,
{
    pool: PgPool,
    _phantom: PhantomData<E>,
}

impl<E> Debug for DocumentCollection<E>
where
    E: Entity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentCollection")
            .field("collection", &E::COLLECTION)
            .finish()
    }
}

impl<E> DocumentCollection<E>
where
    E: Entity,
{
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _phantom: PhantomData,
        }
    }

    /// Creates the collection table and its unique indexes if missing
    pub async fn ensure_collection(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                id TEXT PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL
            )
            "#,
            table_name::<E>()
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "create collection"))?;

        for field in E::UNIQUE_FIELDS {
            sqlx::query(&unique_index_sql::<E>(field))
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(e, "create unique index"))?;
        }

        Ok(())
    }

    /// Assigns identity to the draft and inserts the document
    pub async fn insert(&self, draft: E::Draft) -> Result<E, DomainError> {
        let entity = E::from_draft(ObjectId::generate(), Utc::now(), draft);
        let data = serde_json::to_value(&entity).map_err(|e| {
            DomainError::internal(format!("Failed to serialize document: {}", e))
        })?;

        let query = format!(
            "INSERT INTO {} (id, data, created_at) VALUES ($1, $2, $3)",
            table_name::<E>()
        );

        sqlx::query(&query)
            .bind(entity.id().as_str())
            .bind(&data)
            .bind(entity.created_at())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "insert document"))?;

        Ok(entity)
    }

    pub async fn get(&self, id: &ObjectId) -> Result<E, DomainError> {
        let query = format!("SELECT data FROM {} WHERE id = $1", table_name::<E>());

        let row = sqlx::query(&query)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "get document"))?
            .ok_or_else(|| {
                DomainError::not_found(format!(
                    "No document with id '{}' in {}",
                    id,
                    E::COLLECTION
                ))
            })?;

        decode(row.get("data"))
    }

    /// All documents in creation order
    pub async fn list(&self) -> Result<Vec<E>, DomainError> {
        self.find(&Value::Object(Default::default())).await
    }

    /// Documents containing `filter` (JSONB containment), in creation order
    pub async fn find(&self, filter: &Value) -> Result<Vec<E>, DomainError> {
        let query = format!(
            "SELECT data FROM {} WHERE data @> $1 ORDER BY created_at, id",
            table_name::<E>()
        );

        let rows = sqlx::query(&query)
            .bind(filter)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "find documents"))?;

        rows.into_iter().map(|row| decode(row.get("data"))).collect()
    }

    /// First document containing `filter`, reduced server-side to the
    /// `(output key, document field)` pairs of `projection`
    pub async fn find_one_projected<P>(
        &self,
        filter: &Value,
        projection: &[(&str, &str)],
    ) -> Result<Option<P>, DomainError>
    where
        P: DeserializeOwned,
    {
        let query = format!(
            "SELECT {} AS doc FROM {} WHERE data @> $1 ORDER BY created_at, id LIMIT 1",
            projection_sql(projection),
            table_name::<E>()
        );

        let row = sqlx::query(&query)
            .bind(filter)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "find projected document"))?;

        row.map(|row| decode(row.get("doc"))).transpose()
    }
}

fn decode<T: DeserializeOwned>(data: Value) -> Result<T, DomainError> {
    serde_json::from_value(data)
        .map_err(|e| DomainError::internal(format!("Failed to deserialize document: {}", e)))
}

fn table_name<E: Entity>() -> String {
    format!("\"{}\"", E::COLLECTION)
}

fn unique_index_sql<E: Entity>(field: &str) -> String {
    format!(
        "CREATE UNIQUE INDEX IF NOT EXISTS \"{}_{}_key\" ON {} ((data->>'{}'))",
        E::COLLECTION,
        field,
        table_name::<E>(),
        field
    )
}

fn projection_sql(projection: &[(&str, &str)]) -> String {
    let pairs: Vec<String> = projection
        .iter()
        .map(|(key, field)| format!("'{}', data->'{}'", key, field))
        .collect();

    format!("jsonb_build_object({})", pairs.join(", "))
}

/// Translate a driver error into the repository error taxonomy
fn map_sqlx_error(error: sqlx::Error, action: &str) -> DomainError {
    match error {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            DomainError::duplicate_key(format!("Failed to {}: {}", action, db.message()))
        }
        sqlx::Error::RowNotFound => {
            DomainError::not_found(format!("Failed to {}: no matching document", action))
        }
        e @ (sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed) => {
            DomainError::backend_unavailable(format!("Failed to {}: {}", action, e))
        }
        e => DomainError::internal(format!("Failed to {}: {}", action, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Callback, User};

    #[test]
    fn test_document_store_config_default() {
        let config = DocumentStoreConfig::default();

        assert_eq!(config.database_name, "httpcallback");
        assert_eq!(config.max_connections, 10);
        assert_eq!(config.connect_timeout_secs, 10);
    }

    #[test]
    fn test_document_store_config_builder() {
        let config = DocumentStoreConfig::new("postgres://db.internal:5432", "callbacks")
            .with_max_connections(25)
            .with_connect_timeout(3);

        assert_eq!(config.server_url, "postgres://db.internal:5432");
        assert_eq!(config.database_name, "callbacks");
        assert_eq!(config.max_connections, 25);
        assert_eq!(config.connect_timeout_secs, 3);
    }

    #[test]
    fn test_table_names_follow_collections() {
        assert_eq!(table_name::<User>(), "\"Users\"");
        assert_eq!(table_name::<Callback>(), "\"Callbacks\"");
    }

    #[test]
    fn test_unique_index_sql() {
        assert_eq!(
            unique_index_sql::<User>("username"),
            "CREATE UNIQUE INDEX IF NOT EXISTS \"Users_username_key\" ON \"Users\" ((data->>'username'))"
        );
    }

    #[test]
    fn test_projection_sql() {
        assert_eq!(
            projection_sql(&[("id", "_id"), ("username", "username")]),
            "jsonb_build_object('id', data->'_id', 'username', data->'username')"
        );
    }

    #[test]
    fn test_error_mapping() {
        assert!(matches!(
            map_sqlx_error(sqlx::Error::RowNotFound, "get"),
            DomainError::NotFound { .. }
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolTimedOut, "get"),
            DomainError::BackendUnavailable { .. }
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::PoolClosed, "get"),
            DomainError::BackendUnavailable { .. }
        ));
        assert!(matches!(
            map_sqlx_error(
                sqlx::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    "refused"
                )),
                "get"
            ),
            DomainError::BackendUnavailable { .. }
        ));
        assert!(matches!(
            map_sqlx_error(sqlx::Error::Protocol("bad frame".to_string()), "get"),
            DomainError::Internal { .. }
        ));
    }

    #[tokio::test]
    async fn test_open_rejects_malformed_url() {
        let config = DocumentStoreConfig::new("not a url", "httpcallback");

        let result = DocumentSession::open(&config).await;
        assert!(matches!(result.unwrap_err(), DomainError::Connection { .. }));
    }
}
