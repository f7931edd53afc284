use crate::core::{NewSchool, PaginationSpec, School, SchoolPage, SchoolStore};
use crate::domain::model::Pagination;
use crate::utils::error::{Result, SchoolError};
use crate::utils::sanitize::escape_text;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

const SCHEMA: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS schools (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name VARCHAR(255) NOT NULL,
        address VARCHAR(255) NOT NULL,
        latitude REAL NOT NULL,
        longitude REAL NOT NULL,
        created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
        updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
    "#,
    r#"
    CREATE TRIGGER IF NOT EXISTS schools_touch_updated_at
    AFTER UPDATE ON schools
    FOR EACH ROW
    BEGIN
        UPDATE schools SET updated_at = CURRENT_TIMESTAMP WHERE id = OLD.id;
    END
    "#,
];

// SQLITE_BUSY and SQLITE_LOCKED, the timeout class of SQLite failures.
const TRANSIENT_SQLITE_CODES: &[&str] = &["5", "6"];

#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout: Duration,
}

/// Opens the shared connection pool. Call once at startup and hand the pool
/// to [`SqliteSchoolStore::new`].
pub async fn connect(settings: &PoolSettings) -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&settings.url)
        .map_err(|e| SchoolError::config(format!("Invalid database url {}: {}", settings.url, e)))?
        .create_if_missing(true);

    // Every in-memory connection is its own database, so keep exactly one alive.
    let in_memory = settings.url.contains(":memory:");
    let pool_options = if in_memory {
        SqlitePoolOptions::new()
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        SqlitePoolOptions::new().max_connections(settings.max_connections)
    };

    pool_options
        .acquire_timeout(settings.connect_timeout)
        .connect_with(options)
        .await
        .map_err(|e| classify("Error connecting to database", e))
}

fn is_transient(e: &sqlx::Error) -> bool {
    match e {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(db) => db
            .code()
            .is_some_and(|code| TRANSIENT_SQLITE_CODES.contains(&code.as_ref())),
        _ => false,
    }
}

fn classify(context: &str, e: sqlx::Error) -> SchoolError {
    let message = format!("{}: {}", context, e);
    if is_transient(&e) {
        SchoolError::transient_database(message)
    } else {
        SchoolError::database(message)
    }
}

#[derive(Debug, Clone)]
pub struct SqliteSchoolStore {
    pool: SqlitePool,
}

impl SqliteSchoolStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn init_schema(&self) -> Result<()> {
        for statement in SCHEMA {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| classify("Error initializing schema", e))?;
        }
        tracing::info!("Database initialized successfully");
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SchoolStore for SqliteSchoolStore {
    async fn create(&self, school: &NewSchool) -> Result<School> {
        sqlx::query_as::<_, School>(
            "INSERT INTO schools (name, address, latitude, longitude) VALUES (?, ?, ?, ?) \
             RETURNING id, name, address, latitude, longitude, created_at, updated_at",
        )
        .bind(escape_text(&school.name))
        .bind(escape_text(&school.address))
        .bind(school.latitude)
        .bind(school.longitude)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| classify("Error creating school", e))
    }

    async fn find_page(&self, pagination: PaginationSpec) -> Result<SchoolPage> {
        let schools = sqlx::query_as::<_, School>(
            "SELECT id, name, address, latitude, longitude, created_at, updated_at \
             FROM schools ORDER BY id LIMIT ? OFFSET ?",
        )
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| classify("Error retrieving schools", e))?;

        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM schools")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| classify("Error retrieving schools", e))?;

        Ok(SchoolPage {
            schools,
            pagination: Pagination::new(pagination, total),
        })
    }
}
