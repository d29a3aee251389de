pub mod models;
pub mod queries;

use sqlx::AnyPool;
use sqlx::any::AnyPoolOptions;

use crate::config::DatabaseConfig;

/// Database backend detected from the connection URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbBackend {
    Sqlite,
    Postgres,
}

impl DbBackend {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with("postgres") {
            DbBackend::Postgres
        } else {
            DbBackend::Sqlite
        }
    }
}

/// Connection pool plus the backend it talks to. Query modules write SQL with
/// `?` placeholders and pass it through [`DbPool::sql`] before binding:
///   - `sqlite://path.db`  → SQLite
///   - `postgres://...`    → PostgreSQL
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: AnyPool,
    backend: DbBackend,
}

impl DbPool {
    pub fn inner(&self) -> &AnyPool {
        &self.pool
    }

    pub fn backend(&self) -> DbBackend {
        self.backend
    }

    /// Rewrite `?` placeholders to `$1, $2, ...` for PostgreSQL.
    pub fn sql(&self, query: &str) -> String {
        match self.backend {
            DbBackend::Sqlite => query.to_string(),
            DbBackend::Postgres => numbered_placeholders(query),
        }
    }
}

fn numbered_placeholders(query: &str) -> String {
    let mut out = String::with_capacity(query.len() + 8);
    let mut n = 0;
    let mut in_literal = false;
    for c in query.chars() {
        match c {
            '\'' => {
                in_literal = !in_literal;
                out.push(c);
            }
            '?' if !in_literal => {
                n += 1;
                out.push('$');
                out.push_str(&n.to_string());
            }
            _ => out.push(c),
        }
    }
    out
}

/// Install database drivers and create a connection pool.
/// The backend is determined by the URI scheme in `config.url`.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    connect(&config.url, 5).await
}

async fn connect(url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    // Register all compiled-in database drivers
    sqlx::any::install_default_drivers();

    let backend = DbBackend::from_url(url);
    let pool = AnyPoolOptions::new()
        .max_connections(max_connections)
        .connect(url)
        .await?;

    if backend == DbBackend::Sqlite {
        configure_sqlite(&pool).await?;
    }

    run_migrations(&pool, backend).await?;

    Ok(DbPool { pool, backend })
}

/// Set SQLite pragmas for WAL journal mode.
async fn configure_sqlite(pool: &AnyPool) -> Result<(), sqlx::Error> {
    sqlx::query("PRAGMA journal_mode=WAL").execute(pool).await?;
    Ok(())
}

async fn run_migrations(pool: &AnyPool, backend: DbBackend) -> Result<(), sqlx::Error> {
    let migrator = match backend {
        DbBackend::Sqlite => sqlx::migrate!("./migrations"),
        DbBackend::Postgres => sqlx::migrate!("./migrations_pg"),
    };
    migrator.run(pool).await?;
    Ok(())
}

/// Create an in-memory SQLite pool for testing, with all migrations applied.
pub async fn create_test_pool() -> DbPool {
    sqlx::any::install_default_drivers();

    let pool = AnyPoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create test pool");

    run_migrations(&pool, DbBackend::Sqlite)
        .await
        .expect("Failed to run migrations");

    DbPool {
        pool,
        backend: DbBackend::Sqlite,
    }
}

/// Create a test pool for any backend (used by Docker integration tests).
pub async fn create_test_pool_for(url: &str) -> DbPool {
    connect(url, 5).await.expect("Failed to create test pool")
}
