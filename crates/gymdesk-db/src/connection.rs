use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Result;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteConnection},
    Connection as SqlConnection,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::schema;

/// A thread safe connection to a local membership database.
///
/// The database uses the same `users` table as the REST backend,
/// so a copy of the backend's file can be opened directly.
#[derive(Clone)]
pub struct Connection {
    conn: Arc<Mutex<SqliteConnection>>,
    _handle: Option<Arc<TestHandle>>,
}

impl Connection {
    /// Open a connection to the database
    pub async fn open(filename: &str) -> Result<Self> {
        log::debug!("opening membership database {}", filename);
        let opts = SqliteConnectOptions::from_str(filename)?;
        let conn = SqliteConnection::connect_with(&opts).await?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            _handle: None,
        })
    }

    /// Open the database, creating the file and the schema
    /// if they do not exist yet.
    pub async fn create(filename: &str) -> Result<Self> {
        let opts = SqliteConnectOptions::from_str(filename)?.create_if_missing(true);
        let conn = SqliteConnection::connect_with(&opts).await?;
        let conn = Self {
            conn: Arc::new(Mutex::new(conn)),
            _handle: None,
        };
        schema::install(&conn).await?;
        Ok(conn)
    }

    pub async fn lock(&self) -> MutexGuard<'_, SqliteConnection> {
        self.conn.lock().await
    }

    /// Open a new test database connection.
    /// The database will be created on each open and is removed
    /// once the last clone of the connection is dropped.
    pub async fn open_test() -> Result<Self> {
        let filename = format!("/tmp/gymdesk_test_{}.sqlite3", rand::random::<u64>());
        let handle = TestHandle {
            filename: filename.clone(),
        };
        let mut conn = Self::create(&filename).await?;
        conn._handle = Some(Arc::new(handle));
        Ok(conn)
    }
}

pub struct TestHandle {
    filename: String,
}

impl Drop for TestHandle {
    fn drop(&mut self) {
        let path = Path::new(&self.filename);
        if path.exists() {
            let _ = fs::remove_file(path);
        }
    }
}
