use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::functions::FunctionFlags;
use rusqlite::Connection;

use crate::models::{fold_case, search_text};

/// Handle to the SQLite database. Directories and the reservation book borrow
/// it, so several isolated stores can live side by side (tests open one
/// in-memory store each).
pub struct Store {
    conn: Connection,
}

impl Store {
    /// Open (or create) the database file at `path`, creating parent folders
    /// and running the lazy migrations.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).context("failed to create data directory")?;
            }
        }

        let conn = Connection::open(path).context("failed to open SQLite database")?;
        tracing::info!(path = %path.display(), "opened customer store");
        Self::with_connection(conn)
    }

    /// Fresh database that lives only as long as the returned value.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("failed to open in-memory database")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let store = Self { conn };
        store.register_functions()?;
        store.ensure_schema()?;
        Ok(store)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    /// SQL side of name matching and ordering. SQLite's own `LOWER` and
    /// `LIKE` only fold ASCII, so queries call these instead:
    ///
    /// - `customer_search_text(first, last)` is [`Customer::search_text`] for a row.
    /// - `name_key(name)` is the case-folded name, or NULL when the name is NULL.
    ///
    /// [`Customer::search_text`]: crate::Customer::search_text
    fn register_functions(&self) -> Result<()> {
        let flags = FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC;

        self.conn
            .create_scalar_function("customer_search_text", 2, flags, |ctx| {
                let first: Option<String> = ctx.get(0)?;
                let last: Option<String> = ctx.get(1)?;
                Ok(search_text(first.as_deref(), last.as_deref()))
            })
            .context("failed to register customer_search_text")?;

        self.conn
            .create_scalar_function("name_key", 1, flags, |ctx| {
                let name: Option<String> = ctx.get(0)?;
                Ok(name.as_deref().map(fold_case))
            })
            .context("failed to register name_key")?;

        Ok(())
    }

    /// Turn on foreign keys and create the tables if they are missing.
    fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute("PRAGMA foreign_keys = ON", [])
            .context("failed to enable foreign keys")?;

        // Name columns are nullable: older rows may miss one component.
        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS customers (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    first_name TEXT,
                    last_name TEXT,
                    phone TEXT,
                    notes TEXT
                )",
                [],
            )
            .context("failed to create customers table")?;

        self.conn
            .execute(
                "CREATE TABLE IF NOT EXISTS reservations (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    customer_id INTEGER NOT NULL,
                    start_at TEXT NOT NULL,
                    num_guests INTEGER NOT NULL CHECK (num_guests > 0),
                    notes TEXT,
                    FOREIGN KEY(customer_id) REFERENCES customers(id)
                )",
                [],
            )
            .context("failed to create reservations table")?;

        self.conn
            .execute(
                "CREATE INDEX IF NOT EXISTS reservations_customer_id_idx
                 ON reservations (customer_id)",
                [],
            )
            .context("failed to create reservations index")?;

        tracing::debug!("customer store schema is up to date");
        Ok(())
    }
}
