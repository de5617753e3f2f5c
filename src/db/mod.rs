pub mod queries;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use rusqlite::Connection;

const MIGRATIONS_DIR: &str = "migrations";

pub fn init_db(path: &str) -> anyhow::Result<Connection> {
    let conn = Connection::open(path).context("failed to open database")?;

    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")
        .context("failed to set database pragmas")?;

    apply_migrations(&conn)?;

    Ok(conn)
}

/// Apply any `migrations/*.sql` files not yet recorded in `schema_history`,
/// in filename order.
fn apply_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_history (
            name TEXT PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );",
    )
    .context("failed to create schema_history table")?;

    let applied = applied_migrations(conn)?;

    for path in migration_files(Path::new(MIGRATIONS_DIR))? {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        if applied.contains(&name) {
            continue;
        }

        let sql = fs::read_to_string(&path)
            .with_context(|| format!("failed to read migration file: {name}"))?;

        conn.execute_batch(&sql)
            .with_context(|| format!("failed to apply migration: {name}"))?;

        conn.execute("INSERT INTO schema_history (name) VALUES (?1)", [&name])
            .with_context(|| format!("failed to record migration: {name}"))?;

        tracing::info!("applied migration: {name}");
    }

    Ok(())
}

fn applied_migrations(conn: &Connection) -> anyhow::Result<HashSet<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM schema_history")
        .context("failed to read schema_history")?;

    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut applied = HashSet::new();
    for row in rows {
        applied.insert(row?);
    }
    Ok(applied)
}

fn migration_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if !dir.exists() {
        tracing::warn!("migrations directory not found, skipping");
        return Ok(vec![]);
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .context("failed to read migrations directory")?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().map(|ext| ext == "sql").unwrap_or(false))
        .collect();

    files.sort();
    Ok(files)
}
