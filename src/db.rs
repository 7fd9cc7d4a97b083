use std::path::Path;

use rusqlite::{Connection, OpenFlags};

use crate::error::Result;

pub const DB_FILE: &str = "paylog.db";

pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS areas (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS persons (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL DEFAULT '',
    area_id TEXT NOT NULL,
    connection_number TEXT,
    number TEXT,
    FOREIGN KEY (area_id) REFERENCES areas(id)
);

CREATE TABLE IF NOT EXISTS records (
    id TEXT PRIMARY KEY,
    person_id TEXT NOT NULL,
    record_type TEXT NOT NULL,
    month TEXT NOT NULL,
    amount REAL NOT NULL,
    created_at TEXT,
    FOREIGN KEY (person_id) REFERENCES persons(id)
);

CREATE INDEX IF NOT EXISTS idx_persons_area_id ON persons(area_id);
";

pub fn get_connection(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open(db_path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

/// Open an existing database for lookups. Leaves the journal mode and
/// schema alone; only `init_db` creates tables.
pub fn open_existing(db_path: &Path) -> Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(conn)
}

pub fn init_db(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    Ok(())
}

pub fn count_rows(conn: &Connection, table: &str) -> Result<i64> {
    let count = conn.query_row(&format!("SELECT count(*) FROM {table}"), [], |r| r.get(0))?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, Connection) {
        let dir = tempfile::tempdir().unwrap();
        let conn = get_connection(&dir.path().join("test.db")).unwrap();
        init_db(&conn).unwrap();
        (dir, conn)
    }

    #[test]
    fn test_init_db_creates_tables() {
        let (_dir, conn) = test_db();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%'")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();
        for expected in &["areas", "persons", "records"] {
            assert!(tables.contains(&expected.to_string()), "missing table: {expected}");
        }
    }

    #[test]
    fn test_init_db_is_idempotent() {
        let (_dir, conn) = test_db();
        init_db(&conn).unwrap();
    }

    #[test]
    fn test_foreign_keys_enforced() {
        let (_dir, conn) = test_db();
        let result = conn.execute(
            "INSERT INTO persons (id, name, area_id) VALUES ('p1', 'Orphan', 'missing')",
            [],
        );
        assert!(result.is_err(), "person with unknown area should be rejected");
    }

    #[test]
    fn test_count_rows() {
        let (_dir, conn) = test_db();
        conn.execute("INSERT INTO areas (id, name) VALUES ('a1', 'North')", []).unwrap();
        assert_eq!(count_rows(&conn, "areas").unwrap(), 1);
        assert_eq!(count_rows(&conn, "records").unwrap(), 0);
    }
}
