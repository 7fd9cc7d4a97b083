use std::path::Path;

use rusqlite::{Connection, Row};

use crate::db::open_existing;
use crate::error::{PaylogError, Result};
use crate::models::{Area, Person, Record};

/// Upper bound on rows returned by the free-text person search.
const SEARCH_LIMIT: usize = 50;

/// Document fields that can be indexed, with their backing column.
const INDEXABLE_FIELDS: &[(&str, &str)] = &[
    ("type", "record_type"),
    ("personId", "person_id"),
    ("month", "month"),
    ("createdAt", "created_at"),
];

/// Equality selector for a record query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordSelector<'a> {
    pub record_type: &'a str,
    pub person_id: &'a str,
}

/// Read access to areas, persons and payment records.
pub trait PaymentStore {
    fn get_areas(&self) -> Result<Vec<Area>>;

    fn get_persons_by_area(&self, area_id: &str) -> Result<Vec<Person>>;

    /// Free-text person search across all areas. `None` means the store
    /// has no search capability.
    fn search_persons(&self, _query: &str) -> Option<Result<Vec<Person>>> {
        None
    }

    /// Create an index over the given document fields if it does not exist.
    fn ensure_index(&self, fields: &[&str]) -> Result<()>;

    fn find_records(&self, selector: &RecordSelector) -> Result<Vec<Record>>;
}

// ---------------------------------------------------------------------------
// SQLite adapter
// ---------------------------------------------------------------------------

pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database. A missing file is reported as unavailable
    /// rather than silently creating an empty store.
    pub fn connect(db_path: &Path) -> Result<Self> {
        if !db_path.exists() {
            return Err(PaylogError::Unavailable(format!(
                "no database at {}",
                db_path.display()
            )));
        }
        let conn = open_existing(db_path)?;
        log::debug!("connected to {}", db_path.display());
        Ok(Self { conn })
    }

    #[cfg(test)]
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

fn person_from_row(row: &Row) -> rusqlite::Result<Person> {
    Ok(Person {
        id: row.get(0)?,
        name: row.get(1)?,
        area_id: row.get(2)?,
        connection_number: row.get(3)?,
        number: row.get(4)?,
    })
}

/// Substring match on name, connection number or number. `needle` is
/// already lowercased.
fn person_contains(person: &Person, needle: &str) -> bool {
    [
        Some(person.name.as_str()),
        person.connection_number.as_deref(),
        person.number.as_deref(),
    ]
    .into_iter()
    .flatten()
    .any(|field| field.to_lowercase().contains(needle))
}

fn column_for(field: &str) -> Result<&'static str> {
    INDEXABLE_FIELDS
        .iter()
        .find(|(f, _)| *f == field)
        .map(|(_, col)| *col)
        .ok_or_else(|| PaylogError::UnknownField(field.to_string()))
}

impl PaymentStore for SqliteStore {
    fn get_areas(&self) -> Result<Vec<Area>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM areas ORDER BY name COLLATE NOCASE, id")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Area {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn get_persons_by_area(&self, area_id: &str) -> Result<Vec<Person>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, area_id, connection_number, number FROM persons \
             WHERE area_id = ?1 ORDER BY name COLLATE NOCASE, id",
        )?;
        let rows = stmt
            .query_map([area_id], person_from_row)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn search_persons(&self, query: &str) -> Option<Result<Vec<Person>>> {
        // SQLite's lower() only folds ASCII; match in Rust with the same
        // folding the area-scoped suggestions use.
        let needle = query.to_lowercase();
        let run = || -> Result<Vec<Person>> {
            let mut stmt = self.conn.prepare(
                "SELECT id, name, area_id, connection_number, number FROM persons \
                 ORDER BY name COLLATE NOCASE, id",
            )?;
            let mut found = Vec::new();
            for person in stmt.query_map([], person_from_row)? {
                let person = person?;
                if person_contains(&person, &needle) {
                    found.push(person);
                    if found.len() == SEARCH_LIMIT {
                        break;
                    }
                }
            }
            Ok(found)
        };
        Some(run())
    }

    fn ensure_index(&self, fields: &[&str]) -> Result<()> {
        if fields.is_empty() {
            return Err(PaylogError::Other("an index needs at least one field".into()));
        }
        let columns = fields
            .iter()
            .map(|f| column_for(f))
            .collect::<Result<Vec<_>>>()?;
        let sql = format!(
            "CREATE INDEX IF NOT EXISTS idx_records_{} ON records({})",
            columns.join("_"),
            columns.join(", ")
        );
        self.conn.execute_batch(&sql)?;
        Ok(())
    }

    fn find_records(&self, selector: &RecordSelector) -> Result<Vec<Record>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, person_id, record_type, month, amount, created_at FROM records \
             WHERE record_type = ?1 AND person_id = ?2 ORDER BY month, id",
        )?;
        let rows = stmt
            .query_map([selector.record_type, selector.person_id], |row| {
                Ok(Record {
                    id: row.get(0)?,
                    person_id: row.get(1)?,
                    record_type: row.get(2)?,
                    month: row.get(3)?,
                    amount: row.get(4)?,
                    created_at: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// In-memory test double
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod memory {
    use std::cell::RefCell;

    use super::*;

    /// Scriptable store. `search_results: None` models a store without
    /// the search capability; `Some(list)` returns `list` for any query.
    #[derive(Default)]
    pub struct MemoryStore {
        pub areas: Vec<Area>,
        pub persons: Vec<Person>,
        pub records: Vec<Record>,
        pub search_results: Option<Vec<Person>>,
        pub fail_areas: bool,
        pub fail_persons: bool,
        pub fail_records: bool,
        pub fail_search: bool,
        pub indexes: RefCell<Vec<Vec<String>>>,
        pub calls: RefCell<Vec<String>>,
    }

    fn failure(what: &str) -> PaylogError {
        PaylogError::Other(format!("{what} failed"))
    }

    impl PaymentStore for MemoryStore {
        fn get_areas(&self) -> Result<Vec<Area>> {
            self.calls.borrow_mut().push("get_areas".into());
            if self.fail_areas {
                return Err(failure("get_areas"));
            }
            Ok(self.areas.clone())
        }

        fn get_persons_by_area(&self, area_id: &str) -> Result<Vec<Person>> {
            self.calls.borrow_mut().push(format!("get_persons_by_area:{area_id}"));
            if self.fail_persons {
                return Err(failure("get_persons_by_area"));
            }
            Ok(self
                .persons
                .iter()
                .filter(|p| p.area_id == area_id)
                .cloned()
                .collect())
        }

        fn search_persons(&self, query: &str) -> Option<Result<Vec<Person>>> {
            let results = self.search_results.as_ref()?;
            self.calls.borrow_mut().push(format!("search_persons:{query}"));
            if self.fail_search {
                return Some(Err(failure("search_persons")));
            }
            Some(Ok(results.clone()))
        }

        fn ensure_index(&self, fields: &[&str]) -> Result<()> {
            let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();
            let mut indexes = self.indexes.borrow_mut();
            if !indexes.contains(&fields) {
                indexes.push(fields);
            }
            Ok(())
        }

        fn find_records(&self, selector: &RecordSelector) -> Result<Vec<Record>> {
            self.calls
                .borrow_mut()
                .push(format!("find_records:{}", selector.person_id));
            if self.fail_records {
                return Err(failure("find_records"));
            }
            Ok(self
                .records
                .iter()
                .filter(|r| r.record_type == selector.record_type && r.person_id == selector.person_id)
                .cloned()
                .collect())
        }
    }
}
