use rusqlite::Connection;

use crate::db::{count_rows, get_connection, init_db};
use crate::error::{PaylogError, Result};
use crate::models::DEBIT;
use crate::settings::load_settings;

/// (id, name)
const AREAS: &[(&str, &str)] = &[
    ("area-north", "North Ward"),
    ("area-northgate", "Northgate"),
    ("area-south", "South Ward"),
    ("area-river", "Riverside"),
];

/// (id, name, area id, connection number, number)
const PERSONS: &[(&str, &str, &str, Option<&str>, Option<&str>)] = &[
    ("person-1001", "Jane Doe", "area-north", Some("1001"), None),
    ("person-1002", "John Smith", "area-north", Some("1002"), None),
    ("person-1003", "Bob", "area-north", None, None),
    ("person-2001", "Maria Garcia", "area-northgate", Some("2001"), None),
    ("person-2002", "Li Wei", "area-northgate", None, Some("N-17")),
    ("person-3001", "Ama Owusu", "area-south", Some("3001"), None),
    ("person-3002", "Tom Baker", "area-south", Some("3002"), None),
    ("person-4001", "Priya Nair", "area-river", Some("4001"), None),
];

const MONTHS: &[&str] = &["2024-01", "2024-02", "2024-03", "2024-04", "2024-05", "2024-06"];

/// Monthly debit amounts, rotated per person.
const DEBIT_AMOUNTS: &[f64] = &[100.5, 75.0, 82.25, 90.0, 64.75, 120.0];

/// Month that also gets a credit entry for every person.
const CREDIT_MONTH: &str = "2024-03";

pub(crate) fn insert_demo_data(conn: &mut Connection) -> Result<usize> {
    let tx = conn.transaction()?;
    for (id, name) in AREAS {
        tx.execute(
            "INSERT INTO areas (id, name) VALUES (?1, ?2)",
            rusqlite::params![id, name],
        )?;
    }

    let mut record_count = 0;
    for (p_idx, (id, name, area_id, connection_number, number)) in PERSONS.iter().enumerate() {
        tx.execute(
            "INSERT INTO persons (id, name, area_id, connection_number, number) VALUES (?1, ?2, ?3, ?4, ?5)",
            rusqlite::params![id, name, area_id, connection_number, number],
        )?;

        for (m_idx, month) in MONTHS.iter().enumerate() {
            let amount = DEBIT_AMOUNTS[(p_idx + m_idx) % DEBIT_AMOUNTS.len()];
            tx.execute(
                "INSERT INTO records (id, person_id, record_type, month, amount, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                rusqlite::params![
                    format!("{id}-{month}-debit"),
                    id,
                    DEBIT,
                    month,
                    amount,
                    format!("{month}-05T09:30:00Z"),
                ],
            )?;
            record_count += 1;
        }

        tx.execute(
            "INSERT INTO records (id, person_id, record_type, month, amount, created_at) \
             VALUES (?1, ?2, 'credit', ?3, ?4, NULL)",
            rusqlite::params![format!("{id}-{CREDIT_MONTH}-credit"), id, CREDIT_MONTH, 15.0],
        )?;
        record_count += 1;
    }
    tx.commit()?;
    Ok(record_count)
}

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = settings.db_path();

    if !db_path.exists() {
        return Err(PaylogError::Settings(
            "No database found. Run `paylog init` first.".to_string(),
        ));
    }

    let mut conn = get_connection(&db_path)?;
    init_db(&conn)?;

    // Idempotency guard
    if count_rows(&conn, "areas")? > 0 {
        println!("Database already has areas; demo data not loaded.");
        return Ok(());
    }

    let record_count = insert_demo_data(&mut conn)?;
    log::info!("demo data loaded: {record_count} records");

    println!("Demo data loaded!");
    println!("  {} areas, {} persons, {record_count} records", AREAS.len(), PERSONS.len());
    println!();
    println!("Try `paylog browse` or `paylog records 1001`.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;
    use crate::store::{PaymentStore, RecordSelector, SqliteStore};

    fn demo_db() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("demo.db");
        let mut conn = get_connection(&path).unwrap();
        init_db(&conn).unwrap();
        insert_demo_data(&mut conn).unwrap();
        (dir, path)
    }

    #[test]
    fn test_demo_counts() {
        let (_dir, path) = demo_db();
        let conn = get_connection(&path).unwrap();
        assert_eq!(count_rows(&conn, "areas").unwrap(), AREAS.len() as i64);
        assert_eq!(count_rows(&conn, "persons").unwrap(), PERSONS.len() as i64);
        assert_eq!(
            count_rows(&conn, "records").unwrap(),
            (PERSONS.len() * (MONTHS.len() + 1)) as i64
        );
    }

    #[test]
    fn test_demo_first_person_debits() {
        let (_dir, path) = demo_db();
        let store = SqliteStore::connect(&path).unwrap();
        let records: Vec<Record> = store
            .find_records(&RecordSelector { record_type: DEBIT, person_id: "person-1001" })
            .unwrap();
        assert_eq!(records.len(), MONTHS.len());
        assert_eq!(records[0].month, "2024-01");
        assert_eq!(records[0].amount, 100.5);
        assert_eq!(records[1].amount, 75.0);
    }

    #[test]
    fn test_demo_insert_twice_fails_cleanly() {
        let (_dir, path) = demo_db();
        let mut conn = get_connection(&path).unwrap();
        assert!(insert_demo_data(&mut conn).is_err());
        assert_eq!(count_rows(&conn, "areas").unwrap(), AREAS.len() as i64);
    }
}
