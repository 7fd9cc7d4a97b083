use crate::db::{count_rows, get_connection};
use crate::error::Result;
use crate::fmt::format_bytes;
use crate::models::DEBIT;
use crate::settings::load_settings;

pub fn run() -> Result<()> {
    let settings = load_settings();
    let db_path = settings.db_path();

    println!("Data dir:   {}", settings.data_dir);
    println!("Database:   {}", db_path.display());
    println!("Log file:   {}", settings.log_path().display());

    if db_path.exists() {
        let size = std::fs::metadata(&db_path)?.len();
        println!("DB size:    {}", format_bytes(size));

        let conn = get_connection(&db_path)?;
        let debits: i64 = conn.query_row(
            "SELECT count(*) FROM records WHERE record_type = ?1",
            [DEBIT],
            |r| r.get(0),
        )?;

        println!();
        println!("Areas:      {}", count_rows(&conn, "areas")?);
        println!("Persons:    {}", count_rows(&conn, "persons")?);
        println!("Records:    {}", count_rows(&conn, "records")?);
        println!("Debits:     {debits}");
    } else {
        println!();
        println!("Database not found. Run `paylog init` to set up.");
    }

    Ok(())
}
