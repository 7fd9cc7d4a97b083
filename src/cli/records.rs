use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use super::{menu_over, open_store};
use crate::error::Result;
use crate::fmt;
use crate::settings::load_settings;

/// Walk the report screen's flow without a terminal UI: optional area,
/// then the person box query, then the first suggestion.
pub fn run(query: &str, area: Option<&str>) -> Result<()> {
    let mut menu = menu_over(open_store(&load_settings())?);
    if let Some(name) = area {
        menu.select_area_by_name(name)?;
    }

    menu.set_connection_query(query);
    if menu.connection_suggestions.is_empty() {
        println!("No person matches '{query}'.");
        return Ok(());
    }
    menu.pick_person_suggestion(0);

    println!(
        "{} ({})",
        menu.selected_person_name.bold(),
        menu.connection_query
    );

    let rows = menu.record_rows();
    if rows.is_empty() {
        println!("{}", "No records for selected person".dimmed());
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Month", "Amount", "Recorded At"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.month),
            Cell::new(row.amount).set_alignment(CellAlignment::Right),
            Cell::new(row.recorded_at),
        ]);
    }
    println!("{table}");
    println!("Total: {}", fmt::amount(menu.total()).green());
    Ok(())
}
