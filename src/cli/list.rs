use comfy_table::{Cell, Table};

use super::{menu_over, open_store};
use crate::error::{PaylogError, Result};
use crate::models::Person;
use crate::settings::load_settings;
use crate::store::PaymentStore;

pub fn areas() -> Result<()> {
    let store = open_store(&load_settings())?;
    let areas = store.get_areas()?;

    let mut table = Table::new();
    table.set_header(vec!["ID", "Name"]);
    for area in areas {
        table.add_row(vec![Cell::new(area.id), Cell::new(area.name)]);
    }
    println!("Areas\n{table}");
    Ok(())
}

pub fn persons(area: Option<&str>, search: Option<&str>) -> Result<()> {
    let settings = load_settings();
    let (title, persons) = match (area, search) {
        (Some(name), _) => {
            // Resolve the name through the report menu so lookups match the screen.
            let mut menu = menu_over(open_store(&settings)?);
            menu.select_area_by_name(name)?;
            (format!("Persons in {}", menu.area_query), menu.persons_in_area)
        }
        (None, Some(query)) => {
            let store = open_store(&settings)?;
            let found = store
                .search_persons(query)
                .unwrap_or_else(|| Err(PaylogError::Other("store has no person search".into())))?;
            (format!("Persons matching '{query}'"), found)
        }
        (None, None) => {
            return Err(PaylogError::Other("pass --area or --search".into()));
        }
    };

    println!("{title}\n{}", persons_table(&persons));
    Ok(())
}

fn persons_table(persons: &[Person]) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["ID", "Connection", "Name", "Area"]);
    for p in persons {
        table.add_row(vec![
            Cell::new(&p.id),
            Cell::new(p.connection_label()),
            Cell::new(&p.name),
            Cell::new(&p.area_id),
        ]);
    }
    table
}
