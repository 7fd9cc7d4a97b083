pub mod browse;
pub mod demo;
pub mod init;
pub mod list;
pub mod load;
pub mod records;
pub mod status;

use clap::{Parser, Subcommand};

use crate::error::{PaylogError, Result};
use crate::report_menu::ReportMenu;
use crate::settings::Settings;
use crate::store::SqliteStore;

/// Open the configured store for a plain CLI command. Unlike the
/// interactive screen, text commands fail loudly when there is no database.
pub(crate) fn open_store(settings: &Settings) -> Result<SqliteStore> {
    SqliteStore::connect(&settings.db_path()).map_err(|e| match e {
        PaylogError::Unavailable(msg) => {
            PaylogError::Unavailable(format!("{msg}\nRun `paylog init` to create one."))
        }
        other => other,
    })
}

/// Build a report menu over the configured store, initialized and ready.
/// A missing database leaves the menu empty, as on the report screen.
pub(crate) fn ready_menu(settings: &Settings) -> ReportMenu<SqliteStore> {
    let mut menu = ReportMenu::new();
    menu.initialize(|| SqliteStore::connect(&settings.db_path()));
    menu
}

/// Build a report menu over a store the caller already opened.
pub(crate) fn menu_over(store: SqliteStore) -> ReportMenu<SqliteStore> {
    let mut menu = ReportMenu::new();
    menu.initialize(|| Ok(store));
    menu
}

#[derive(Parser)]
#[command(name = "paylog", about = "Read-only payment history lookup by area and person.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Set up paylog: choose a data directory and initialize the database.
    Init {
        /// Path for paylog data (default: ~/Documents/paylog)
        #[arg(long = "data-dir")]
        data_dir: Option<String>,
    },
    /// Switch to an existing paylog data directory.
    Load {
        /// Path to data directory containing paylog.db
        path: String,
    },
    /// Show current database and summary statistics.
    Status,
    /// Load sample areas, persons and payment records.
    Demo,
    /// Open the interactive report screen (default command).
    Browse {
        /// Preselect an area by name
        #[arg(long)]
        area: Option<String>,
    },
    /// List all areas.
    Areas,
    /// List persons of an area, or search persons across all areas.
    Persons {
        /// Area name
        #[arg(long, conflicts_with = "search", required_unless_present = "search")]
        area: Option<String>,
        /// Free-text search on name, connection number or number
        #[arg(long)]
        search: Option<String>,
    },
    /// Print the debit records of the first person matching QUERY.
    Records {
        /// Connection number or name prefix (free text when no area is given)
        query: String,
        /// Restrict the lookup to an area
        #[arg(long)]
        area: Option<String>,
    },
}
