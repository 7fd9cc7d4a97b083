mod cli;
mod db;
mod error;
mod fmt;
mod logging;
mod models;
mod report_menu;
mod report_view;
mod settings;
mod store;
mod tui;

use clap::Parser;

use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    let interactive = matches!(cli.command, None | Some(Commands::Browse { .. }));
    logging::init(&settings::load_settings(), interactive);

    let result = match cli.command {
        None => cli::browse::run(None),
        Some(command) => match command {
            Commands::Init { data_dir } => cli::init::run(data_dir),
            Commands::Load { path } => cli::load::run(&path),
            Commands::Status => cli::status::run(),
            Commands::Demo => cli::demo::run(),
            Commands::Browse { area } => cli::browse::run(area),
            Commands::Areas => cli::list::areas(),
            Commands::Persons { area, search } => {
                cli::list::persons(area.as_deref(), search.as_deref())
            }
            Commands::Records { query, area } => cli::records::run(&query, area.as_deref()),
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
