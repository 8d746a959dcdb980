use std::process;

use clap::Parser;
use colored::Colorize;

use gitprof::{
    AppError, ProfileStore, Scope, StoreConfig,
    cli::{Cli, Commands},
    commands, logging, menu,
};

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let quiet: bool = cli.quiet;
    if let Err(err) = run(cli) {
        if !quiet {
            eprintln!("{} {}", "error:".red(), err);
        }
        process::exit(err.exit_code());
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = StoreConfig::default().with_quiet(cli.quiet);
    if let Some(path) = cli.config {
        config = config.with_config_path(path);
    }
    if let Some(program) = cli.git {
        config = config.with_git_program(program);
    }
    let store = ProfileStore::new(config);

    match cli.command {
        Some(Commands::Add { name, fields }) => commands::add_profile(&store, &name, fields),
        Some(Commands::Update { name, fields }) => commands::update_profile(&store, &name, fields),
        Some(Commands::Del { name }) => commands::delete_profile(&store, &name),
        Some(Commands::List { json }) => commands::list_profiles(&store, json),
        Some(Commands::Use { name, global }) => {
            commands::use_profile(&store, &name, Scope::from_global(global))
        }
        Some(Commands::Current { global }) => {
            commands::show_current(&store, Scope::from_global(global))
        }
        Some(Commands::Show { name, json }) => commands::show_profile(&store, name.as_deref(), json),
        None => menu::run_menu(&store),
    }
}
