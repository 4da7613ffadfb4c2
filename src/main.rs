//! Layer Stack CLI
//!
//! Command-line interface for building and checking stack files.

use clap::Parser;
use env_logger::Env;
use log::{debug, error};

use layer_stack::cli::{commands, Cli, Commands};
use layer_stack::Result;

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(default_filter)).init();

    debug!("Layer Stack v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Layer Stack v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("{} ({})", e, e.error_code());
        if let Some(suggestion) = e.recovery_suggestion() {
            eprintln!("{}", suggestion);
        }
        std::process::exit(1);
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::New { path, input_size } => commands::create(&path, input_size),
        Commands::AddCoordinatewise {
            path,
            operation,
            values,
            inputs,
        } => commands::add_coordinatewise(&path, &operation, values, inputs),
        Commands::AddSum { path, inputs } => commands::add_sum(&path, inputs),
        Commands::Inspect { path } => commands::inspect(&path),
        Commands::Verify { path } => commands::verify(&path),
    }
}
