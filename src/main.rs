//! followsync CLI entry point.

use clap::Parser;
use followsync::api::Mutation;
use followsync::cli::commands;
use followsync::cli::{Cli, Commands};
use followsync::error::Error;
use std::process::ExitCode;

fn main() -> ExitCode {
    // A missing .env is normal; real environment variables always win.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    init_tracing(cli.verbose, cli.quiet);

    if cli.no_color {
        colored::control::set_override(false);
    }

    let json = cli.json_output(std::io::IsTerminal::is_terminal(&std::io::stdout()));

    match run(&cli, json) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug,reqwest=info,hyper=info,hyper_util=info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli, json: bool) -> Result<(), Error> {
    let overrides = cli.overrides();
    let config = cli.config.as_ref();

    match &cli.command {
        Commands::Sync {
            strict,
            dry_run,
            only,
        } => commands::sync::execute(
            *strict,
            *dry_run,
            only.map(Mutation::from),
            &overrides,
            config,
            json,
        ),
        Commands::Status => commands::status::execute(&overrides, config, json),
        Commands::List { kind } => commands::list::execute(*kind, &overrides, config, json),
        Commands::Follow { handle } => {
            commands::mutate::execute(Mutation::Follow, handle, &overrides, config, json)
        }
        Commands::Unfollow { handle } => {
            commands::mutate::execute(Mutation::Unfollow, handle, &overrides, config, json)
        }
        Commands::Checkpoint { command } => {
            commands::checkpoint::execute(command, &overrides, config, json)
        }
        Commands::Completions { shell } => commands::completions::execute(shell),
        Commands::Version => commands::version::execute(json),
    }
}
