use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use tracing::{debug, error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod connection;
mod error;
mod output;
mod prompt;

use cli::{Cli, Commands};
use connection::CommandContext;
use error::CliError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli).await {
        e.print_diagnostic();
        std::process::exit(1);
    }

    Ok(())
}

async fn run(cli: &Cli) -> Result<(), CliError> {
    let ctx = CommandContext::new(cli.settings_file.as_deref(), cli.output)?;
    debug!("Settings file: {}", ctx.settings_path.display());
    execute_command(cli, &ctx).await
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "tursoctl=warn,tursoctl_core=warn",
            1 => "tursoctl=info,tursoctl_core=info",
            2 => "tursoctl=debug,tursoctl_core=debug",
            _ => "tursoctl=trace,tursoctl_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, ctx: &CommandContext) -> Result<(), CliError> {
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Version => {
            if ctx.output.is_structured() {
                let data = serde_json::json!({
                    "version": env!("CARGO_PKG_VERSION"),
                    "name": env!("CARGO_PKG_NAME"),
                });
                output::print_output(&data, ctx.output)
            } else {
                println!("tursoctl {}", env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
        Commands::Completions { shell } => {
            debug!("Generating completions for {:?}", shell);
            generate_completions(*shell);
            Ok(())
        }
        Commands::Auth(auth_cmd) => commands::auth::handle_auth_command(auth_cmd, ctx).await,
        Commands::Db(db_cmd) => commands::db::handle_db_command(db_cmd, ctx).await,
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without sensitive data)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Version => "version".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
        Commands::Auth(cmd) => {
            use cli::AuthCommands::*;
            match cmd {
                SetToken { .. } => "auth set-token [token redacted]".to_string(),
                ShowToken => "auth show-token".to_string(),
                Logout => "auth logout".to_string(),
            }
        }
        Commands::Db(cmd) => {
            use cli::{CredentialsCommands, DbCommands::*};
            match cmd {
                List => "db list".to_string(),
                Show { name, .. } => format!("db show {}", name),
                Locations => "db locations".to_string(),
                Destroy {
                    name,
                    location,
                    instance,
                    ..
                } => format!(
                    "db destroy {} (location: {:?}, instance: {:?})",
                    name, location, instance
                ),
                Credentials(CredentialsCommands::Set { name, .. }) => {
                    format!("db credentials set {} [credentials redacted]", name)
                }
                Credentials(CredentialsCommands::Remove { name }) => {
                    format!("db credentials remove {}", name)
                }
            }
        }
    }
}
