//! compform CLI - component registration form with a guided autofill demo
//!
//! - `form`: interactive terminal form (default)
//! - `autofill`: play the guided autofill on the console and print the result
//! - `presets` / `fields`: list the fixed option sets
//! - `config`: inspect the effective configuration

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use compform_core::{CompformConfig, Field, FieldKind, TourTimings, BUILD_PRESETS};
use tracing::debug;

mod headless;
mod tracing_setup;
mod tui;

#[derive(Parser, Debug)]
#[command(
    name = "compform",
    author,
    version,
    about = "Register a component against a repository, with a guided autofill demo"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Config file (default: ~/.compform/config.toml)
    #[arg(long, global = true, env = "COMPFORM_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Open the interactive component form
    Form(FormArgs),
    /// Play the guided autofill without a terminal UI and print the submission
    Autofill(AutofillArgs),
    /// List build presets
    Presets,
    /// List form fields and their choices
    Fields,
    /// Inspect configuration
    Config(ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug, Default)]
struct FormArgs {
    /// Start the guided autofill as soon as the form opens
    #[arg(long)]
    autofill: bool,

    /// Skip all tour delays
    #[arg(long)]
    instant: bool,
}

#[derive(Parser, Debug)]
struct AutofillArgs {
    /// Skip all tour delays
    #[arg(long)]
    instant: bool,
}

#[derive(Parser, Debug)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file path in use
    Path,
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: clap_complete::Shell,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CompformConfig::load(cli.config.as_deref())
        .context("Failed to load compform configuration")?;

    let command = cli.command.unwrap_or(Commands::Form(FormArgs::default()));

    // The form owns the terminal, so its logs go to a file
    let log_file = match command {
        Commands::Form(_) => Some(
            config
                .logging
                .file
                .clone()
                .unwrap_or_else(CompformConfig::default_log_path),
        ),
        _ => None,
    };
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        level: config.logging.level.clone(),
        log_file,
    })?;
    debug!(?config, "configuration loaded");

    match command {
        Commands::Form(args) => {
            let timings = pick_timings(&config, args.instant);
            tui::run(timings, args.autofill)
        }
        Commands::Autofill(args) => {
            let timings = pick_timings(&config, args.instant);
            headless::run(timings).await
        }
        Commands::Presets => {
            for preset in BUILD_PRESETS {
                println!("{preset}");
            }
            Ok(())
        }
        Commands::Fields => {
            print_fields();
            Ok(())
        }
        Commands::Config(args) => match args.command {
            ConfigCommand::Show => {
                print!("{}", config.to_toml()?);
                Ok(())
            }
            ConfigCommand::Path => {
                println!("{}", CompformConfig::resolve_path(cli.config.as_deref()).display());
                Ok(())
            }
        },
        Commands::Completions(args) => {
            clap_complete::generate(args.shell, &mut Cli::command(), "compform", &mut io::stdout());
            Ok(())
        }
    }
}

fn pick_timings(config: &CompformConfig, instant: bool) -> TourTimings {
    if instant {
        TourTimings::instant()
    } else {
        config.tour
    }
}

fn print_fields() {
    for field in Field::ALL {
        match field.kind() {
            FieldKind::Choice { options, .. } => {
                println!("{:<13} {:<20} {}", field.key(), field.label(), options.join(", "));
            }
            FieldKind::Text { .. } => {
                let default = if field == Field::Directory { "default \"/\"" } else { "free text" };
                println!("{:<13} {:<20} {}", field.key(), field.label(), default);
            }
        }
    }
}
