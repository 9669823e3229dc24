//! CLI Adapter.

mod check;
mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::app::api::{self, InitOptions, RenderOptions, RenderOutcome};
use crate::app::commands::init::{DEFAULT_OUTPUT, DEFAULT_TEMPLATE};
use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "glee-config")]
#[command(version)]
#[command(
    about = "Validate GLEE lens models and render them to GLEE configuration files",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a model file to a GLEE configuration document
    #[clap(visible_alias = "r")]
    Render {
        /// TOML model file
        model: PathBuf,
        /// Write the document here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing output file
        #[arg(short, long)]
        force: bool,
    },
    /// Validate a model file
    #[clap(visible_alias = "c")]
    Check {
        /// TOML model file
        model: PathBuf,
        /// Print the validated model as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write a starter model file
    #[clap(visible_alias = "i")]
    Init {
        /// Starter template name (see `templates`)
        #[arg(short, long, default_value = DEFAULT_TEMPLATE)]
        template: String,
        /// Destination of the model file
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
    /// List embedded starter templates
    #[clap(visible_alias = "t")]
    Templates,
}

/// Entry point for the CLI.
pub fn run() {
    logging::init();
    let cli = Cli::parse();

    let result: Result<(), AppError> = match cli.command {
        Commands::Render { model, output, force } => {
            run_render(&RenderOptions { model, output, force })
        }
        Commands::Check { model, json } => check::run_check(model, json),
        Commands::Init { template, output, force } => {
            run_init(&InitOptions { template, output, force })
        }
        Commands::Templates => run_templates(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_render(options: &RenderOptions) -> Result<(), AppError> {
    match api::render(options)? {
        RenderOutcome::Printed(document) => print!("{document}"),
        RenderOutcome::Written { path, sources, light_profiles } => {
            println!(
                "✅ Wrote {} ({} source(s), {} light profile(s))",
                path.display(),
                sources,
                light_profiles
            );
        }
    }
    Ok(())
}

fn run_init(options: &InitOptions) -> Result<(), AppError> {
    let outcome = api::init(options)?;
    println!("✅ Created {} from template '{}'", outcome.path.display(), outcome.template);
    Ok(())
}

fn run_templates() -> Result<(), AppError> {
    let templates = api::templates()?;
    let width = templates.iter().map(|t| t.name.len()).max().unwrap_or(0);
    for template in templates {
        println!("{:<width$}  {}", template.name, template.summary);
    }
    Ok(())
}
