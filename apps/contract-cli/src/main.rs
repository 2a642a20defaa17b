//! Contract catalog CLI
//!
//! Inspect templates and jurisdictions, check form values against a
//! template, and quote generation prices offline.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "contract-cli")]
#[command(version, about = "Contract template catalog and pricing tools")]
struct Args {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List contract templates
    Templates {
        /// Only templates offered in this jurisdiction (code or country name)
        #[arg(short, long)]
        jurisdiction: Option<String>,

        /// Only templates in this category (e.g. business, real-estate)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// List supported jurisdictions
    Jurisdictions,

    /// Check a JSON object of form values against a template
    Check {
        /// Template id
        template: String,

        /// Path to the values file, or "-" for stdin
        #[arg(long, default_value = "-")]
        values: PathBuf,
    },

    /// Quote the price of generating a template
    Quote {
        /// Template id
        template: String,

        /// Subscription plan (free, basic, ai-plus, team, unlimited)
        #[arg(long, default_value = "free")]
        plan: String,

        /// Generations already used this month
        #[arg(long, default_value = "0")]
        usage: u32,
    },

    /// Show workflow configuration resolved from the environment
    Config,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // stdout is reserved for command output
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = match args.command {
        Command::Templates {
            jurisdiction,
            category,
        } => commands::templates(jurisdiction.as_deref(), category.as_deref(), args.json)?,
        Command::Jurisdictions => commands::jurisdictions(args.json)?,
        Command::Check { template, values } => {
            let raw = commands::read_input(&values)?;
            let report = commands::check(&template, &raw)?;
            let rendered = commands::render_check(&report, args.json)?;
            if !report.submittable {
                println!("{}", rendered);
                std::process::exit(1);
            }
            rendered
        }
        Command::Quote {
            template,
            plan,
            usage,
        } => commands::quote(&template, &plan, usage, args.json)?,
        Command::Config => commands::config(args.json)?,
    };

    println!("{}", output);
    Ok(())
}
