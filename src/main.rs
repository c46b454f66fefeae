//! CLI entry point for folio

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use folio::commands::new::NewPostOptions;
use folio::{Site, ValidationMode};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version)]
#[command(about = "Static blog generator for a portfolio site", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate post pages, the blog index and the homepage preview
    #[command(visible_alias = "generate", alias = "g")]
    Build {
        /// How to treat malformed front-matter and filenames
        #[arg(long, value_enum)]
        validation: Option<ValidationMode>,

        /// Update the homepage after building
        #[arg(short, long)]
        inject: bool,

        /// Watch posts and the template for changes
        #[arg(short, long)]
        watch: bool,
    },

    /// Splice the preview into the homepage
    Inject,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// Category of the post
        #[arg(long)]
        category: Option<String>,

        /// Short description shown on cards
        #[arg(long)]
        description: Option<String>,

        /// Publication date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date)]
        date: Option<NaiveDate>,
    },

    /// List posts
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Remove generated pages, the blog index and the preview
    Clean,

    /// Display version information
    Version,
}

fn parse_date(s: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "folio=debug,info"
    } else {
        "folio=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine current directory")?,
    };

    match cli.command {
        Commands::Build {
            validation,
            inject,
            watch,
        } => {
            let mut site = Site::new(&base_dir)?;
            if let Some(mode) = validation {
                site.config.validation = mode;
            }

            site.build()?;
            if inject {
                site.inject()?;
            }

            if watch {
                folio::commands::build::watch(&site, inject)?;
            }
        }

        Commands::Inject => {
            let site = Site::new(&base_dir)?;
            site.inject()?;
        }

        Commands::New {
            title,
            category,
            description,
            date,
        } => {
            let site = Site::new(&base_dir)?;
            let options = NewPostOptions {
                description,
                category,
                date,
            };
            let path = site.new_post(&title, &options)?;
            println!("{}", path.display());
        }

        Commands::List { json } => {
            let site = Site::new(&base_dir)?;
            folio::commands::list::run(&site, json)?;
        }

        Commands::Clean => {
            let site = Site::new(&base_dir)?;
            tracing::info!("Cleaning generated files...");
            site.clean()?;
        }

        Commands::Version => {
            println!("folio version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
