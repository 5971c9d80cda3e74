// Copyright (c) 2025 Varshith Gudur. Licensed under AGPLv3.
use clap::{Parser, Subcommand};
use lms_cli::commands::{init, inspect, list, verify};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lms")]
#[command(about = "LMS document tool - seed, inspect and check the flat-file store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the demo document.
    Init {
        #[arg(long, default_value = "data/db.json")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the sections of a document file
    Inspect {
        #[arg(long, default_value = "data/db.json")]
        path: PathBuf,
    },
    /// Print the records of one collection as JSON
    List {
        collection: String,

        #[arg(long, default_value = "data/db.json")]
        path: PathBuf,

        /// Equality filter, `field=value`. May be repeated.
        #[arg(long, short)]
        filter: Vec<String>,
    },
    /// Check that the document parses and ids are unique per collection
    Verify {
        #[arg(long, default_value = "data/db.json")]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init { path, force } => init::run(&path, force),
        Commands::Inspect { path } => inspect::run(&path),
        Commands::List {
            collection,
            path,
            filter,
        } => list::run(&path, &collection, &filter),
        Commands::Verify { path } => verify::run(&path),
    }
}
