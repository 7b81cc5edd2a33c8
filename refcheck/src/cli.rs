// refcheck/src/cli.rs
//
// Single source of truth for all CLI definitions (Clap structs).

use clap::{Parser, Subcommand};
use refcheck_core::domain::verification::ValidationMode;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "refcheck")]
#[command(about = "Foreign-key integrity verifier for sharded reference data")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 🔗 Verifies every foreign key of a dataset against the reference shards
    Verify {
        /// Table model (YAML or JSON) declaring `fk` metadata
        #[arg(long, short)]
        model: PathBuf,

        /// Dataset to verify (JSON: { "Version": n, "Data": [...] })
        #[arg(long, short)]
        data: PathBuf,

        /// Project directory holding refcheck.yaml
        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Reference directory (overrides refcheck.yaml). A relative path given
        /// here or through the env var is relative to the current directory;
        /// only the one from refcheck.yaml is resolved against --project-dir.
        #[arg(long, env = "REFCHECK_REFERENCE_DIR")]
        reference_dir: Option<PathBuf>,

        /// fail-fast | accumulate
        #[arg(long)]
        mode: Option<ValidationMode>,

        /// Write the JSON report to this file
        #[arg(long, short)]
        output: Option<PathBuf>,

        /// Print the JSON report on stdout instead of a table
        #[arg(long, default_value = "false")]
        json: bool,
    },

    /// 📋 Lists the foreign keys declared by a table model
    Constraints {
        #[arg(long, short)]
        model: PathBuf,
    },

    /// 🗂️  Builds the reference index and prints value counts per table/field
    Index {
        #[arg(long, short)]
        model: PathBuf,

        #[arg(long, default_value = ".")]
        project_dir: PathBuf,

        /// Same as for `verify`: relative to the current directory
        #[arg(long, env = "REFCHECK_REFERENCE_DIR")]
        reference_dir: Option<PathBuf>,
    },
}
