use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "i18n-workflow",
    about = "Inspect and maintain missing-translation catalogs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Catalog file, overriding the configured path
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Summarize the catalog per locale
    Show(ShowArgs),
    /// Rewrite the catalog with sorted keys
    Normalize,
    /// Copy a locale's keys into other locales as empty placeholders
    Replicate(ReplicateArgs),
    /// Merge another catalog file in, keeping existing values
    Merge(MergeArgs),
}

#[derive(Args)]
pub struct ShowArgs {
    /// List every untranslated key
    #[arg(long)]
    pub keys: bool,
}

#[derive(Args)]
pub struct ReplicateArgs {
    /// Locale whose keys are copied (defaults to the configured locale)
    #[arg(long)]
    pub base: Option<String>,
    /// Target locales (defaults to the configured targets)
    #[arg(long = "to")]
    pub targets: Vec<String>,
}

#[derive(Args)]
pub struct MergeArgs {
    /// Catalog file whose keys are added
    pub incoming: PathBuf,
}
