use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "qbank-bundler",
    version,
    about = "Exam question CSV to JSONL bundle build tooling"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Build(BuildArgs),
    Inventory(InventoryArgs),
}

#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    #[arg(long, default_value = "dist")]
    pub dist_dir: PathBuf,

    /// Overrides the date-derived content version stamped into the
    /// manifest and every bundle etag.
    #[arg(long, env = "CONTENT_VERSION")]
    pub content_version: Option<String>,
}

impl Default for BuildArgs {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            dist_dir: PathBuf::from("dist"),
            content_version: std::env::var("CONTENT_VERSION").ok(),
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct InventoryArgs {
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}
