use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::model::interference::InterferencePolicy;

#[derive(Debug, Parser)]
#[command(
    name = "comprendre-scoring",
    version,
    about = "Normative scoring for the COMPRENDRE battery"
)]
pub struct Cli {
    #[arg(long, global = true, default_value = "info", help = "Log level when RUST_LOG is unset")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a score sheet and write the report bundle.
    Run(RunArgs),
    /// Enter scores interactively, then score them.
    Prompt(PromptArgs),
    /// Check reference tables against the task catalog.
    Validate(ValidateArgs),
    /// Print the task catalog and a blank score sheet.
    Catalog,
}

#[derive(Debug, Args)]
pub struct SessionArgs {
    #[arg(long, help = "Directory of reference tables (<age group>.tsv[.gz])")]
    pub norms: PathBuf,

    #[arg(long, help = "Age group label, e.g. \"6-7 ans\"")]
    pub age_group: String,

    #[arg(long)]
    pub child_id: String,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(
        long,
        default_value_t = false,
        help = "Derive interference only when both congruent and incongruent values are entered"
    )]
    pub strict_interference: bool,

    #[arg(
        long,
        value_delimiter = ',',
        help = "Tasks to plot (comma separated); default is every scored task"
    )]
    pub tasks: Option<Vec<String>>,
}

impl SessionArgs {
    pub fn policy(&self) -> InterferencePolicy {
        if self.strict_interference {
            InterferencePolicy::RequireBoth
        } else {
            InterferencePolicy::MissingAsZero
        }
    }
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub session: SessionArgs,

    #[arg(long, help = "Score sheet: task<TAB>value per line")]
    pub scores: PathBuf,
}

#[derive(Debug, Args)]
pub struct PromptArgs {
    #[command(flatten)]
    pub session: SessionArgs,
}

#[derive(Debug, Args)]
pub struct ValidateArgs {
    #[arg(long)]
    pub norms: PathBuf,

    #[arg(long, help = "Only check this age group")]
    pub age_group: Option<String>,
}
