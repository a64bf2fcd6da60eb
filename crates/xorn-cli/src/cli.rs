use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};

#[derive(Parser)]
#[command(
    name = "xorn",
    about = "xorn: revisioned storage for schematic objects",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format; overrides the config file
    #[arg(long, global = true)]
    pub format: Option<OutputFormat>,

    /// Config file (defaults to ./xorn.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Validate and normalize an object payload given as JSON
    Validate(ValidateArgs),
    /// Run a scripted editing session and show each revision
    Demo(DemoArgs),
    /// Show the effective configuration
    Config(ConfigArgs),
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Object type: arc, box, circle, component, line, net, path, picture, text
    pub object_type: String,
    /// JSON file holding the payload fields; reads stdin when omitted
    pub input: Option<PathBuf>,
}

#[derive(Args)]
pub struct DemoArgs {
    /// Print object identities in full instead of their short form
    #[arg(long)]
    pub full_ids: bool,
}

#[derive(Args)]
pub struct ConfigArgs {}
