pub mod cli;
pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::domain::model::ChartKind;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "paste-chart")]
#[command(about = "Turn CSV or JSON data into a standalone interactive chart page")]
pub struct CliConfig {
    /// Data file to read; stdin when omitted
    #[arg(short, long)]
    pub input: Option<String>,

    #[arg(short = 't', long, value_enum)]
    pub chart_type: Option<ChartKind>,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(short, long)]
    pub output_path: Option<String>,

    #[arg(long)]
    pub filename: Option<String>,

    /// Chart.js script URL embedded in the page
    #[arg(long)]
    pub library_url: Option<String>,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Print the document to stdout instead of writing a file
    #[arg(long)]
    pub stdout: bool,

    /// Also copy the document to the system clipboard
    #[arg(long)]
    pub copy: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}
