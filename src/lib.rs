pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::clipboard::{ArboardClipboard, ClipboardBackend, CommandClipboard};
pub use config::{cli::LocalStorage, settings::ChartSettings, toml_config::TomlConfig};
pub use core::engine::{ChartEngine, GenerateRequest, GenerationOutcome};
pub use core::html::{render_document, HtmlRenderer};
pub use domain::model::{ChartConfig, ChartKind, GeneratedDocument, ParsedTable};
pub use utils::error::{ChartError, Result};
