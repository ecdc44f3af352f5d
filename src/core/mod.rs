pub mod chart_config;
pub mod engine;
pub mod html;
pub mod palette;
pub mod parser;

pub use crate::domain::model::{ChartConfig, ChartKind, GeneratedDocument, ParsedTable, Record};
pub use crate::domain::ports::{Clipboard, ConfigProvider, Storage};
pub use crate::utils::error::Result;
