use crate::adapters::clipboard::ClipboardBackend;
use crate::config::toml_config::TomlConfig;
use crate::core::ConfigProvider;
use crate::domain::model::ChartKind;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
use crate::config::CliConfig;

/// Effective settings after layering file values and command line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSettings {
    pub chart_kind: ChartKind,
    pub title: String,
    pub output_path: String,
    pub output_filename: String,
    pub library_url: String,
    pub copy_to_clipboard: bool,
    pub clipboard_primary: ClipboardBackend,
    pub clipboard_fallback: ClipboardBackend,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self::from_toml(&TomlConfig::default())
    }
}

impl ChartSettings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        let clipboard = &config.clipboard;
        Self {
            chart_kind: config.chart_kind(),
            title: config.title().to_string(),
            output_path: config.output_path().to_string(),
            output_filename: config.output_filename().to_string(),
            library_url: config.library_url().to_string(),
            copy_to_clipboard: clipboard.enabled,
            // 預設先用系統剪貼簿，再退回平台的複製程式
            clipboard_primary: clipboard
                .primary
                .as_deref()
                .and_then(ClipboardBackend::parse)
                .unwrap_or_else(ClipboardBackend::system),
            clipboard_fallback: clipboard
                .fallback
                .as_deref()
                .and_then(ClipboardBackend::parse)
                .unwrap_or_else(ClipboardBackend::platform_command),
        }
    }

    /// Flags given on the command line win over the file.
    #[cfg(feature = "cli")]
    pub fn apply_cli(mut self, cli: &CliConfig) -> Self {
        if let Some(kind) = cli.chart_type {
            self.chart_kind = kind;
        }
        if let Some(title) = &cli.title {
            self.title = title.clone();
        }
        if let Some(path) = &cli.output_path {
            self.output_path = path.clone();
        }
        if let Some(filename) = &cli.filename {
            self.output_filename = filename.clone();
        }
        if let Some(url) = &cli.library_url {
            self.library_url = url.clone();
        }
        if cli.copy {
            self.copy_to_clipboard = true;
        }
        self
    }

    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: Option<&TomlConfig>) -> Self {
        let base = file.map(Self::from_toml).unwrap_or_default();
        base.apply_cli(cli)
    }
}

impl ConfigProvider for ChartSettings {
    fn chart_kind(&self) -> ChartKind {
        self.chart_kind
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_filename(&self) -> &str {
        &self.output_filename
    }

    fn library_url(&self) -> &str {
        &self.library_url
    }
}

impl Validate for ChartSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("library_url", &self.library_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_html_filename("filename", &self.output_filename)?;
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::domain::ports::Clipboard;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_file_values() {
        let file = TomlConfig::from_toml_str(
            r#"
[chart]
type = "line"
title = "From file"

[output]
path = "./reports"
"#,
        )
        .unwrap();
        let cli = CliConfig::parse_from([
            "paste-chart",
            "--chart-type",
            "polarArea",
            "--filename",
            "radial.html",
        ]);

        let settings = ChartSettings::resolve(&cli, Some(&file));

        assert_eq!(settings.chart_kind, ChartKind::PolarArea);
        assert_eq!(settings.title, "From file");
        assert_eq!(settings.output_path, "./reports");
        assert_eq!(settings.output_filename, "radial.html");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_defaults_without_file() {
        let cli = CliConfig::parse_from(["paste-chart"]);
        let settings = ChartSettings::resolve(&cli, None);

        assert_eq!(settings, ChartSettings::default());
        assert_eq!(settings.chart_kind, ChartKind::Bar);
        assert_eq!(settings.output_filename, "chart.html");
        assert!(!settings.copy_to_clipboard);
    }

    #[test]
    fn test_clipboard_commands_from_file() {
        let file = TomlConfig::from_toml_str(
            r#"
[clipboard]
primary = "xsel --clipboard --input"
"#,
        )
        .unwrap();
        let cli = CliConfig::parse_from(["paste-chart", "--copy"]);

        let settings = ChartSettings::resolve(&cli, Some(&file));

        assert!(settings.copy_to_clipboard);
        assert_eq!(settings.clipboard_primary.name(), "xsel");
        assert_eq!(settings.clipboard_fallback, ClipboardBackend::platform_command());
    }

    #[test]
    fn test_default_clipboards() {
        let settings = ChartSettings::default();

        assert_eq!(settings.clipboard_primary, ClipboardBackend::system());
        assert!(matches!(settings.clipboard_fallback, ClipboardBackend::Command(_)));
    }

    #[test]
    fn test_invalid_library_url_fails_validation() {
        let cli = CliConfig::parse_from(["paste-chart", "--library-url", "chart.js"]);
        let settings = ChartSettings::resolve(&cli, None);
        assert!(settings.validate().is_err());
    }
}
