use crate::core::html::DEFAULT_LIBRARY_URL;
use crate::core::ConfigProvider;
use crate::domain::model::{ChartKind, GeneratedDocument};
use crate::utils::error::{ChartError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub chart: ChartSection,
    pub output: OutputSection,
    pub html: HtmlSection,
    pub clipboard: ClipboardSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSection {
    pub r#type: ChartKind,
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub path: String,
    pub filename: String,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            path: ".".to_string(),
            filename: GeneratedDocument::FILE_NAME.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlSection {
    pub library_url: String,
}

impl Default for HtmlSection {
    fn default() -> Self {
        Self {
            library_url: DEFAULT_LIBRARY_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardSection {
    pub enabled: bool,
    /// `system` or the command line of a clipboard program.
    pub primary: Option<String>,
    pub fallback: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ChartError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ChartError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CHART_TITLE})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ChartError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("html.library_url", &self.html.library_url)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_html_filename("output.filename", &self.output.filename)?;

        if let Some(primary) = &self.clipboard.primary {
            validation::validate_non_empty_string("clipboard.primary", primary)?;
        }
        if let Some(fallback) = &self.clipboard.fallback {
            validation::validate_non_empty_string("clipboard.fallback", fallback)?;
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn chart_kind(&self) -> ChartKind {
        self.chart.r#type
    }

    fn title(&self) -> &str {
        &self.chart.title
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_filename(&self) -> &str {
        &self.output.filename
    }

    fn library_url(&self) -> &str {
        &self.html.library_url
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[chart]
type = "polarArea"
title = "Quarterly revenue"

[output]
path = "./reports"
filename = "revenue.html"

[html]
library_url = "https://cdn.example.com/chart.js"

[clipboard]
enabled = true
primary = "wl-copy"
fallback = "xclip -selection clipboard"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.chart_kind(), ChartKind::PolarArea);
        assert_eq!(config.title(), "Quarterly revenue");
        assert_eq!(config.output_path(), "./reports");
        assert_eq!(config.output_filename(), "revenue.html");
        assert_eq!(config.library_url(), "https://cdn.example.com/chart.js");
        assert!(config.clipboard.enabled);
        assert_eq!(config.clipboard.fallback.as_deref(), Some("xclip -selection clipboard"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.chart_kind(), ChartKind::Bar);
        assert_eq!(config.title(), "");
        assert_eq!(config.output_path(), ".");
        assert_eq!(config.output_filename(), "chart.html");
        assert_eq!(config.library_url(), DEFAULT_LIBRARY_URL);
        assert!(!config.clipboard.enabled);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PASTE_CHART_TEST_TITLE", "From the environment");

        let toml_content = r#"
[chart]
title = "${PASTE_CHART_TEST_TITLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.chart.title, "From the environment");

        std::env::remove_var("PASTE_CHART_TEST_TITLE");
    }

    #[test]
    fn test_unknown_chart_type_is_rejected() {
        let toml_content = r#"
[chart]
type = "area"
"#;

        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(ChartError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[html]
library_url = "invalid-url"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());

        let toml_content = r#"
[output]
filename = "chart.png"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_blank_clipboard_command_is_rejected() {
        let toml_content = r#"
[clipboard]
enabled = true
primary = ""
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        match config.validate() {
            Err(ChartError::InvalidConfigValueError { field, .. }) => {
                assert_eq!(field, "clipboard.primary")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[chart]
type = "line"
title = "File test"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.chart_kind(), ChartKind::Line);
        assert_eq!(config.title(), "File test");
    }
}
