use crate::adapters::clipboard::copy_with_fallback;
use crate::core::chart_config::build_chart_config;
use crate::core::html::HtmlRenderer;
use crate::core::parser::parse_input;
use crate::domain::model::{ChartKind, GeneratedDocument};
use crate::domain::ports::{Clipboard, ConfigProvider, Storage};
use crate::utils::error::{ChartError, Result};

/// Everything one generation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub input: String,
    pub kind: ChartKind,
    pub title: String,
}

impl GenerateRequest {
    pub fn new(input: impl Into<String>, kind: ChartKind, title: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            kind,
            title: title.into(),
        }
    }
}

/// Result of one generation as shown to the user. A failed outcome never
/// carries a document.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    pub success: bool,
    pub message: String,
    pub document: Option<GeneratedDocument>,
}

impl GenerationOutcome {
    pub fn from_result(result: Result<GeneratedDocument>) -> Self {
        match result {
            Ok(document) => Self {
                success: true,
                message: format!("Chart generated ({} bytes)", document.len()),
                document: Some(document),
            },
            Err(e) => Self {
                success: false,
                message: e.user_friendly_message(),
                document: None,
            },
        }
    }
}

/// Reads a data file as UTF-8 text.
pub async fn read_input<S: Storage>(storage: &S, path: &str) -> Result<String> {
    let bytes = storage.read_file(path).await?;
    String::from_utf8(bytes)
        .map_err(|_| ChartError::input(format!("'{}' is not valid UTF-8 text", path)))
}

pub struct ChartEngine<S: Storage> {
    storage: S,
    renderer: HtmlRenderer,
}

impl<S: Storage> ChartEngine<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            renderer: HtmlRenderer::default(),
        }
    }

    pub fn with_renderer(storage: S, renderer: HtmlRenderer) -> Self {
        Self { storage, renderer }
    }

    pub fn from_config<C: ConfigProvider>(storage: S, config: &C) -> Self {
        Self::with_renderer(storage, HtmlRenderer::new(config.library_url()))
    }

    /// Parse, build and render in one synchronous pass.
    pub fn try_generate(&self, request: &GenerateRequest) -> Result<GeneratedDocument> {
        tracing::debug!("Parsing {} bytes of input", request.input.len());
        let table = parse_input(&request.input)?;
        tracing::info!("Parsed {} records from {:?} input", table.len(), table.source);

        let config = build_chart_config(&table, request.kind, &request.title)?;
        tracing::info!(
            "Built {} chart with {} labels and {} datasets",
            config.kind,
            config.labels.len(),
            config.datasets.len()
        );

        let document = self.renderer.render(&config);
        tracing::debug!("Rendered document of {} bytes", document.len());
        Ok(document)
    }

    pub fn generate(&self, request: &GenerateRequest) -> GenerationOutcome {
        let result = self.try_generate(request);
        if let Err(e) = &result {
            tracing::warn!("Generation failed: {} (Category: {:?})", e, e.category());
        }
        GenerationOutcome::from_result(result)
    }

    /// Writes the document through storage and returns the file name used.
    pub async fn export(&self, document: &GeneratedDocument, filename: &str) -> Result<String> {
        tracing::debug!(
            "Writing {} ({}, {} bytes)",
            filename,
            document.mime_type(),
            document.len()
        );
        self.storage.write_file(filename, document.as_bytes()).await?;
        Ok(filename.to_string())
    }

    /// Clipboard failures stay local to the copy; the document is untouched.
    pub fn copy(
        &self,
        document: &GeneratedDocument,
        primary: &dyn Clipboard,
        fallback: &dyn Clipboard,
    ) -> Result<String> {
        let used = copy_with_fallback(primary, fallback, document.as_str())?;
        tracing::info!("Copied document to clipboard via '{}'", used);
        Ok(used.to_string())
    }
}
