use crate::domain::model::ChartKind;
use crate::utils::error::Result;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Copies text to a system clipboard.
pub trait Clipboard {
    fn name(&self) -> &str;
    fn write_text(&self, text: &str) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn chart_kind(&self) -> ChartKind;
    fn title(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_filename(&self) -> &str;
    fn library_url(&self) -> &str;
}
