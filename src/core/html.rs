use crate::domain::model::{ChartConfig, GeneratedDocument};
use serde_json::json;

/// Pinned Chart.js build, the only external resource of a generated page.
pub const DEFAULT_LIBRARY_URL: &str =
    "https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js";

const FALLBACK_TITLE: &str = "Chart";

#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    library_url: String,
}

impl HtmlRenderer {
    pub fn new(library_url: impl Into<String>) -> Self {
        Self {
            library_url: library_url.into(),
        }
    }

    /// Renders a standalone page. Same config in, same bytes out.
    pub fn render(&self, config: &ChartConfig) -> GeneratedDocument {
        let literal = escape_script(&chart_literal(config).to_string());
        let page_title = if has_title(config) {
            config.title.as_str()
        } else {
            FALLBACK_TITLE
        };

        let html = format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="{library_url}"></script>
    <style>
        body {{ margin: 0; padding: 24px; background: #f5f6f8; font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; }}
        .chart-container {{ max-width: 960px; margin: 0 auto; padding: 24px; background: #ffffff; border-radius: 8px; box-shadow: 0 1px 4px rgba(0, 0, 0, 0.12); }}
        .actions {{ margin-top: 16px; text-align: right; }}
        .actions button {{ padding: 8px 16px; border: none; border-radius: 4px; background: #3b82f6; color: #ffffff; font-size: 14px; cursor: pointer; }}
        .actions button:hover {{ background: #2563eb; }}
    </style>
</head>
<body>
    <div class="chart-container">
        <canvas id="chart"></canvas>
        <div class="actions">
            <button id="download-png" type="button">Download PNG</button>
        </div>
    </div>
    <script>
        const chartConfig = {literal};
        const chart = new Chart(document.getElementById('chart'), chartConfig);

        document.getElementById('download-png').addEventListener('click', function () {{
            const link = document.createElement('a');
            link.href = chart.toBase64Image();
            link.download = 'chart.png';
            document.body.appendChild(link);
            link.click();
            document.body.removeChild(link);
        }});
    </script>
</body>
</html>
"#,
            title = escape_html(page_title),
            library_url = escape_html(&self.library_url),
            literal = literal,
        );

        GeneratedDocument::new(html)
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_LIBRARY_URL)
    }
}

/// Renders with the pinned library URL.
pub fn render_document(config: &ChartConfig) -> GeneratedDocument {
    HtmlRenderer::default().render(config)
}

/// Chart.js constructor argument: type, data and options.
pub fn chart_literal(config: &ChartConfig) -> serde_json::Value {
    let mut options = json!({
        "responsive": true,
        "plugins": {
            "title": {
                "display": has_title(config),
                "text": config.title,
            },
            "legend": {
                "position": "top",
            },
        },
    });

    if config.kind.has_axes() {
        options["scales"] = json!({
            "x": { "display": true },
            "y": { "beginAtZero": true },
        });
    }

    json!({
        "type": config.kind,
        "data": {
            "labels": config.labels,
            "datasets": config.datasets,
        },
        "options": options,
    })
}

/// Whitespace-only titles count as no title.
fn has_title(config: &ChartConfig) -> bool {
    !config.title.trim().is_empty()
}

// 避免資料中的 "</script>" 提前結束 script 區塊
fn escape_script(literal: &str) -> String {
    literal.replace("</", "<\\/")
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
