use clap::Parser;
use paste_chart::core::engine::read_input;
use paste_chart::utils::error::{ChartError, ErrorSeverity};
use paste_chart::utils::{logger, validation::Validate};
use paste_chart::{
    ChartEngine, ChartSettings, CliConfig, GenerateRequest, LocalStorage, TomlConfig,
};
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting paste-chart");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let file_config = match &cli.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let config = match TomlConfig::from_file(path) {
                Ok(config) => config,
                Err(e) => fail(&e),
            };
            // 檔案本身的值要先驗證，合併後空字串會被預設值蓋掉
            if let Err(e) = config.validate() {
                tracing::error!("❌ Configuration file validation failed: {}", e);
                fail(&e);
            }
            Some(config)
        }
        None => None,
    };

    let settings = ChartSettings::resolve(&cli, file_config.as_ref());

    // 驗證配置
    if let Err(e) = settings.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        fail(&e);
    }

    let input = match &cli.input {
        Some(path) => match read_input(&LocalStorage::new("."), path).await {
            Ok(text) => text,
            Err(e) => fail(&e),
        },
        None => {
            tracing::debug!("Reading data from stdin");
            let mut text = String::new();
            tokio::io::stdin().read_to_string(&mut text).await?;
            text
        }
    };

    let storage = LocalStorage::new(settings.output_path.clone());
    let engine = ChartEngine::from_config(storage, &settings);
    let request = GenerateRequest::new(input, settings.chart_kind, settings.title.clone());

    let outcome = engine.generate(&request);
    let document = match outcome.document {
        Some(document) if outcome.success => {
            tracing::info!("{}", outcome.message);
            document
        }
        _ => {
            eprintln!("❌ {}", outcome.message);
            std::process::exit(GENERATION_FAILED_EXIT_CODE);
        }
    };

    if cli.stdout {
        println!("{}", document.as_str());
    } else {
        match engine.export(&document, &settings.output_filename).await {
            Ok(filename) => {
                let full_path = std::path::Path::new(&settings.output_path).join(filename);
                tracing::info!("✅ Chart written to: {}", full_path.display());
                eprintln!("✅ Chart written to: {}", full_path.display());
            }
            Err(e) => fail(&e),
        }
    }

    if settings.copy_to_clipboard {
        // 複製失敗只警告，不影響已產生的文件
        match engine.copy(
            &document,
            &settings.clipboard_primary,
            &settings.clipboard_fallback,
        ) {
            Ok(used) => eprintln!("📋 Copied to clipboard via {}", used),
            Err(e) => {
                tracing::warn!("{}", e);
                eprintln!("⚠️ {}", e.user_friendly_message());
                eprintln!("💡 {}", e.recovery_suggestion());
            }
        }
    }

    Ok(())
}

/// Generation only fails on input or data errors, both medium severity.
const GENERATION_FAILED_EXIT_CODE: i32 = 2;

fn fail(e: &ChartError) -> ! {
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
