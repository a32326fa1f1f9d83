use clap::Parser;
use entity_pages::core::EntityRepository;
use entity_pages::utils::error::ErrorSeverity;
use entity_pages::utils::{logger, validation::Validate};
use entity_pages::{AdminBootstrap, AppState, CliConfig, HtmlPageRenderer, PageError};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init_logger(config.logging.format, cli.verbose);

    tracing::info!("Starting entity-pages");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        exit_with(&e, "Configuration validation failed");
    }
    let bind_addr = config.server.bind_addr.parse()?;

    // 後端只在啟動時初始化一次，之後以參數傳遞
    let bootstrap = AdminBootstrap::new(config.backend.clone(), config.collections.clone());
    let admin = match bootstrap.handle().await {
        Ok(admin) => admin,
        Err(e) => exit_with(&e, "Backend initialization failed"),
    };
    tracing::info!("📦 Object store bucket: {}", admin.storage().name());

    let repository: Arc<dyn EntityRepository> = Arc::new(admin.firestore().clone());
    let state = AppState::new(repository, Arc::new(HtmlPageRenderer::new()));

    entity_pages::web::serve(bind_addr, entity_pages::router(state)).await?;
    Ok(())
}

fn exit_with(e: &PageError, context: &str) -> ! {
    tracing::error!(
        "❌ {}: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
