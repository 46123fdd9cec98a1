use clap::Parser;
use instagram_scraper_node::core::description::node_description;
use instagram_scraper_node::utils::{logger, validation::Validate};
use instagram_scraper_node::{
    CliConfig, InstagramScraperNode, LocalStorage, NodeError, NodeRunner, StaticExecuteContext,
    WebScraperFactory,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    if config.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    if config.describe {
        println!("{}", serde_json::to_string_pretty(&node_description())?);
        return Ok(());
    }

    tracing::info!("Starting instagram-scraper-node");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = run(&config).await {
        tracing::error!("❌ Run failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(e.exit_code());
    }

    Ok(())
}

async fn run(config: &CliConfig) -> Result<(), NodeError> {
    let run_config = config.resolve()?;
    run_config.validate()?;

    let ctx = StaticExecuteContext::new(node_description(), run_config.parameters.clone())?;
    let node = InstagramScraperNode::new(WebScraperFactory::new(run_config.base_url.clone()));

    let summary = match &run_config.output_path {
        Some(dir) => {
            let storage = LocalStorage::new(dir.clone());
            let full_path = storage.full_path(instagram_scraper_node::core::runner::OUTPUT_FILE);
            let summary = NodeRunner::with_storage(node, storage).run(&ctx).await?;
            tracing::info!("📁 Output saved to: {}", full_path);
            summary
        }
        None => NodeRunner::<_, LocalStorage>::new(node).run(&ctx).await?,
    };

    println!("{}", serde_json::to_string_pretty(&summary.records)?);
    tracing::info!("✅ Scraped {} posts", summary.records.len());
    Ok(())
}
