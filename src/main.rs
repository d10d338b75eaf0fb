use beacon_net::adapters::inbound::FilesystemNetworkSource;
use beacon_net::adapters::outbound::{init_logger, FileMapWriter};
use beacon_net::application::MapGenerationService;
use beacon_net::domains::netlogo::NetLogoEmitter;
use beacon_net::Config;
use std::error::Error;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    let config_path = std::env::args().nth(1).unwrap_or_else(|| "config.toml".to_string());
    let config = Config::from_file(&config_path)?;

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_directive()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Configuration loaded from {}", config_path);
    info!("Template: {}", config.template.path.display());
    info!("Output: {}", config.output.path.display());

    let source = Arc::new(FilesystemNetworkSource::new(config.network.data_dir.clone()));
    let writer = Arc::new(FileMapWriter::new(
        config.template.path.clone(),
        config.output.path.clone(),
        NetLogoEmitter::new(config.template.sentinel.clone()),
    ));
    let logger = init_logger(&config.logging);

    let service = MapGenerationService::new(source, writer, logger);
    match service.generate(&config.network.description) {
        Ok(report) => {
            info!(
                nodes = report.nodes,
                edges = report.edges,
                behaviors = report.behaviors,
                "Map generated"
            );
            Ok(())
        }
        Err(e) => {
            error!("Map generation failed: {}", e);
            Err(e.into())
        }
    }
}
