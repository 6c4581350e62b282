use std::path::{Path, PathBuf};

use log::info;

use wayscope_input::catalog::DatasetCatalog;

use crate::server::config::{BaseConfig, BaseConfigReader};
use crate::server::logger::initiate_logger;
use crate::server::routes::build_router;
use crate::server::state::AppState;

pub struct ServerBuilder {
    base_config: BaseConfig,
    config_path: PathBuf,
    port_override: Option<u16>,
}

impl ServerBuilder {
    pub fn new(base_config_file: &str, port_override: Option<u16>) -> Self {
        if !Path::new(base_config_file).exists() {
            panic!("Configuration file is not found.");
        }
        let config_path = Path::new(base_config_file)
            .parent()
            .unwrap_or_else(|| {
                panic!("Invalid directory for the configuration file");
            })
            .to_path_buf();

        let config_reader = BaseConfigReader::new(base_config_file);
        match config_reader.parse() {
            Ok(base_config) => Self {
                base_config,
                config_path,
                port_override,
            },
            Err(e) => {
                panic!("Error while parsing the base configuration file: {}", e);
            }
        }
    }

    fn build_state(&self) -> AppState {
        let catalog = DatasetCatalog::builder()
            .root(PathBuf::from(&self.base_config.dataset_settings.root_path))
            .marker(self.base_config.dataset_settings.file_marker.clone())
            .build();
        AppState::new(catalog, self.base_config.dataset_settings.scenario_cap)
    }

    pub async fn serve(self) {
        initiate_logger(&self.config_path, &self.base_config.log_settings);
        info!(
            "Serving dataset root {}.",
            self.base_config.dataset_settings.root_path
        );

        let static_dir = self
            .base_config
            .server_settings
            .static_dir
            .as_ref()
            .map(PathBuf::from);
        let router = build_router(self.build_state(), static_dir.as_deref());

        let port = self
            .port_override
            .unwrap_or(self.base_config.server_settings.port);
        let address = format!("{}:{}", self.base_config.server_settings.host, port);
        let listener = tokio::net::TcpListener::bind(&address)
            .await
            .unwrap_or_else(|e| panic!("Error while binding to {}: {}", address, e));
        println!("Serving on http://{}", address);
        axum::serve(listener, router)
            .await
            .unwrap_or_else(|e| panic!("Server error: {}", e));
    }
}
