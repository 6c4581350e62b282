use std::path::PathBuf;

use serde::Deserialize;

use crate::server::logger::LogSettings;

#[derive(Deserialize, Debug, Clone)]
pub struct BaseConfig {
    pub server_settings: ServerSettings,
    pub dataset_settings: DatasetSettings,
    pub log_settings: LogSettings,
}

#[derive(Deserialize, Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct DatasetSettings {
    pub root_path: String,
    #[serde(default = "default_scenario_cap")]
    pub scenario_cap: usize,
    #[serde(default = "default_file_marker")]
    pub file_marker: String,
}

fn default_scenario_cap() -> usize {
    100
}

fn default_file_marker() -> String {
    String::from(".tfrecord")
}

pub struct BaseConfigReader {
    file_path: PathBuf,
}

impl BaseConfigReader {
    pub fn new(file_name: &str) -> Self {
        let file_path = PathBuf::from(file_name);
        Self { file_path }
    }

    pub fn parse(&self) -> Result<BaseConfig, Box<dyn std::error::Error>> {
        let parsing_result = std::fs::read_to_string(&self.file_path)?;
        let config: BaseConfig = toml::from_str(&parsing_result)?;
        Ok(config)
    }
}
