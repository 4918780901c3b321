use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Deserialize, Debug, Clone)]
pub struct ServerConfig {
    pub database_url: String,

    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    #[serde(default = "default_log_dir")]
    pub log_dir: String,

    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

// Partial config for layering
#[derive(Deserialize, Default, Debug)]
struct PartialServerConfig {
    database_url: Option<String>,
    listen_addr: Option<String>,
    log_dir: Option<String>,
    max_connections: Option<u32>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:5000".to_string()
}

fn default_log_dir() -> String {
    "logs".to_string()
}

fn default_max_connections() -> u32 {
    10
}

impl ServerConfig {
    /// Loads the configuration: TOML file first (if given and present), then
    /// environment variables on top.
    pub fn load(config_path: Option<&str>) -> Result<Self, String> {
        dotenv::dotenv().ok();

        // 1. Load from file (optional)
        let file_config = match config_path {
            Some(path_str) => read_file_config(Path::new(path_str))?,
            None => PartialServerConfig::default(),
        };

        // 2. Load from environment variables
        let env_config: PartialServerConfig = envy::from_env::<PartialServerConfig>()
            .map_err(|e| format!("Failed to load config from environment: {e}"))?;

        // 3. Merge: environment overrides file
        merge(env_config, file_config)
    }
}

fn read_file_config(path: &Path) -> Result<PartialServerConfig, String> {
    if !path.exists() {
        return Ok(PartialServerConfig::default());
    }
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file at {path:?}: {e}"))?;
    toml::from_str(&contents)
        .map_err(|e| format!("Failed to parse TOML from config file at {path:?}: {e}"))
}

fn merge(env_config: PartialServerConfig, file_config: PartialServerConfig) -> Result<ServerConfig, String> {
    Ok(ServerConfig {
        database_url: env_config
            .database_url
            .or(file_config.database_url)
            .ok_or("DATABASE_URL is required")?,
        listen_addr: env_config
            .listen_addr
            .or(file_config.listen_addr)
            .unwrap_or_else(default_listen_addr),
        log_dir: env_config
            .log_dir
            .or(file_config.log_dir)
            .unwrap_or_else(default_log_dir),
        max_connections: env_config
            .max_connections
            .or(file_config.max_connections)
            .unwrap_or_else(default_max_connections),
    })
}
