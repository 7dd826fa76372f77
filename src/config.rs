use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Foursquare Places API key
    pub foursquare_api_key: String,

    /// Foursquare Places API base URL
    #[serde(default = "default_foursquare_api_url")]
    pub foursquare_api_url: String,

    /// Geoapify Places API key
    pub geoapify_api_key: String,

    /// Geoapify Places API base URL
    #[serde(default = "default_geoapify_api_url")]
    pub geoapify_api_url: String,

    /// OpenCage geocoding API key
    pub opencage_api_key: String,

    /// OpenCage geocoding API base URL
    #[serde(default = "default_opencage_api_url")]
    pub opencage_api_url: String,

    /// Redis connection URL (feedback and review storage)
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Per-provider HTTP request timeout in seconds
    #[serde(default = "default_provider_timeout_secs")]
    pub provider_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_foursquare_api_url() -> String {
    "https://api.foursquare.com/v3".to_string()
}

fn default_geoapify_api_url() -> String {
    "https://api.geoapify.com".to_string()
}

fn default_opencage_api_url() -> String {
    "https://api.opencagedata.com".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_provider_timeout_secs() -> u64 {
    8
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
