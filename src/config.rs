use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API key
    pub tmdb_api_key: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Image CDN prefix that poster paths are appended to
    #[serde(default = "default_tmdb_image_base_url")]
    pub tmdb_image_base_url: String,

    /// JSON catalog of `{movie_id, title}` records
    #[serde(default = "default_catalog_path")]
    pub catalog_path: String,

    /// JSON similarity matrix, rows in catalog order
    #[serde(default = "default_similarity_path")]
    pub similarity_path: String,

    /// Redis connection URL. Metadata caching is disabled when unset.
    #[serde(default)]
    pub redis_url: Option<String>,

    /// Number of recommendations produced per navigation step
    #[serde(default = "default_recommendation_count")]
    pub recommendation_count: usize,

    /// Per-request timeout for metadata provider calls
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,

    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_base_url() -> String {
    "https://image.tmdb.org/t/p/w500".to_string()
}

fn default_catalog_path() -> String {
    "artifacts/movie_list.json".to_string()
}

fn default_similarity_path() -> String {
    "artifacts/similarity.json".to_string()
}

fn default_recommendation_count() -> usize {
    crate::services::ranking::DEFAULT_RECOMMENDATIONS
}

fn default_http_timeout_secs() -> u64 {
    10
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

    /// Address the HTTP server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
