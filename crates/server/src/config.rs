use std::net::SocketAddr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TMDB_LANGUAGE: &str = "en-US";
const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub addr: SocketAddr,
    pub database_url: String,
    pub max_connections: u32,
    pub tmdb_api_key: String,
    pub tmdb_language: String,
    pub tmdb_base_url: String,
    pub tmdb_timeout_secs: u64,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
}

impl Config {
    pub fn new(
        addr: SocketAddr,
        database_url: String,
        tmdb_api_key: String,
        jwt_secret: String,
    ) -> Self {
        Self {
            addr,
            database_url,
            max_connections: 5,
            tmdb_api_key,
            tmdb_language: DEFAULT_TMDB_LANGUAGE.to_string(),
            tmdb_base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            tmdb_timeout_secs: 10,
            jwt_secret,
        }
    }

    pub fn tmdb_timeout(&self) -> Duration {
        Duration::from_secs(self.tmdb_timeout_secs)
    }
}
