use clap::Parser;
use std::time::Duration;
use url::Url;

/// Startup configuration, parsed once and shared read-only.
#[derive(Debug, Clone, Parser)]
#[command(name = "aries-virgo", version, about = "Aries lookup adapter for the Virgo Solr index")]
pub struct Config {
    /// Port to listen on
    #[arg(long, env = "ARIES_VIRGO_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Solr base URL
    #[arg(
        long = "solrurl",
        env = "ARIES_VIRGO_SOLR_URL",
        default_value = "http://solr.lib.virginia.edu:8082/solr"
    )]
    pub solr_url: String,

    /// Solr core
    #[arg(long = "solrcore", env = "ARIES_VIRGO_SOLR_CORE", default_value = "core")]
    pub solr_core: String,

    /// Public Virgo site base URL
    #[arg(
        long = "virgourl",
        env = "ARIES_VIRGO_URL",
        default_value = "https://search.lib.virginia.edu"
    )]
    pub virgo_url: String,

    /// Solr request timeout in seconds
    #[arg(long, env = "ARIES_VIRGO_TIMEOUT", default_value_t = 10)]
    pub timeout: u64,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("solr core must not be empty")]
    EmptyCore,
    #[error("timeout must be at least one second")]
    ZeroTimeout,
    #[error("{name} is not a valid http(s) URL: {value}")]
    InvalidUrl { name: &'static str, value: String },
}

impl Config {
    #[cfg(test)]
    pub fn new(solr_url: &str, solr_core: &str, virgo_url: &str) -> Self {
        Self {
            port: 8080,
            solr_url: solr_url.to_string(),
            solr_core: solr_core.to_string(),
            virgo_url: virgo_url.to_string(),
            timeout: 10,
        }
    }

    /// Trim trailing slashes and check that every value is usable.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        self.solr_url = self.solr_url.trim_end_matches('/').to_string();
        self.virgo_url = self.virgo_url.trim_end_matches('/').to_string();
        self.solr_core = self.solr_core.trim_matches('/').to_string();

        if self.solr_core.is_empty() {
            return Err(ConfigError::EmptyCore);
        }
        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        check_url("solrurl", &self.solr_url)?;
        check_url("virgourl", &self.virgo_url)?;

        Ok(self)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn check_url(name: &'static str, value: &str) -> Result<(), ConfigError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ConfigError::InvalidUrl {
            name,
            value: value.to_string(),
        }),
    }
}
