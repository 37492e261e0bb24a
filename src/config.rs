use std::env;

use anyhow::Context;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub workers: usize,
    /// `None` lets any origin call the service. Unset, empty and `*` all mean `None`.
    pub allowed_origin: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = lookup("DUTCHPAY_HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = match lookup("DUTCHPAY_PORT") {
            Some(port) => port
                .parse()
                .with_context(|| format!("DUTCHPAY_PORT is not a valid port: {port}"))?,
            None => 8080,
        };

        let workers = match lookup("DUTCHPAY_WORKERS") {
            Some(workers) => workers
                .parse()
                .with_context(|| format!("DUTCHPAY_WORKERS is not a number: {workers}"))?,
            None => 1,
        };
        anyhow::ensure!(workers > 0, "DUTCHPAY_WORKERS must be at least 1");

        let allowed_origin = lookup("DUTCHPAY_ALLOWED_ORIGIN")
            .filter(|origin| !origin.is_empty() && origin != "*");

        Ok(Config {
            host,
            port,
            workers,
            allowed_origin,
        })
    }
}
