use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    /// Path to the CSV export of the sales spreadsheet.
    pub feed_path: String,
    /// Snapshot lifetime in seconds; 0 keeps it for the whole process.
    pub feed_cache_ttl_secs: u64,
    pub rate_limit_per_second: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            feed_path: std::env::var("FEED_PATH")
                .map_err(|_| anyhow::anyhow!("FEED_PATH environment variable required"))
                .and_then(|path| {
                    if path.trim().is_empty() {
                        anyhow::bail!("FEED_PATH cannot be empty");
                    }
                    Ok(path)
                })?,
            feed_cache_ttl_secs: std::env::var("FEED_CACHE_TTL_SECS")
                .unwrap_or_else(|_| "0".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("FEED_CACHE_TTL_SECS must be a whole number of seconds"))?,
            rate_limit_per_second: std::env::var("RATE_LIMIT_PER_SECOND")
                .unwrap_or_else(|_| "10".to_string())
                .parse::<u64>()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_PER_SECOND must be a positive number"))
                .and_then(|n: u64| {
                    if n == 0 {
                        anyhow::bail!("RATE_LIMIT_PER_SECOND must be greater than zero");
                    }
                    Ok(n)
                })?,
            rate_limit_burst: std::env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "20".to_string())
                .parse::<u32>()
                .map_err(|_| anyhow::anyhow!("RATE_LIMIT_BURST must be a positive number"))
                .and_then(|n: u32| {
                    if n == 0 {
                        anyhow::bail!("RATE_LIMIT_BURST must be greater than zero");
                    }
                    Ok(n)
                })?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Feed path: {}", config.feed_path);
        if config.feed_cache_ttl_secs > 0 {
            tracing::info!("Feed snapshot TTL: {}s", config.feed_cache_ttl_secs);
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}
