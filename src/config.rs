use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub server: ServerConfig,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolves the configuration from an arbitrary key lookup.
    ///
    /// `DATABASE_URL` wins when present; otherwise the URL is assembled from
    /// the individual `DB_*` variables with local defaults.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let database_url = match lookup("DATABASE_URL") {
            Some(url) => url,
            None => format!(
                "postgres://{}:{}@{}:{}/{}",
                var("DB_USER", "postgres"),
                var("DB_PASSWORD", "postgres"),
                var("DB_HOST", "localhost"),
                var("DB_PORT", "5432"),
                var("DB_NAME", "caregiving_db"),
            ),
        };

        let max_connections = lookup("DB_MAX_CONNECTIONS")
            .and_then(|v| v.parse::<u32>().ok())
            .unwrap_or(10);

        let port = var("APP_PORT", "8080")
            .parse::<u16>()
            .map_err(|e| anyhow::anyhow!("invalid APP_PORT: {e}"))?;

        Ok(Self {
            database_url,
            max_connections,
            server: ServerConfig {
                host: var("APP_HOST", "0.0.0.0"),
                port,
            },
        })
    }
}
