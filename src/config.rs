use std::net::SocketAddr;

use anyhow::{anyhow, Context};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 16;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub max_connections: u32,
}

impl Config {
    /// Reads `.env` (if present) and the process environment.
    pub fn from_env() -> anyhow::Result<Config> {
        dotenv::dotenv().ok();
        Self::from_vars(|key| dotenv::var(key).ok())
    }

    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> anyhow::Result<Config> {
        let database_url = var("DATABASE_URL").ok_or(anyhow!("DATABASE_URL must be set"))?;

        let bind_addr = var("BIND_ADDR")
            .unwrap_or(DEFAULT_BIND_ADDR.to_owned())
            .parse()
            .context("BIND_ADDR is not a socket address")?;

        let max_connections = match var("MAX_CONNECTIONS") {
            Some(n) => n.parse().context("MAX_CONNECTIONS is not a number")?,
            None => DEFAULT_MAX_CONNECTIONS,
        };
        if max_connections == 0 {
            return Err(anyhow!("MAX_CONNECTIONS must be at least 1"));
        }

        Ok(Config { database_url, bind_addr, max_connections })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply() {
        let config = Config::from_vars(vars(&[("DATABASE_URL", "sqlite://rooms.db")])).unwrap();
        assert_eq!(config.database_url, "sqlite://rooms.db");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert_eq!(config.max_connections, DEFAULT_MAX_CONNECTIONS);
    }

    #[test]
    fn database_url_is_required() {
        let err = Config::from_vars(vars(&[])).unwrap_err();
        assert!(err.to_string().contains("DATABASE_URL"));
    }

    #[test]
    fn overrides_are_parsed() {
        let config = Config::from_vars(vars(&[
            ("DATABASE_URL", "sqlite::memory:"),
            ("BIND_ADDR", "127.0.0.1:3000"),
            ("MAX_CONNECTIONS", "4"),
        ]))
        .unwrap();
        assert_eq!(config.bind_addr.port(), 3000);
        assert_eq!(config.max_connections, 4);
    }

    #[test]
    fn bad_values_are_rejected() {
        assert!(Config::from_vars(vars(&[("DATABASE_URL", "x"), ("BIND_ADDR", "nope")])).is_err());
        assert!(Config::from_vars(vars(&[("DATABASE_URL", "x"), ("MAX_CONNECTIONS", "lots")])).is_err());
        assert!(Config::from_vars(vars(&[("DATABASE_URL", "x"), ("MAX_CONNECTIONS", "0")])).is_err());
    }
}
