use std::{
    env,
    fmt::Display,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    str::FromStr,
    time::Duration,
};
use tracing::{info, warn};

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_HOST: IpAddr = IpAddr::V4(Ipv4Addr::UNSPECIFIED);

/// Backend settings read from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: try_load("HOST", DEFAULT_HOST),
            port: try_load("PORT", DEFAULT_PORT),
        }
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|err| {
        warn!("invalid {key} value {raw:?}: {err}, using default: {default}");
        default
    })
}

/// Cosmetic pause before the widget shows a reply: `base` plus up to `jitter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyDelay {
    pub base: Duration,
    pub jitter: Duration,
}

impl ReplyDelay {
    pub const fn none() -> Self {
        Self {
            base: Duration::ZERO,
            jitter: Duration::ZERO,
        }
    }

    pub const fn millis(base: u64, jitter: u64) -> Self {
        Self {
            base: Duration::from_millis(base),
            jitter: Duration::from_millis(jitter),
        }
    }
}

/// Client-side settings for the site features.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_base: String,
    pub catalog_url: String,
    pub remote_delay: ReplyDelay,
    pub local_delay: ReplyDelay,
}

impl ClientConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self {
            catalog_url: format!("{api_base}/reva_shop_products.json"),
            api_base,
            remote_delay: ReplyDelay::millis(600, 800),
            local_delay: ReplyDelay::millis(800, 900),
        }
    }

    pub fn without_delays(mut self) -> Self {
        self.remote_delay = ReplyDelay::none();
        self.local_delay = ReplyDelay::none();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_config_trims_trailing_slash() {
        let config = ClientConfig::new("http://localhost:5000/");
        assert_eq!(config.api_base, "http://localhost:5000");
        assert_eq!(config.catalog_url, "http://localhost:5000/reva_shop_products.json");
        assert_eq!(config.without_delays().remote_delay, ReplyDelay::none());
    }
}
