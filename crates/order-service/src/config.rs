//! Server configuration.
//!
//! Every setting can come from the command line, the environment, or a `.env` file,
//! in that order of precedence.

use crate::lookup::CallPolicy;
use crate::service::CheckoutOptions;
use clap::{Args, Parser};
use std::time::Duration;

/// Order service configuration
#[derive(Debug, Clone, Parser)]
#[command(name = "order-service", about = "Cart and checkout service", long_about = None)]
pub struct ServerConfig {
    /// Server host address
    #[arg(short = 'H', long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Server port
    #[arg(short, long, env = "SERVER_PORT", default_value = "8080")]
    pub port: u16,

    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Checkout and collaborator call settings.
    #[command(flatten)]
    pub checkout: CheckoutConfig,

    /// Request queue length of each store actor
    #[arg(long, env = "STORE_BUFFER", default_value = "32")]
    pub store_buffer: usize,

    /// Order events kept for slow subscribers
    #[arg(long, env = "EVENT_BUFFER", default_value = "64")]
    pub event_buffer: usize,

    /// Create a demo user and two products at startup
    #[arg(long, env = "SEED_DEMO", default_value_t = true, action = clap::ArgAction::Set)]
    pub seed_demo: bool,
}

#[derive(Debug, Clone, Args)]
pub struct CheckoutConfig {
    /// Timeout of one user/product lookup, in milliseconds
    #[arg(long, env = "LOOKUP_TIMEOUT_MS", default_value = "2000")]
    pub lookup_timeout_ms: u64,

    /// Attempts per lookup, including the first
    #[arg(long, env = "LOOKUP_ATTEMPTS", default_value = "3")]
    pub lookup_attempts: u32,

    /// Linear backoff step between lookup attempts, in milliseconds
    #[arg(long, env = "LOOKUP_BACKOFF_MS", default_value = "100")]
    pub lookup_backoff_ms: u64,

    /// Timeout for publishing an order event, in milliseconds
    #[arg(long, env = "EVENT_TIMEOUT_MS", default_value = "500")]
    pub event_timeout_ms: u64,

    /// Product lookups in flight per checkout
    #[arg(long, env = "PRODUCT_FAN_OUT", default_value = "8")]
    pub product_fan_out: usize,

    /// Serialize checkouts and cart edits per user
    #[arg(long, env = "SERIALIZE_CHECKOUTS", default_value_t = true, action = clap::ArgAction::Set)]
    pub serialize_checkouts: bool,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: 2000,
            lookup_attempts: 3,
            lookup_backoff_ms: 100,
            event_timeout_ms: 500,
            product_fan_out: 8,
            serialize_checkouts: true,
        }
    }
}

impl CheckoutConfig {
    pub fn call_policy(&self) -> CallPolicy {
        CallPolicy {
            timeout: Duration::from_millis(self.lookup_timeout_ms),
            attempts: self.lookup_attempts,
            backoff: Duration::from_millis(self.lookup_backoff_ms),
        }
    }

    pub fn options(&self) -> CheckoutOptions {
        CheckoutOptions {
            policy: self.call_policy(),
            event_timeout: Duration::from_millis(self.event_timeout_ms),
            product_fan_out: self.product_fan_out,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            checkout: CheckoutConfig::default(),
            store_buffer: 32,
            event_buffer: 64,
            seed_demo: true,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parsed_defaults() {
        let parsed = ServerConfig::try_parse_from(["order-service"]).unwrap();
        let defaults = ServerConfig::default();

        assert_eq!(parsed.port, defaults.port);
        assert_eq!(parsed.checkout.options(), defaults.checkout.options());
        assert!(parsed.checkout.serialize_checkouts);
        assert!(parsed.seed_demo);
    }

    #[test]
    fn test_flags_override_defaults() {
        let parsed = ServerConfig::try_parse_from([
            "order-service",
            "--port",
            "9000",
            "--lookup-attempts",
            "5",
            "--serialize-checkouts",
            "false",
        ])
        .unwrap();

        assert_eq!(parsed.socket_addr(), "0.0.0.0:9000");
        assert_eq!(parsed.checkout.call_policy().attempts, 5);
        assert!(!parsed.checkout.serialize_checkouts);
    }
}
