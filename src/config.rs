//! Configuration for hearth
//!
//! CLI arguments and environment variable handling using clap.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Hearth - REST backend for the wellness companion
#[derive(Parser, Debug, Clone)]
#[command(name = "hearth")]
#[command(about = "REST backend for the Hearth wellness companion")]
pub struct Args {
    /// Address to listen on
    #[arg(long, env = "LISTEN", default_value = "0.0.0.0:5000")]
    pub listen: SocketAddr,

    /// Path to the JSON snapshot file holding the whole application state
    #[arg(long, env = "DATA_FILE", default_value = "data.json")]
    pub data_file: PathBuf,

    /// JWT secret for token signing (required in production)
    #[arg(long, env = "JWT_SECRET")]
    pub jwt_secret: Option<String>,

    /// Token validity in days
    #[arg(long, env = "JWT_EXPIRY_DAYS", default_value = "30")]
    pub jwt_expiry_days: i64,

    /// Seconds between periodic background snapshots
    #[arg(long, env = "SAVE_INTERVAL_SECS", default_value = "30")]
    pub save_interval_secs: u64,

    /// Enable development mode (permits a default JWT secret)
    #[arg(long, env = "DEV_MODE", default_value = "false")]
    pub dev_mode: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Args {
    /// Get effective JWT secret (uses default in dev mode)
    pub fn jwt_secret(&self) -> String {
        if self.dev_mode {
            self.jwt_secret
                .clone()
                .unwrap_or_else(|| "dev-only-insecure-secret".to_string())
        } else {
            self.jwt_secret
                .clone()
                .expect("JWT_SECRET is required in production mode")
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if !self.dev_mode && self.jwt_secret.is_none() {
            return Err("JWT_SECRET is required in production mode".to_string());
        }

        if self.save_interval_secs == 0 {
            return Err("SAVE_INTERVAL_SECS must be greater than zero".to_string());
        }

        if self.jwt_expiry_days <= 0 {
            return Err("JWT_EXPIRY_DAYS must be greater than zero".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dev_mode_supplies_default_secret() {
        let args = Args::parse_from(["hearth", "--dev-mode"]);
        assert!(args.validate().is_ok());
        assert_eq!(args.jwt_secret(), "dev-only-insecure-secret");
    }

    #[test]
    fn test_production_requires_secret() {
        let args = Args::parse_from(["hearth"]);
        assert!(args.validate().is_err());
    }

    #[test]
    fn test_explicit_secret_wins_over_dev_default() {
        let args = Args::parse_from([
            "hearth",
            "--dev-mode",
            "--jwt-secret",
            "configured-secret",
        ]);
        assert_eq!(args.jwt_secret(), "configured-secret");
    }

    #[test]
    fn test_zero_save_interval_rejected() {
        let args = Args::parse_from([
            "hearth",
            "--dev-mode",
            "--save-interval-secs",
            "0",
        ]);
        assert!(args.validate().is_err());
    }
}
