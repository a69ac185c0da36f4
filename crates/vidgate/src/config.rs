//! Configuration management for Vidgate.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use vidpass_common::constants::{
    DEFAULT_LISTEN_ADDR, MAX_BODY_BYTES, MIN_IMAGE_BYTES, PROCESSING_DELAY_MS,
    REGISTRATION_TTL_SECS, SWEEP_INTERVAL_SECS, VERIFY_DELAY_MS, VERIFY_FAILURE_RATE,
};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP listen address
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Registration record handling
    #[serde(default)]
    pub registration: RegistrationConfig,

    /// Face verifier behavior
    #[serde(default)]
    pub verifier: VerifierConfig,
}

/// Registration record handling configuration
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationConfig {
    /// Record time-to-live in seconds
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Expiry sweep interval in seconds
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_secs: u64,

    /// Minimum accepted image payload length in bytes
    #[serde(default = "default_min_image_bytes")]
    pub min_image_bytes: usize,

    /// Simulated ID processing delay in milliseconds
    #[serde(default = "default_processing_delay")]
    pub processing_delay_ms: u64,

    /// Maximum accepted request body size in bytes
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

impl Default for RegistrationConfig {
    fn default() -> Self {
        Self {
            ttl_secs: default_ttl(),
            sweep_interval_secs: default_sweep_interval(),
            min_image_bytes: default_min_image_bytes(),
            processing_delay_ms: default_processing_delay(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

/// Face verifier configuration
#[derive(Debug, Clone, Deserialize)]
pub struct VerifierConfig {
    /// Simulated verification delay in milliseconds
    #[serde(default = "default_verify_delay")]
    pub delay_ms: u64,

    /// Simulated verification failure rate, clamped to [0.0, 1.0]
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_verify_delay(),
            failure_rate: default_failure_rate(),
        }
    }
}

// Default value functions
fn default_listen_addr() -> String { DEFAULT_LISTEN_ADDR.to_string() }
fn default_ttl() -> u64 { REGISTRATION_TTL_SECS }
fn default_sweep_interval() -> u64 { SWEEP_INTERVAL_SECS }
fn default_min_image_bytes() -> usize { MIN_IMAGE_BYTES }
fn default_processing_delay() -> u64 { PROCESSING_DELAY_MS }
fn default_max_body_bytes() -> usize { MAX_BODY_BYTES }
fn default_verify_delay() -> u64 { VERIFY_DELAY_MS }
fn default_failure_rate() -> f64 { VERIFY_FAILURE_RATE }

impl AppConfig {
    /// Load configuration from file, with CLI overrides
    pub fn load(config_path: &str, args: &super::Args) -> Result<Self> {
        let mut config = if Path::new(config_path).exists() {
            let settings = config::Config::builder()
                .add_source(config::File::with_name(config_path))
                .build()
                .context("Failed to load config file")?;

            settings
                .try_deserialize()
                .context("Failed to parse config")?
        } else {
            // Use defaults if config file doesn't exist
            tracing::warn!("Config file not found, using defaults");
            Self::default()
        };

        // Apply CLI overrides
        if let Some(ref listen) = args.listen {
            config.listen_addr = listen.clone();
        }
        if let Some(port) = args.port {
            config.listen_addr = override_port(&config.listen_addr, port);
        }

        Ok(config)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            registration: RegistrationConfig::default(),
            verifier: VerifierConfig::default(),
        }
    }
}

/// Replace the port part of a host:port address
fn override_port(addr: &str, port: u16) -> String {
    match addr.rsplit_once(':') {
        Some((host, _)) => format!("{host}:{port}"),
        None => format!("{addr}:{port}"),
    }
}
