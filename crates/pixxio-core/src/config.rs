//! Configuration module
//!
//! Transfer settings shared by both nodes. Nodes are handed a `TransferConfig`
//! when they are registered and never read the environment on their own; a host
//! that wants environment overrides calls [`TransferConfig::from_env`] once at
//! startup.

use std::time::Duration;

use serde::Deserialize;

const UPLOAD_TIMEOUT_SECS: u64 = 60;
const RESOLVE_TIMEOUT_SECS: u64 = 10;
const FETCH_TIMEOUT_SECS: u64 = 30;
const JPEG_QUALITY: u8 = 95;

/// Prefix for environment overrides, e.g. `PIXXIO_UPLOAD_TIMEOUT_SECS=120`.
pub const ENV_PREFIX: &str = "PIXXIO_";

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TransferConfig {
    /// Timeout for the multipart upload request
    #[serde(default = "default_upload_timeout_secs")]
    pub upload_timeout_secs: u64,
    /// Timeout for resolving a file id into a download URL
    #[serde(default = "default_resolve_timeout_secs")]
    pub resolve_timeout_secs: u64,
    /// Timeout for fetching the bytes behind a download URL
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,
    /// JPEG quality used when encoding uploads (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_upload_timeout_secs() -> u64 {
    UPLOAD_TIMEOUT_SECS
}

fn default_resolve_timeout_secs() -> u64 {
    RESOLVE_TIMEOUT_SECS
}

fn default_fetch_timeout_secs() -> u64 {
    FETCH_TIMEOUT_SECS
}

fn default_jpeg_quality() -> u8 {
    JPEG_QUALITY
}

fn default_user_agent() -> String {
    format!("pixxio-nodes/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            upload_timeout_secs: UPLOAD_TIMEOUT_SECS,
            resolve_timeout_secs: RESOLVE_TIMEOUT_SECS,
            fetch_timeout_secs: FETCH_TIMEOUT_SECS,
            jpeg_quality: JPEG_QUALITY,
            user_agent: default_user_agent(),
        }
    }
}

impl TransferConfig {
    /// Load overrides from `PIXXIO_*` variables (and a `.env` file if present).
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let config = envy::prefixed(ENV_PREFIX).from_env::<TransferConfig>()?;
        config.validate()?;

        tracing::debug!(
            upload_timeout_secs = config.upload_timeout_secs,
            resolve_timeout_secs = config.resolve_timeout_secs,
            fetch_timeout_secs = config.fetch_timeout_secs,
            jpeg_quality = config.jpeg_quality,
            "Loaded transfer configuration from environment"
        );

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.upload_timeout_secs == 0
            || self.resolve_timeout_secs == 0
            || self.fetch_timeout_secs == 0
        {
            anyhow::bail!("Transfer timeouts must be greater than zero");
        }

        if !(1..=100).contains(&self.jpeg_quality) {
            anyhow::bail!(
                "JPEG quality must be between 1 and 100, got {}",
                self.jpeg_quality
            );
        }

        Ok(())
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<TransferConfig, envy::Error> {
        envy::prefixed(ENV_PREFIX).from_iter(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string())),
        )
    }

    #[test]
    fn test_default_timeouts() {
        let config = TransferConfig::default();
        assert_eq!(config.upload_timeout(), Duration::from_secs(60));
        assert_eq!(config.resolve_timeout(), Duration::from_secs(10));
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.jpeg_quality, 95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_environment_matches_default() {
        let config = from_pairs(&[]).unwrap();
        assert_eq!(config, TransferConfig::default());
    }

    #[test]
    fn test_prefixed_overrides() {
        let config = from_pairs(&[
            ("PIXXIO_UPLOAD_TIMEOUT_SECS", "120"),
            ("PIXXIO_JPEG_QUALITY", "80"),
            ("UNRELATED", "ignored"),
        ])
        .unwrap();
        assert_eq!(config.upload_timeout_secs, 120);
        assert_eq!(config.jpeg_quality, 80);
        assert_eq!(config.fetch_timeout_secs, 30);
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = TransferConfig {
            fetch_timeout_secs: 0,
            ..TransferConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_out_of_range_quality() {
        let config = TransferConfig {
            jpeg_quality: 0,
            ..TransferConfig::default()
        };
        assert!(config.validate().is_err());

        let config = TransferConfig {
            jpeg_quality: 101,
            ..TransferConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
