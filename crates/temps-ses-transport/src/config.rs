//! Configuration for building an SES-backed transport

use serde::{Deserialize, Serialize};

use crate::debug::DebugSink;
use crate::errors::TransportError;

pub const DEFAULT_REGION: &str = "us-east-1";

/// Static AWS credentials. When absent the default provider chain
/// (environment, profile, instance metadata) is used.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SesCredentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SesTransportConfig {
    pub region: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<SesCredentials>,
    /// Custom endpoint URL (for LocalStack or other AWS-compatible services)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
    /// SES configuration set applied to every send
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configuration_set_name: Option<String>,
    /// Route failure descriptions to the log
    #[serde(default)]
    pub debug: bool,
}

impl Default for SesTransportConfig {
    fn default() -> Self {
        Self::new(DEFAULT_REGION)
    }
}

impl SesTransportConfig {
    pub fn new(region: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            credentials: None,
            endpoint_url: None,
            configuration_set_name: None,
            debug: false,
        }
    }

    /// Read configuration from `TEMPS_SES_*` variables, falling back to
    /// `AWS_REGION` and then [`DEFAULT_REGION`] for the region
    pub fn from_env() -> Self {
        let region = std::env::var("TEMPS_SES_REGION")
            .or_else(|_| std::env::var("AWS_REGION"))
            .unwrap_or_else(|_| DEFAULT_REGION.to_string());

        let debug = std::env::var("TEMPS_SES_DEBUG")
            .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
            .unwrap_or(false);

        Self {
            region,
            credentials: None,
            endpoint_url: std::env::var("TEMPS_SES_ENDPOINT_URL").ok(),
            configuration_set_name: std::env::var("TEMPS_SES_CONFIGURATION_SET").ok(),
            debug,
        }
    }

    pub fn with_credentials(
        mut self,
        access_key_id: impl Into<String>,
        secret_access_key: impl Into<String>,
    ) -> Self {
        self.credentials = Some(SesCredentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        });
        self
    }

    pub fn with_endpoint_url(mut self, endpoint_url: impl Into<String>) -> Self {
        self.endpoint_url = Some(endpoint_url.into());
        self
    }

    pub fn with_configuration_set(mut self, name: impl Into<String>) -> Self {
        self.configuration_set_name = Some(name.into());
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn validate(&self) -> Result<(), TransportError> {
        if self.region.trim().is_empty() {
            return Err(TransportError::Configuration(
                "region must not be empty".to_string(),
            ));
        }

        if let Some(ref creds) = self.credentials {
            if creds.access_key_id.trim().is_empty() || creds.secret_access_key.trim().is_empty()
            {
                return Err(TransportError::Configuration(
                    "access key id and secret access key are both required".to_string(),
                ));
            }
        }

        if let Some(ref endpoint) = self.endpoint_url {
            url::Url::parse(endpoint).map_err(|e| {
                TransportError::Configuration(format!("invalid endpoint url '{}': {}", endpoint, e))
            })?;
        }

        Ok(())
    }

    pub fn debug_sink(&self) -> DebugSink {
        if self.debug {
            DebugSink::Log
        } else {
            DebugSink::Off
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-wide; serialise every test that touches them.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const ENV_VARS: [&str; 5] = [
        "TEMPS_SES_REGION",
        "AWS_REGION",
        "TEMPS_SES_DEBUG",
        "TEMPS_SES_ENDPOINT_URL",
        "TEMPS_SES_CONFIGURATION_SET",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_from_env() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let saved: Vec<_> = ENV_VARS.iter().map(|v| (*v, std::env::var(v).ok())).collect();
        clear_env();

        // Nothing set: default region, debug off, no optional values
        let config = SesTransportConfig::from_env();
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(!config.debug);
        assert!(config.endpoint_url.is_none());
        assert!(config.configuration_set_name.is_none());

        // AWS_REGION is the fallback
        std::env::set_var("AWS_REGION", "eu-west-2");
        assert_eq!(SesTransportConfig::from_env().region, "eu-west-2");

        // TEMPS_SES_REGION wins over AWS_REGION
        std::env::set_var("TEMPS_SES_REGION", "ap-southeast-1");
        assert_eq!(SesTransportConfig::from_env().region, "ap-southeast-1");

        for truthy in ["1", "true", "YES", "On"] {
            std::env::set_var("TEMPS_SES_DEBUG", truthy);
            assert!(SesTransportConfig::from_env().debug, "{truthy} should enable debug");
        }
        for falsy in ["0", "false", "off", ""] {
            std::env::set_var("TEMPS_SES_DEBUG", falsy);
            assert!(!SesTransportConfig::from_env().debug, "{falsy} should not enable debug");
        }

        std::env::set_var("TEMPS_SES_ENDPOINT_URL", "http://localhost:4566");
        std::env::set_var("TEMPS_SES_CONFIGURATION_SET", "transactional");
        let config = SesTransportConfig::from_env();
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
        assert_eq!(config.configuration_set_name.as_deref(), Some("transactional"));
        assert!(config.credentials.is_none());

        clear_env();
        for (var, value) in saved {
            if let Some(value) = value {
                std::env::set_var(var, value);
            }
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SesTransportConfig::default();
        assert_eq!(config.region, DEFAULT_REGION);
        assert!(config.validate().is_ok());
        assert!(!config.debug_sink().is_enabled());
    }

    #[test]
    fn test_empty_region_rejected() {
        let config = SesTransportConfig::new("  ");
        assert!(matches!(
            config.validate(),
            Err(TransportError::Configuration(_))
        ));
    }

    #[test]
    fn test_blank_credentials_rejected() {
        let config = SesTransportConfig::new("eu-west-1").with_credentials("AKIAEXAMPLE", "");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let config = SesTransportConfig::new("eu-west-1").with_endpoint_url("not a url");
        assert!(config.validate().is_err());

        let config = SesTransportConfig::new("eu-west-1").with_endpoint_url("http://localhost:4566");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_debug_flag_selects_log_sink() {
        let config = SesTransportConfig::new("eu-west-1").with_debug(true);
        assert!(matches!(config.debug_sink(), DebugSink::Log));
    }

    #[test]
    fn test_config_serialization_skips_empty_options() {
        let config = SesTransportConfig::new("eu-west-1");

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("eu-west-1"));
        assert!(!json.contains("endpoint_url"));
        assert!(!json.contains("credentials"));

        let parsed: SesTransportConfig =
            serde_json::from_str(r#"{"region":"eu-central-1","configuration_set_name":"tx"}"#)
                .unwrap();
        assert_eq!(parsed.region, "eu-central-1");
        assert_eq!(parsed.configuration_set_name.as_deref(), Some("tx"));
        assert!(!parsed.debug);
    }
}
