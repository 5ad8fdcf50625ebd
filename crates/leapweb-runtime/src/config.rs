//! Processor and logging configuration

use std::env;

use leapweb_transport::{PolicySet, DEFAULT_ENDPOINT};

use crate::{RuntimeError, RuntimeResult};

/// Frame processor configuration
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessorConfig {
    /// Service endpoint URI
    pub endpoint: String,
    /// Ask the service to keep streaming while unfocused
    pub background_frames: bool,
    /// Send `focused` right after connecting
    pub focus_on_connect: bool,
    pub gestures: bool,
    pub optimize_hmd: bool,
    /// Capacity of the inbound message channel
    pub channel_capacity: usize,
    /// On a decode failure, drop the frame and keep going instead of
    /// returning the error to the caller
    pub drop_on_decode_error: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            background_frames: true,
            focus_on_connect: true,
            gestures: false,
            optimize_hmd: false,
            channel_capacity: 64,
            drop_on_decode_error: true,
        }
    }
}

impl ProcessorConfig {
    /// Defaults, overridden by `LEAPWEB_ENDPOINT`, `LEAPWEB_BACKGROUND`,
    /// `LEAPWEB_GESTURES` and `LEAPWEB_HMD` when set.
    pub fn from_env() -> RuntimeResult<Self> {
        let mut config = Self::default();
        if let Ok(endpoint) = env::var("LEAPWEB_ENDPOINT") {
            config.endpoint = endpoint;
        }
        if let Some(on) = env_flag("LEAPWEB_BACKGROUND")? {
            config.background_frames = on;
        }
        if let Some(on) = env_flag("LEAPWEB_GESTURES")? {
            config.gestures = on;
        }
        if let Some(on) = env_flag("LEAPWEB_HMD")? {
            config.optimize_hmd = on;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> RuntimeResult<()> {
        if !(self.endpoint.starts_with("ws://") || self.endpoint.starts_with("wss://")) {
            return Err(RuntimeError::Config(format!(
                "endpoint must be a ws:// or wss:// URI, got {}",
                self.endpoint
            )));
        }
        if self.channel_capacity == 0 {
            return Err(RuntimeError::Config("channel capacity must be non-zero".into()));
        }
        Ok(())
    }

    /// Initial service flags for this configuration
    pub fn policy(&self) -> PolicySet {
        PolicySet {
            background: self.background_frames,
            gestures: self.gestures,
            optimize_hmd: self.optimize_hmd,
            focus_on_connect: self.focus_on_connect,
        }
    }
}

fn env_flag(name: &str) -> RuntimeResult<Option<bool>> {
    match env::var(name) {
        Ok(raw) => parse_flag(&raw)
            .map(Some)
            .ok_or_else(|| RuntimeError::Config(format!("{}: expected a boolean, got {:?}", name, raw))),
        Err(_) => Ok(None),
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Logging configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "LEAPWEB_ENDPOINT",
        "LEAPWEB_BACKGROUND",
        "LEAPWEB_GESTURES",
        "LEAPWEB_HMD",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults() {
        let config = ProcessorConfig::default();
        assert_eq!(config.endpoint, "ws://localhost:6437/v6.json");
        assert!(config.background_frames);
        assert!(config.focus_on_connect);
        assert!(!config.gestures);
        assert!(!config.optimize_hmd);
        assert_eq!(config.channel_capacity, 64);
        assert!(config.drop_on_decode_error);
        assert!(config.validate().is_ok());
        assert_eq!(config.policy(), PolicySet::default());
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" ON "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }

    #[test]
    fn test_validate() {
        let config = ProcessorConfig {
            endpoint: "http://localhost".into(),
            ..ProcessorConfig::default()
        };
        assert!(matches!(config.validate(), Err(RuntimeError::Config(_))));

        let config = ProcessorConfig {
            channel_capacity: 0,
            ..ProcessorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env_overrides() {
        clear_env();
        env::set_var("LEAPWEB_ENDPOINT", "ws://10.0.0.2:6437/v6.json");
        env::set_var("LEAPWEB_BACKGROUND", "false");
        env::set_var("LEAPWEB_HMD", "1");

        let config = ProcessorConfig::from_env().unwrap();
        assert_eq!(config.endpoint, "ws://10.0.0.2:6437/v6.json");
        assert!(!config.background_frames);
        assert!(config.optimize_hmd);
        assert!(!config.gestures);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_flag() {
        clear_env();
        env::set_var("LEAPWEB_GESTURES", "sometimes");
        assert!(matches!(ProcessorConfig::from_env(), Err(RuntimeError::Config(_))));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_without_vars() {
        clear_env();
        assert_eq!(ProcessorConfig::from_env().unwrap(), ProcessorConfig::default());
    }
}
