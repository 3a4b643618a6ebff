use crate::regions::Coordinate;
use anyhow::Context;
use serde::Deserialize;
use shared_kernel::configuration::config;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct TimingsProviderConfig {
    pub host: String,
    pub calculation_method: u8,
    pub timeout_secs: u64,
}

impl TimingsProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct BoardSettings {
    pub region: String,
    pub refresh_interval_secs: u64,
    /// Best-effort position of the device. When present, the nearest region
    /// replaces `region`.
    #[serde(default)]
    pub position: Option<Coordinate>,
}

impl BoardSettings {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs.max(1))
    }
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub timings_provider: TimingsProviderConfig,
    pub board: BoardSettings,
}

impl Settings {
    pub fn parse() -> anyhow::Result<Settings> {
        config::<Settings>().context("Failed to deserialize settings to prayer_times settings")
    }
}

#[cfg(test)]
mod tests {
    use super::Settings;
    use shared_kernel::configuration::config_in;
    use std::time::Duration;

    const CONFIGURATION_DIRECTORY: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../configuration");

    #[test]
    fn test_shipped_base_configuration_deserializes() {
        let settings = config_in::<Settings>(CONFIGURATION_DIRECTORY, "base.yaml").unwrap();

        assert_eq!(settings.timings_provider.host, "https://api.aladhan.com");
        assert_eq!(settings.timings_provider.calculation_method, 11);
        assert_eq!(settings.timings_provider.timeout(), Duration::from_secs(10));
        assert_eq!(settings.board.refresh_interval(), Duration::from_secs(60));
        assert!(settings.board.position.is_none());
    }

    #[test]
    fn test_shipped_test_configuration_deserializes() {
        let settings = config_in::<Settings>(CONFIGURATION_DIRECTORY, "test.yaml").unwrap();

        assert_eq!(settings.timings_provider.calculation_method, 11);
        assert_eq!(settings.timings_provider.timeout(), Duration::from_secs(2));
        assert_eq!(settings.board.refresh_interval(), Duration::from_secs(1));
    }
}
