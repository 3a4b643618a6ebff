use anyhow::Context;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Loads settings from `./configuration` relative to the working directory.
/// Reads `test.yaml` when `shared_kernel` itself is compiled for tests and
/// `base.yaml` otherwise.
pub fn config<Settings: DeserializeOwned>() -> anyhow::Result<Settings> {
    let base_path = std::env::current_dir().context("Failed to determine the current directory")?;
    let file = if cfg!(test) { "test.yaml" } else { "base.yaml" };
    config_in(base_path.join("configuration"), file)
}

/// Reads `file` from `configuration_directory`, then applies `APP_`
/// environment overrides, e.g. `APP_BOARD__REGION`.
pub fn config_in<Settings: DeserializeOwned>(
    configuration_directory: impl AsRef<Path>,
    file: &str,
) -> anyhow::Result<Settings> {
    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.as_ref().join(file)))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()
        .with_context(|| {
            format!(
                "Failed to build configuration from {}",
                configuration_directory.as_ref().join(file).display()
            )
        })?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}

#[cfg(test)]
mod tests {
    use super::config_in;
    use serde::Deserialize;
    use std::fs;

    #[derive(Deserialize, Debug)]
    struct Provider {
        host: String,
        timeout_secs: u64,
    }

    #[derive(Deserialize, Debug)]
    struct Settings {
        provider: Provider,
    }

    #[test]
    fn test_that_settings_are_read_from_the_test_file() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(
            directory.path().join("test.yaml"),
            "provider:\n  host: http://localhost:9000\n  timeout_secs: 3\n",
        )
        .unwrap();

        let settings = config_in::<Settings>(directory.path(), "test.yaml").unwrap();

        assert_eq!(settings.provider.host, "http://localhost:9000");
        assert_eq!(settings.provider.timeout_secs, 3);
    }

    #[test]
    fn test_missing_configuration_file_is_an_error() {
        let directory = tempfile::tempdir().unwrap();
        let result = config_in::<Settings>(directory.path(), "base.yaml");
        assert!(result.is_err());
    }

    #[test]
    fn test_only_the_named_file_is_read() {
        let directory = tempfile::tempdir().unwrap();
        fs::write(
            directory.path().join("base.yaml"),
            "provider:\n  host: https://api.example.com\n  timeout_secs: 10\n",
        )
        .unwrap();
        fs::write(
            directory.path().join("test.yaml"),
            "provider:\n  host: http://localhost:9000\n  timeout_secs: 3\n",
        )
        .unwrap();

        let settings = config_in::<Settings>(directory.path(), "base.yaml").unwrap();

        assert_eq!(settings.provider.host, "https://api.example.com");
        assert_eq!(settings.provider.timeout_secs, 10);
    }
}
