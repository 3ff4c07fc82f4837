//! Configuration loading and validation tests

use figment::Jail;
use slc_domain::error::Error;
use slc_infrastructure::config::loader::validate_app_config;
use slc_infrastructure::config::{AppConfig, CacheBackend, ConfigLoader};
use slc_infrastructure::constants::DEFAULT_LOG_LEVEL;
use tempfile::TempDir;

fn load() -> Result<AppConfig, figment::Error> {
    ConfigLoader::new().load().map_err(|e| e.to_string().into())
}

#[test]
fn test_defaults_without_sources() {
    Jail::expect_with(|_jail| {
        let config = load()?;

        assert!(config.cache.enabled);
        assert_eq!(config.cache.provider, CacheBackend::Moka);
        assert_eq!(config.cache.ttl_secs, 600);
        assert_eq!(config.cache.system_name, "Salesloft");
        assert!(config.cache.linked_systems.is_empty());
        assert_eq!(config.crm.timeout_secs, 30);
        assert!(config.crm.api_key.is_empty());
        assert_eq!(config.logging.level, DEFAULT_LOG_LEVEL);
        Ok(())
    });
}

#[test]
fn test_toml_file_in_working_directory() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "slc.toml",
            r#"
                [cache]
                ttl_secs = 120
                linked_systems = ["Salesforce"]

                [crm]
                base_url = "http://localhost:9000/v2"
            "#,
        )?;

        let config = load()?;

        assert_eq!(config.cache.ttl_secs, 120);
        assert_eq!(config.cache.linked_systems, vec!["Salesforce".to_string()]);
        assert_eq!(config.crm.base_url.as_deref(), Some("http://localhost:9000/v2"));
        // untouched keys keep their defaults
        assert_eq!(config.cache.max_capacity, 10_000);
        Ok(())
    });
}

#[test]
fn test_environment_overrides_file() {
    Jail::expect_with(|jail| {
        jail.create_file("slc.toml", "[cache]\nttl_secs = 120\n")?;
        jail.set_env("SLC_CACHE__TTL_SECS", "45");
        jail.set_env("SLC_CACHE__PROVIDER", "redis");
        jail.set_env("SLC_CRM__API_KEY", "secret");

        let config = load()?;

        assert_eq!(config.cache.ttl_secs, 45);
        assert_eq!(config.cache.provider, CacheBackend::Redis);
        assert_eq!(config.crm.api_key, "secret");
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    Jail::expect_with(|jail| {
        jail.set_env("COG_CACHE__SYSTEM_NAME", "Outreach");

        let config = ConfigLoader::new()
            .with_env_prefix("COG")
            .load()
            .map_err(|e| e.to_string())?;

        assert_eq!(config.cache.system_name, "Outreach");
        Ok(())
    });
}

#[test]
fn test_zero_ttl_is_rejected() {
    Jail::expect_with(|jail| {
        jail.set_env("SLC_CACHE__TTL_SECS", "0");

        let err = ConfigLoader::new().load().unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
        assert!(err.to_string().contains("TTL"));
        Ok(())
    });
}

#[test]
fn test_zero_ttl_allowed_when_disabled() {
    let mut config = AppConfig::default();
    config.cache.enabled = false;
    config.cache.ttl_secs = 0;

    assert!(validate_app_config(&config).is_ok());
}

#[test]
fn test_redis_requires_url() {
    let mut config = AppConfig::default();
    config.cache.provider = CacheBackend::Redis;
    config.cache.redis_url = None;

    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("Redis URL"));
}

#[test]
fn test_system_names_cannot_hold_separator() {
    let mut config = AppConfig::default();
    config.cache.linked_systems = vec!["Sales|force".to_string()];
    assert!(validate_app_config(&config).is_err());

    let mut config = AppConfig::default();
    config.cache.system_name = "  ".to_string();
    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_invalid_log_level_is_rejected() {
    let mut config = AppConfig::default();
    config.logging.level = "loud".to_string();

    let err = validate_app_config(&config).unwrap_err();
    assert!(err.to_string().contains("Invalid log level"));
}

#[test]
fn test_zero_timeout_is_rejected() {
    let mut config = AppConfig::default();
    config.crm.timeout_secs = 0;

    assert!(validate_app_config(&config).is_err());
}

#[test]
fn test_save_then_load() {
    Jail::expect_with(|jail| {
        let config_path = jail.directory().join("saved.toml");

        let mut original = AppConfig::default();
        original.cache.ttl_secs = 90;
        original.cache.linked_systems = vec!["Salesforce".to_string()];
        original.logging.json_format = true;

        let loader = ConfigLoader::new().with_config_path(&config_path);
        loader
            .save_to_file(&original, &config_path)
            .map_err(|e| e.to_string())?;

        let loaded = loader.load().map_err(|e| e.to_string())?;
        assert_eq!(loaded.cache, original.cache);
        assert!(loaded.logging.json_format);
        assert_eq!(loader.config_path(), Some(config_path.as_path()));
        Ok(())
    });
}

#[test]
fn test_missing_explicit_file_falls_back_to_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("absent.toml");

    Jail::expect_with(|_jail| {
        let config = ConfigLoader::new()
            .with_config_path(&missing)
            .load()
            .map_err(|e| e.to_string())?;
        assert_eq!(config, AppConfig::default());
        Ok(())
    });
}

#[test]
fn test_api_key_is_redacted_in_debug() {
    let mut config = AppConfig::default();
    config.crm.api_key = "super-secret".to_string();

    let debug = format!("{:?}", config.crm);
    assert!(!debug.contains("super-secret"));
    assert!(debug.contains("<redacted>"));
}
