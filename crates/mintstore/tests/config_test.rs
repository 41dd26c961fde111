//! Configuration loading and validation tests

use mintstore::{ConfigLoader, StoreConfig, StoreProviderKind};

#[test]
fn test_defaults_when_no_sources_present() {
    figment::Jail::expect_with(|_jail| {
        let config = ConfigLoader::new().load().unwrap();
        assert_eq!(config.provider, StoreProviderKind::Memory);
        assert_eq!(config.herd_timeout_secs, 60);
        assert!(config.fault_tolerant);
        assert!(config.herd);
        Ok(())
    });
}

#[test]
fn test_toml_file_overrides_defaults() {
    figment::Jail::expect_with(|jail| {
        jail.create_file(
            "mintstore.toml",
            r#"
                provider = "null"
                herd_timeout_secs = 5
                fault_tolerant = false
            "#,
        )?;
        let config = ConfigLoader::new()
            .with_config_path("mintstore.toml")
            .load()
            .unwrap();
        assert_eq!(config.provider, StoreProviderKind::Null);
        assert_eq!(config.herd_timeout_secs, 5);
        assert!(!config.fault_tolerant);
        // Untouched keys keep their defaults
        assert!(config.herd);
        Ok(())
    });
}

#[test]
fn test_env_overrides_toml() {
    figment::Jail::expect_with(|jail| {
        jail.create_file("mintstore.toml", "herd_timeout_secs = 5")?;
        jail.set_env("MINTSTORE_HERD_TIMEOUT_SECS", "120");
        jail.set_env("MINTSTORE_PROVIDER", "redis");
        jail.set_env("MINTSTORE_REDIS_URL", "redis://127.0.0.1:6379");

        let config = ConfigLoader::new()
            .with_config_path("mintstore.toml")
            .load()
            .unwrap();
        assert_eq!(config.herd_timeout_secs, 120);
        assert_eq!(config.provider, StoreProviderKind::Redis);
        assert_eq!(config.redis_url.as_deref(), Some("redis://127.0.0.1:6379"));
        Ok(())
    });
}

#[test]
fn test_custom_env_prefix() {
    figment::Jail::expect_with(|jail| {
        jail.set_env("APP_HERD_TIMEOUT_SECS", "7");
        let config = ConfigLoader::new().with_env_prefix("APP").load().unwrap();
        assert_eq!(config.herd_timeout_secs, 7);
        Ok(())
    });
}

#[test]
fn test_missing_config_file_is_not_an_error() {
    figment::Jail::expect_with(|_jail| {
        let config = ConfigLoader::new()
            .with_config_path("does-not-exist.toml")
            .load()
            .unwrap();
        assert_eq!(config.provider, StoreProviderKind::Memory);
        Ok(())
    });
}

#[test]
fn test_redis_provider_requires_url() {
    let config = StoreConfig {
        provider: StoreProviderKind::Redis,
        redis_url: None,
        ..StoreConfig::default()
    };
    let err = ConfigLoader::validate(&config).unwrap_err();
    assert!(err.to_string().contains("redis_url"));
}

#[test]
fn test_herd_requires_nonzero_grace_window() {
    let config = StoreConfig {
        herd_timeout_secs: 0,
        ..StoreConfig::default()
    };
    assert!(ConfigLoader::validate(&config).is_err());

    // With herding off a zero grace window is fine
    let config = StoreConfig {
        herd_timeout_secs: 0,
        herd: false,
        ..StoreConfig::default()
    };
    assert!(ConfigLoader::validate(&config).is_ok());
}

#[test]
fn test_zero_max_value_bytes_rejected() {
    let config = StoreConfig {
        max_value_bytes: 0,
        ..StoreConfig::default()
    };
    assert!(ConfigLoader::validate(&config).is_err());
}
