//! Configuration integration tests

#[cfg(test)]
mod tests {
    use pms_access::Config;
    use pms_access::config::LogFormat;
    use pms_access::storage::Database;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
storage:
  database:
    url: "sqlite::memory:"
    max_connections: 1
group_sync:
  max_attempts: 4
  retry_backoff_ms: 50
logging:
  level: debug
  format: json
"#;

    #[tokio::test]
    async fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.database().url, "sqlite::memory:");
        assert_eq!(config.group_sync().max_attempts, 4);
        assert_eq!(config.logging().level, "debug");
        assert_eq!(config.logging().format, LogFormat::Json);
    }

    #[tokio::test]
    async fn test_missing_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(dir.path().join("missing.yaml"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn test_invalid_values_are_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"group_sync:\n  max_attempts: 0\n").unwrap();

        let err = Config::from_file(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("Group sync config error"));
    }

    #[tokio::test]
    async fn test_sqlite_file_database_is_created() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("access.db");
        let yaml = format!(
            "storage:\n  database:\n    url: \"sqlite://{}?mode=rwc\"\n",
            path.display()
        );

        let config = Config::from_yaml_str(&yaml).unwrap();
        let db = Database::new(config.database()).await.unwrap();
        db.migrate().await.unwrap();

        assert!(db.health_check().await.is_ok());
        assert!(path.exists());
    }
}
