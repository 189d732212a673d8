//! Integration tests for ltapp-config

use ltapp_config::*;
use std::io::Write;
use std::time::Duration;
use temp_env::with_vars;

#[test]
fn test_default_config_validation() {
    let config = LtappConfig::default();
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_config_loader_from_env() {
    let vars = vec![
        ("LTAPP_SERVER_PORT", Some("9090")),
        ("LTAPP_LOG_LEVEL", Some("debug")),
        ("LTAPP_CPU_THREADS", Some("4")),
        ("LTAPP_MEMORY_INTERVAL_MS", Some("250")),
        ("LTAPP_TRANSPORT_KIND", Some("sink")),
    ];

    with_vars(vars, || {
        let loader = ConfigLoader::new();
        let config = loader.from_env().unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.logging.level, LogLevel::Debug);
        assert_eq!(config.load.cpu_threads, 4);
        assert_eq!(config.load.memory_interval(), Duration::from_millis(250));
        assert_eq!(config.messaging.transport.kind, TransportKind::Sink);
    });
}

#[test]
fn test_invalid_env_value_is_reported() {
    with_vars(vec![("LTAPP_CPU_THREADS", Some("many"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::EnvError(_)));
    });
}

#[test]
fn test_env_override_still_validated() {
    with_vars(vec![("LTAPP_CPU_THREADS", Some("0"))], || {
        let err = ConfigLoader::new().from_env().unwrap_err();
        assert!(matches!(err, ConfigError::DomainError { .. }));
    });
}

#[test]
fn test_yaml_config_serialization() {
    let config = LtappConfig::default();
    let yaml = serde_yaml::to_string(&config).unwrap();

    let parsed: LtappConfig = serde_yaml::from_str(&yaml).unwrap();
    assert!(parsed.validate_all().is_ok());
    assert_eq!(parsed.messaging.topic, config.messaging.topic);
}

#[test]
fn test_comprehensive_config_file() {
    let yaml = r#"
server:
  bind_address: "0.0.0.0"
  port: 8181
  api_prefix: "/api"
  shutdown_timeout: 5

logging:
  level: warn
  format: json

load:
  cpu_threads: 8
  max_cpu_threads: 64
  cpu_stop_timeout_ms: 1500
  memory_chunk_bytes: 2097152
  memory_interval_ms: 50

messaging:
  topic: "student-topic"
  transport:
    kind: loopback
    channel_capacity: 512
"#;

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let config = ConfigLoader::with_prefix("LTAPP_FILE_TEST").from_file(file.path()).unwrap();
    assert_eq!(config.server.port, 8181);
    assert_eq!(config.server.shutdown_timeout, Duration::from_secs(5));
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.load.cpu_threads, 8);
    assert_eq!(config.load.memory_chunk_bytes, 2 * 1024 * 1024);
    assert_eq!(config.messaging.topic, "student-topic");
    assert_eq!(config.messaging.transport.channel_capacity, 512);
    // Unspecified fields keep their defaults
    assert_eq!(config.messaging.max_payload_chars, 10_000);
}

#[test]
fn test_json_config_file() {
    let json = r#"{ "load": { "cpu_threads": 2 }, "messaging": { "topic": "json-topic" } }"#;

    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = ConfigLoader::with_prefix("LTAPP_FILE_TEST").from_file(file.path()).unwrap();
    assert_eq!(config.load.cpu_threads, 2);
    assert_eq!(config.messaging.topic, "json-topic");
}

#[test]
fn test_sample_config_parses() {
    let sample = LtappConfig::generate_sample();
    let parsed: LtappConfig = serde_yaml::from_str(&sample).unwrap();
    assert!(parsed.validate_all().is_ok());
}
