// ==========================================
// 配置加载集成测试
// ==========================================
// 测试范围: 配置文件加载、缺省回退、校验、自定义作业模式目录
// ==========================================

mod test_helpers;

use port_tally::config::{ConfigError, CONFIG_PATH_ENV};
use port_tally::engine::FixedClock;
use port_tally::{ConfigManager, MovementType, OperationDirection, TallyEngine, TallyEngineConfig};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use test_helpers::{test_now, ContextBuilder};

fn write_config(dir: &TempDir, body: &str) -> std::path::PathBuf {
    let path = dir.path().join("config.json");
    fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_missing_file_yields_defaults() {
    let dir = TempDir::new().unwrap();
    let manager = ConfigManager::new(dir.path().join("absent.json"));

    let config = manager.load().unwrap();
    assert_eq!(config, TallyEngineConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "default_unit_weight_t": 0.025 }"#);

    let config = ConfigManager::new(&path).load().unwrap();
    assert_eq!(config.default_unit_weight_t, 0.025);
    assert_eq!(config.net_decimals, 3);
    assert_eq!(config.timestamp_format, "%H:%M");
    assert_eq!(config.operation_modes.default_mode(), Some("Nhập bãi"));
}

#[test]
fn test_invalid_files_rejected() {
    let dir = TempDir::new().unwrap();

    let path = write_config(&dir, "{ not json");
    assert!(matches!(
        ConfigManager::new(&path).load(),
        Err(ConfigError::Parse(_))
    ));

    let path = write_config(&dir, r#"{ "net_decimals": 9 }"#);
    assert!(matches!(
        ConfigManager::new(&path).load(),
        Err(ConfigError::Invalid { ref key, .. }) if key == "net_decimals"
    ));

    let path = write_config(&dir, r#"{ "timestamp_format": "  " }"#);
    assert!(matches!(
        ConfigManager::new(&path).load(),
        Err(ConfigError::Invalid { ref key, .. }) if key == "timestamp_format"
    ));
}

#[test]
fn test_custom_operation_modes_drive_engine() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "default_unit_weight_t": 0.1,
            "timestamp_format": "%H:%M:%S",
            "operation_modes": {
                "groups": [
                    {
                        "label": "Discharge",
                        "options": [{ "label": "Yard in", "direction": "YARD_IMPORT" }]
                    },
                    {
                        "label": "Loading",
                        "options": [{ "label": "Truck to ship", "direction": "DIRECT_FROM_TRUCK" }]
                    }
                ]
            }
        }"#,
    );

    let config = ConfigManager::new(&path).load().unwrap();
    let mut engine = TallyEngine::with_clock(config, Arc::new(FixedClock(test_now())));

    assert_eq!(
        engine.direction_of("Truck to ship"),
        Some(OperationDirection::DirectFromTruck)
    );
    // 标签不含 "Xuất"，仍按方向标签判定为装船
    let load = engine.add_record(ContextBuilder::new("Truck to ship", "H1").build());
    assert_eq!(load.movement_type, MovementType::Load);
    assert_eq!(load.unit_weight_t, 0.1);
    assert_eq!(load.timestamp_label(&engine.config().timestamp_format), "08:15:00");

    let discharge = engine.add_record(ContextBuilder::new("Yard in", "H1").build());
    assert_eq!(discharge.movement_type, MovementType::Discharge);
}

#[test]
fn test_duplicate_mode_labels_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write_config(
        &dir,
        r#"{
            "operation_modes": {
                "groups": [
                    {
                        "label": "A",
                        "options": [
                            { "label": "Nhập bãi", "direction": "YARD_IMPORT" },
                            { "label": "Nhập bãi", "direction": "DIRECT_TO_TRUCK" }
                        ]
                    }
                ]
            }
        }"#,
    );

    let err = ConfigManager::new(&path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "operation_modes"));
}

#[test]
fn test_unknown_strftime_specifier_rejected_at_load() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "timestamp_format": "%Q" }"#);

    let err = ConfigManager::new(&path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { ref key, .. } if key == "timestamp_format"));
}

#[test]
fn test_env_var_overrides_config_path() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, r#"{ "default_unit_weight_t": 0.2, "net_decimals": 2 }"#);

    // 本测试二进制中唯一读写该环境变量的用例
    std::env::set_var(CONFIG_PATH_ENV, &path);
    let manager = ConfigManager::from_env_or_default();
    std::env::remove_var(CONFIG_PATH_ENV);

    assert_eq!(manager.path(), Some(path.as_path()));
    let config = manager.load().unwrap();
    assert_eq!(config.default_unit_weight_t, 0.2);
    assert_eq!(config.net_decimals, 2);
}
