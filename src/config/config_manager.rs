// ==========================================
// 港口理货录入系统 - 配置管理器
// ==========================================
// 职责: 配置加载、默认值、校验
// 存储: <config_dir>/port-tally/config.json
// ==========================================

use crate::config::operation_modes::OperationModeCatalog;
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// 配置文件路径覆盖环境变量
pub const CONFIG_PATH_ENV: &str = "PORT_TALLY_CONFIG";

/// 净重小数位上限
const MAX_NET_DECIMALS: u32 = 6;

// ==========================================
// ConfigError - 配置错误
// ==========================================
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置项无效 (key={key}): {message}")]
    Invalid { key: String, message: String },
}

// ==========================================
// TallyEngineConfig - 引擎配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyEngineConfig {
    /// 新记录默认单重（吨）
    pub default_unit_weight_t: f64,
    /// 净重保留小数位
    pub net_decimals: u32,
    /// 时间显示格式（chrono strftime）
    pub timestamp_format: String,
    /// 作业模式目录
    pub operation_modes: OperationModeCatalog,
}

impl Default for TallyEngineConfig {
    fn default() -> Self {
        Self {
            default_unit_weight_t: 0.05,
            net_decimals: 3,
            timestamp_format: "%H:%M".to_string(),
            operation_modes: OperationModeCatalog::default(),
        }
    }
}

impl TallyEngineConfig {
    /// 从 JSON 文本解析并校验
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: TallyEngineConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_unit_weight_t.is_finite() || self.default_unit_weight_t < 0.0 {
            return Err(ConfigError::Invalid {
                key: "default_unit_weight_t".to_string(),
                message: format!("必须为非负有限数, 实际={}", self.default_unit_weight_t),
            });
        }

        if self.net_decimals > MAX_NET_DECIMALS {
            return Err(ConfigError::Invalid {
                key: "net_decimals".to_string(),
                message: format!("不能超过 {}, 实际={}", MAX_NET_DECIMALS, self.net_decimals),
            });
        }

        if self.timestamp_format.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "timestamp_format".to_string(),
                message: "不能为空".to_string(),
            });
        }

        // 格式串在显示时才展开，非法占位符必须在加载时拒绝
        if StrftimeItems::new(&self.timestamp_format).any(|item| matches!(item, Item::Error)) {
            return Err(ConfigError::Invalid {
                key: "timestamp_format".to_string(),
                message: format!("非法时间格式: {}", self.timestamp_format),
            });
        }

        if let Some(label) = self.operation_modes.find_duplicate_label() {
            return Err(ConfigError::Invalid {
                key: "operation_modes".to_string(),
                message: format!("作业模式标签重复: {}", label),
            });
        }

        Ok(())
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("port-tally").join("config.json"))
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    path: Option<PathBuf>,
}

impl ConfigManager {
    /// 指定配置文件路径
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// 路径优先级: 环境变量 PORT_TALLY_CONFIG > 系统配置目录
    pub fn from_env_or_default() -> Self {
        let path = std::env::var_os(CONFIG_PATH_ENV)
            .map(PathBuf::from)
            .or_else(default_config_path);
        Self { path }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// 加载配置
    ///
    /// # 返回
    /// - 文件不存在或无路径: 默认配置
    /// - 文件存在: 解析并校验后的配置
    pub fn load(&self) -> Result<TallyEngineConfig, ConfigError> {
        let path = match &self.path {
            Some(p) if p.exists() => p,
            Some(p) => {
                info!(path = %p.display(), "配置文件不存在，使用默认配置");
                return Ok(TallyEngineConfig::default());
            }
            None => {
                info!("未找到配置目录，使用默认配置");
                return Ok(TallyEngineConfig::default());
            }
        };

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = TallyEngineConfig::from_json(&raw)?;
        debug!(
            path = %path.display(),
            default_unit_weight_t = config.default_unit_weight_t,
            net_decimals = config.net_decimals,
            "配置加载完成"
        );
        Ok(config)
    }
}
