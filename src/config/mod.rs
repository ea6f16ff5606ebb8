// ==========================================
// 港口理货录入系统 - 配置层
// ==========================================
// 职责: 引擎配置、作业模式目录
// 存储: JSON 配置文件（可选，缺省使用默认值）
// ==========================================

pub mod config_manager;
pub mod operation_modes;

// 重导出核心配置类型
pub use config_manager::{
    default_config_path, ConfigError, ConfigManager, TallyEngineConfig, CONFIG_PATH_ENV,
};
pub use operation_modes::{OperationModeCatalog, OperationModeGroup, OperationModeOption};
