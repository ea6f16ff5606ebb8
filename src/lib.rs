// ==========================================
// 港口理货录入系统 - 核心库
// ==========================================
// 系统定位: 理货表格状态机（件数 → 净重，确认锁定）
// 外部协作: 表头选择器、舱位/车辆目录、时钟
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "vi");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 理货规则
pub mod engine;

// 配置层 - 引擎配置与作业模式目录
pub mod config;

// 导出层 - CSV
pub mod exporter;

// API 层 - 显示层接口
pub mod api;

// 演示数据
pub mod demo;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    FieldUpdate, Hold, HoldStatus, LocationHistory, LocationTotals, MovementType,
    OperationDirection, ReferenceCatalog, ReferenceField, TallyConfig, TallyField, TallyMethod,
    TallyRecord, Vehicle,
};

pub use engine::{NetWeightCore, TallyEngine, TallyError, TallyResult};

pub use config::{ConfigManager, OperationModeCatalog, TallyEngineConfig};

pub use api::{ApiError, ApiResult, GridView, TallyApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "港口理货录入系统";
