// ==========================================
// 港口理货录入系统 - 领域模型层
// ==========================================
// 职责: 定义理货记录、参考数据、领域类型
// 红线: 不含引擎逻辑,不含 I/O
// ==========================================

pub mod catalog;
pub mod tally;
pub mod types;

// 重导出核心类型
pub use catalog::{Hold, ReferenceCatalog, Vehicle};
pub use tally::{
    FieldUpdate, LocationHistory, LocationTotals, TallyConfig, TallyField, TallyRecord,
};
pub use types::{HoldStatus, MovementType, OperationDirection, ReferenceField, TallyMethod};
