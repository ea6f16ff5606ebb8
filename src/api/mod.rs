// ==========================================
// 港口理货录入系统 - API 层
// ==========================================
// 职责: 面向显示层的接口（原始输入解析、表格视图、车辆选择、导出）
// ==========================================

pub mod error;
pub mod input;
pub mod tally_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use input::parse_field_update;
pub use tally_api::{GridRow, GridView, TallyApi, VehicleColumn};
