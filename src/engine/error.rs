// ==========================================
// 港口理货录入系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 所有错误均为拒绝（记录状态不变），无致命错误
// ==========================================

use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TallyError {
    #[error("记录未找到: id={record_id}")]
    NotFound { record_id: String },

    #[error("记录已确认锁定，禁止修改: id={record_id}")]
    LockViolation { record_id: String },

    #[error("记录ID重复: {0}")]
    DuplicateRecordId(String),
}

/// Result 类型别名
pub type TallyResult<T> = Result<T, TallyError>;
