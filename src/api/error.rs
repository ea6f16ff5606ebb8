// ==========================================
// 港口理货录入系统 - API层错误类型
// ==========================================
// 职责: 将引擎/导出错误转换为面向显示层的错误
// 说明: 所有拒绝都必须返回给调用方，显示层据此提示
// ==========================================

use crate::engine::TallyError;
use crate::exporter::ExportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("记录已确认锁定: {0}")]
    RecordLocked(String),

    #[error("业务规则违反: {0}")]
    BusinessRuleViolation(String),

    #[error("导出失败: {0}")]
    Export(#[from] ExportError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 TallyError 转换
// ==========================================
impl From<TallyError> for ApiError {
    fn from(err: TallyError) -> Self {
        match err {
            TallyError::NotFound { record_id } => {
                ApiError::NotFound(format!("理货记录(id={})不存在", record_id))
            }
            TallyError::LockViolation { record_id } => {
                ApiError::RecordLocked(format!("理货记录(id={})已确认，请先解锁", record_id))
            }
            TallyError::DuplicateRecordId(id) => {
                ApiError::BusinessRuleViolation(format!("记录ID重复: {}", id))
            }
        }
    }
}

impl ApiError {
    /// 是否为锁定拒绝
    pub fn is_lock_violation(&self) -> bool {
        matches!(self, ApiError::RecordLocked(_))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_error_conversion() {
        let err: ApiError = TallyError::LockViolation {
            record_id: "T1".to_string(),
        }
        .into();
        assert!(err.is_lock_violation());
        assert!(err.to_string().contains("T1"));

        let err: ApiError = TallyError::NotFound {
            record_id: "T2".to_string(),
        }
        .into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
