// ==========================================
// 港口理货录入系统 - 引擎层事件发布
// ==========================================
// 职责: 定义记录变更事件发布 trait
// 说明: Engine 层定义 trait，显示层实现适配器（触发重绘）
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::sync::Arc;

// ==========================================
// 记录事件类型
// ==========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyEventType {
    /// 新增记录
    RecordAdded,
    /// 字段变更（含净重重算）
    RecordUpdated,
    /// 确认锁定
    RecordConfirmed,
    /// 解锁
    RecordUnlocked,
    /// 整体重新加载
    RecordsReloaded,
}

impl TallyEventType {
    pub fn as_str(&self) -> &str {
        match self {
            TallyEventType::RecordAdded => "RecordAdded",
            TallyEventType::RecordUpdated => "RecordUpdated",
            TallyEventType::RecordConfirmed => "RecordConfirmed",
            TallyEventType::RecordUnlocked => "RecordUnlocked",
            TallyEventType::RecordsReloaded => "RecordsReloaded",
        }
    }
}

/// 记录事件
///
/// 单条记录事件携带记录ID与作业上下文，重新加载事件不携带
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyEvent {
    pub event_id: String,
    pub event_type: TallyEventType,
    pub record_id: Option<String>,
    pub operation_mode: Option<String>,
    pub hold_id: Option<String>,
}

impl TallyEvent {
    /// 单条记录事件
    pub fn for_record(
        event_type: TallyEventType,
        record_id: &str,
        operation_mode: &str,
        hold_id: &str,
    ) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            event_type,
            record_id: Some(record_id.to_string()),
            operation_mode: Some(operation_mode.to_string()),
            hold_id: Some(hold_id.to_string()),
        }
    }

    /// 全量事件
    pub fn full_scope(event_type: TallyEventType) -> Self {
        Self {
            event_id: uuid::Uuid::new_v4().to_string(),
            event_type,
            record_id: None,
            operation_mode: None,
            hold_id: None,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 记录事件发布者
pub trait TallyEventPublisher: Send + Sync {
    fn publish(&self, event: TallyEvent) -> Result<(), Box<dyn Error + Send + Sync>>;
}

/// 空操作事件发布者
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl TallyEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: TallyEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        tracing::debug!(
            "NoOpEventPublisher: 跳过事件发布 - event_type={}, record_id={:?}",
            event.event_type.as_str(),
            event.record_id
        );
        Ok(())
    }
}

/// 可选的事件发布者包装
#[derive(Clone)]
pub struct OptionalEventPublisher {
    inner: Option<Arc<dyn TallyEventPublisher>>,
}

impl OptionalEventPublisher {
    pub fn with_publisher(publisher: Arc<dyn TallyEventPublisher>) -> Self {
        Self {
            inner: Some(publisher),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 发布事件（如果有发布者）
    pub fn publish(&self, event: TallyEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        match &self.inner {
            Some(publisher) => publisher.publish(event),
            None => Ok(()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

impl Default for OptionalEventPublisher {
    fn default() -> Self {
        Self::none()
    }
}
