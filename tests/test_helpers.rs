// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 固定时钟引擎、作业上下文构建器、记录事件收集器
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use port_tally::engine::{Clock, FixedClock, TallyEvent, TallyEventPublisher};
use port_tally::{TallyConfig, TallyEngine, TallyEngineConfig};
use std::error::Error;
use std::sync::{Arc, Mutex};

pub const YARD_MODE: &str = "Nhập bãi";
pub const DIRECT_MODE: &str = "Nhập giao thẳng Tàu -> xe";
pub const LOADING_MODE: &str = "Xuất thông thường (Bãi -> Tàu)";

/// 测试基准时间 2025-03-01 08:15:00
pub fn test_now() -> NaiveDateTime {
    test_date().and_hms_opt(8, 15, 0).unwrap()
}

pub fn test_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 1).unwrap()
}

/// 固定时钟 + 默认配置的空引擎
pub fn create_test_engine() -> TallyEngine {
    port_tally::logging::init_test();
    let clock: Arc<dyn Clock> = Arc::new(FixedClock(test_now()));
    TallyEngine::with_clock(TallyEngineConfig::default(), clock)
}

// ==========================================
// TallyConfig 构建器
// ==========================================

pub struct ContextBuilder {
    config: TallyConfig,
}

impl ContextBuilder {
    pub fn new(operation_mode: &str, hold_id: &str) -> Self {
        Self {
            config: TallyConfig {
                hold_id: hold_id.to_string(),
                operation_mode: operation_mode.to_string(),
                cargo_name: "Tole nóng".to_string(),
                shore_crane: "Cẩu bờ 01".to_string(),
                hold_forklift: "Xe nâng 01".to_string(),
                crane_forklift: "Xe nâng 05".to_string(),
                worker_team: "Tổ 1".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn yard_location(mut self, location: &str) -> Self {
        self.config.yard_location = location.to_string();
        self
    }

    pub fn bill_of_lading(mut self, bl: &str) -> Self {
        self.config.bill_of_lading = bl.to_string();
        self
    }

    pub fn cargo(mut self, cargo: &str) -> Self {
        self.config.cargo_name = cargo.to_string();
        self
    }

    pub fn build(self) -> TallyConfig {
        self.config
    }
}

// ==========================================
// 事件收集器
// ==========================================

#[derive(Default)]
pub struct RecordingPublisher {
    pub events: Mutex<Vec<TallyEvent>>,
}

impl RecordingPublisher {
    pub fn snapshot(&self) -> Vec<TallyEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl TallyEventPublisher for RecordingPublisher {
    fn publish(&self, event: TallyEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.events.lock().unwrap().push(event);
        Ok(())
    }
}

/// 总是失败的发布者
pub struct FailingPublisher;

impl TallyEventPublisher for FailingPublisher {
    fn publish(&self, _event: TallyEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        Err("下游不可用".into())
    }
}
