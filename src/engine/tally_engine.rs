// ==========================================
// 港口理货录入系统 - 理货引擎
// ==========================================
// 职责: 持有理货记录集合，处理字段编辑、净重重算、确认/解锁
// 红线: 已确认记录禁止字段编辑；所有变更经由引擎操作
// 并发: 单一所有者，同步调用，无内部锁
// ==========================================

use crate::config::TallyEngineConfig;
use crate::domain::tally::{
    FieldUpdate, LocationHistory, LocationTotals, TallyConfig, TallyRecord,
};
use crate::domain::types::{OperationDirection, TallyMethod};
use crate::engine::clock::{Clock, SystemClock};
use crate::engine::error::{TallyError, TallyResult};
use crate::engine::events::{OptionalEventPublisher, TallyEvent, TallyEventType};
use crate::engine::net_weight::NetWeightCore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, warn};

// ==========================================
// TallyEngine
// ==========================================
pub struct TallyEngine {
    // 最新记录在前
    records: Vec<TallyRecord>,
    config: TallyEngineConfig,
    clock: Arc<dyn Clock>,
    publisher: OptionalEventPublisher,
    last_id_seq: i64,
}

impl TallyEngine {
    /// 使用系统时钟创建空引擎
    pub fn new(config: TallyEngineConfig) -> Self {
        Self::with_clock(config, Arc::new(SystemClock))
    }

    /// 指定时间源创建空引擎
    pub fn with_clock(config: TallyEngineConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            records: Vec::new(),
            config,
            clock,
            publisher: OptionalEventPublisher::none(),
            last_id_seq: 0,
        }
    }

    /// 挂接事件发布者
    pub fn with_publisher(mut self, publisher: OptionalEventPublisher) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn config(&self) -> &TallyEngineConfig {
        &self.config
    }

    /// 全部记录（最新在前）
    pub fn records(&self) -> &[TallyRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&TallyRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// 作业模式对应的方向标签（未登记返回 None）
    pub fn direction_of(&self, operation_mode: &str) -> Option<OperationDirection> {
        self.config.operation_modes.direction_of(operation_mode)
    }

    // ==========================================
    // 变更操作
    // ==========================================

    /// 新增记录
    ///
    /// 上下文字段原样复制；件数为 0，单重取默认值，方式为 UNSPECIFIED；
    /// 装卸类型按作业模式判定一次。插入到集合头部。
    pub fn add_record(&mut self, config: TallyConfig) -> TallyRecord {
        let id = self.next_id();
        let movement_type = self
            .config
            .operation_modes
            .movement_type_of(&config.operation_mode);

        let record = TallyRecord {
            id,
            created_at: self.clock.now(),
            bill_of_lading: config.bill_of_lading,
            yard_location: config.yard_location,
            tally_method: TallyMethod::Unspecified,
            unit_weight_t: self.config.default_unit_weight_t,
            packs: 0,
            pcs: 0,
            loose: 0,
            truck_no: String::new(),
            trailer_no: String::new(),
            hold_id: config.hold_id,
            cargo_name: config.cargo_name,
            operation_mode: config.operation_mode,
            shore_crane: config.shore_crane,
            hold_forklift: config.hold_forklift,
            crane_forklift: config.crane_forklift,
            worker_team: config.worker_team,
            net_t: 0.0,
            movement_type,
            confirmed: false,
            notes: String::new(),
        };

        info!(
            record_id = %record.id,
            hold_id = %record.hold_id,
            operation_mode = %record.operation_mode,
            movement_type = %record.movement_type,
            "新增理货记录"
        );

        self.records.insert(0, record.clone());
        self.publish_for(TallyEventType::RecordAdded, &record);
        record
    }

    /// 单字段编辑
    ///
    /// # 返回
    /// - Ok(TallyRecord): 更新后的记录
    /// - Err(NotFound / LockViolation): 拒绝，状态不变
    ///
    /// # 规则
    /// - packs / pcs / unit_weight / tally_method 变更且方式可推导时重算净重
    /// - net 直接写入不受方式限制
    pub fn update_field(&mut self, id: &str, update: FieldUpdate) -> TallyResult<TallyRecord> {
        let decimals = self.config.net_decimals;
        let record = self.find_unlocked_mut(id)?;

        let field = update.field();
        update.apply_to(record);

        if field.triggers_net_recalc() {
            if let Some(net) = NetWeightCore::derive_net(record, decimals) {
                record.net_t = net;
            }
        }

        debug!(
            record_id = %record.id,
            field = %field,
            tally_method = %record.tally_method,
            net_t = record.net_t,
            "字段更新"
        );

        let snapshot = record.clone();
        self.publish_for(TallyEventType::RecordUpdated, &snapshot);
        Ok(snapshot)
    }

    /// 方式与单重联合设置，之后强制重算净重
    pub fn set_tally_method(
        &mut self,
        id: &str,
        method: TallyMethod,
        unit_weight_t: f64,
    ) -> TallyResult<TallyRecord> {
        let decimals = self.config.net_decimals;
        let record = self.find_unlocked_mut(id)?;

        record.tally_method = method;
        record.unit_weight_t = unit_weight_t;
        record.net_t = NetWeightCore::resolve_net(record, decimals);

        debug!(
            record_id = %record.id,
            tally_method = %method,
            unit_weight_t,
            net_t = record.net_t,
            "设置理货方式"
        );

        let snapshot = record.clone();
        self.publish_for(TallyEventType::RecordUpdated, &snapshot);
        Ok(snapshot)
    }

    /// 确认/解锁切换
    ///
    /// 不校验方式与净重；UNSPECIFIED 记录确认时仅记录警告
    pub fn toggle_confirm(&mut self, id: &str) -> TallyResult<TallyRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| TallyError::NotFound {
                record_id: id.to_string(),
            })?;

        record.confirmed = !record.confirmed;

        let event_type = if record.confirmed {
            if record.tally_method == TallyMethod::Unspecified {
                warn!(record_id = %record.id, net_t = record.net_t, "确认了未选择理货方式的记录");
            }
            info!(record_id = %record.id, net_t = record.net_t, "记录已确认锁定");
            TallyEventType::RecordConfirmed
        } else {
            info!(record_id = %record.id, "记录已解锁");
            TallyEventType::RecordUnlocked
        };

        let snapshot = record.clone();
        self.publish_for(event_type, &snapshot);
        Ok(snapshot)
    }

    /// 整体替换记录集合（刷新）
    ///
    /// 存在重复ID时拒绝，状态不变
    pub fn replace_records(&mut self, records: Vec<TallyRecord>) -> TallyResult<()> {
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id.as_str())) {
            warn!(record_id = %dup.id, "重新加载被拒绝: 记录ID重复");
            return Err(TallyError::DuplicateRecordId(dup.id.clone()));
        }

        info!(count = records.len(), "重新加载理货记录");
        self.records = records;
        self.publish(TallyEvent::full_scope(TallyEventType::RecordsReloaded));
        Ok(())
    }

    // ==========================================
    // 查询操作
    // ==========================================

    /// 按 (作业模式, 舱位) 精确过滤，保持引擎顺序
    pub fn filter_by_context(&self, operation_mode: &str, hold_id: &str) -> Vec<&TallyRecord> {
        self.records
            .iter()
            .filter(|r| r.operation_mode == operation_mode && r.hold_id == hold_id)
            .collect()
    }

    /// 堆场位置历史：已确认且三键匹配的记录及合计
    pub fn location_history(
        &self,
        yard_location: &str,
        operation_mode: &str,
        hold_id: &str,
    ) -> LocationHistory {
        let records: Vec<TallyRecord> = self
            .records
            .iter()
            .filter(|r| {
                r.confirmed
                    && r.yard_location == yard_location
                    && r.operation_mode == operation_mode
                    && r.hold_id == hold_id
            })
            .cloned()
            .collect();

        let mut totals = records
            .iter()
            .fold(LocationTotals::default(), |mut acc, r| {
                acc.packs += u64::from(r.packs);
                acc.pcs += u64::from(r.pcs);
                acc.loose += u64::from(r.loose);
                acc.net_t += r.net_t;
                acc
            });
        totals.net_t = NetWeightCore::round_to(totals.net_t, self.config.net_decimals);

        LocationHistory {
            yard_location: yard_location.to_string(),
            records,
            totals,
        }
    }

    /// 方式编辑器初始值
    ///
    /// UNSPECIFIED 默认为 AVERAGE；已确认记录不可打开编辑器
    pub fn method_editor_defaults(&self, id: &str) -> TallyResult<(TallyMethod, f64)> {
        let record = self.get(id).ok_or_else(|| TallyError::NotFound {
            record_id: id.to_string(),
        })?;

        if record.confirmed {
            return Err(TallyError::LockViolation {
                record_id: id.to_string(),
            });
        }

        let method = match record.tally_method {
            TallyMethod::Unspecified => TallyMethod::Average,
            m => m,
        };
        Ok((method, record.unit_weight_t))
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn find_unlocked_mut(&mut self, id: &str) -> TallyResult<&mut TallyRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| {
                warn!(record_id = %id, "编辑被拒绝: 记录不存在");
                TallyError::NotFound {
                    record_id: id.to_string(),
                }
            })?;

        if record.confirmed {
            warn!(record_id = %id, "编辑被拒绝: 记录已确认锁定");
            return Err(TallyError::LockViolation {
                record_id: id.to_string(),
            });
        }

        Ok(record)
    }

    /// 生成记录ID: "T" + 毫秒时间戳，单调递增且不与现有记录冲突
    fn next_id(&mut self) -> String {
        let millis = self.clock.now().and_utc().timestamp_millis();
        let mut seq = millis.max(self.last_id_seq + 1);
        loop {
            let candidate = format!("T{}", seq);
            if self.get(&candidate).is_none() {
                self.last_id_seq = seq;
                return candidate;
            }
            seq += 1;
        }
    }

    fn publish_for(&self, event_type: TallyEventType, record: &TallyRecord) {
        self.publish(TallyEvent::for_record(
            event_type,
            &record.id,
            &record.operation_mode,
            &record.hold_id,
        ));
    }

    // 发布失败不影响主操作
    fn publish(&self, event: TallyEvent) {
        let event_type = event.event_type;
        if let Err(e) = self.publisher.publish(event) {
            warn!(error = %e, event_type = event_type.as_str(), "事件发布失败");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::clock::FixedClock;
    use chrono::NaiveDate;

    fn engine() -> TallyEngine {
        let now = NaiveDate::from_ymd_opt(2025, 3, 1)
            .unwrap()
            .and_hms_opt(8, 15, 42)
            .unwrap();
        TallyEngine::with_clock(TallyEngineConfig::default(), Arc::new(FixedClock(now)))
    }

    fn yard_config(hold_id: &str) -> TallyConfig {
        TallyConfig {
            yard_location: "Bãi A1".to_string(),
            hold_id: hold_id.to_string(),
            cargo_name: "Tole nóng".to_string(),
            operation_mode: "Nhập bãi".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_add_record_defaults() {
        let mut engine = engine();
        let r = engine.add_record(yard_config("H1"));

        assert_eq!(r.tally_method, TallyMethod::Unspecified);
        assert_eq!(r.unit_weight_t, 0.05);
        assert_eq!((r.packs, r.pcs, r.loose), (0, 0, 0));
        assert_eq!(r.net_t, 0.0);
        assert!(!r.confirmed);
        assert_eq!(r.timestamp_label("%H:%M"), "08:15");
        assert_eq!(engine.records()[0].id, r.id);
    }

    #[test]
    fn test_ids_unique_under_fixed_clock() {
        let mut engine = engine();
        let a = engine.add_record(yard_config("H1"));
        let b = engine.add_record(yard_config("H1"));
        let c = engine.add_record(yard_config("H2"));
        assert_ne!(a.id, b.id);
        assert_ne!(b.id, c.id);
        assert_ne!(a.id, c.id);
        // 最新在前
        assert_eq!(engine.records()[0].id, c.id);
        assert_eq!(engine.records()[2].id, a.id);
    }

    #[test]
    fn test_update_recalculates_for_derivable_method() {
        let mut engine = engine();
        let id = engine.add_record(yard_config("H1")).id;

        engine
            .update_field(&id, FieldUpdate::TallyMethod(TallyMethod::Average))
            .unwrap();
        engine.update_field(&id, FieldUpdate::Packs(20)).unwrap();
        let r = engine.update_field(&id, FieldUpdate::Pcs(1000)).unwrap();
        assert_eq!(r.net_t, 1000.0);
    }

    #[test]
    fn test_update_skips_recalc_for_unspecified() {
        let mut engine = engine();
        let id = engine.add_record(yard_config("H1")).id;

        engine.update_field(&id, FieldUpdate::Packs(20)).unwrap();
        let r = engine.update_field(&id, FieldUpdate::Pcs(1000)).unwrap();
        assert_eq!(r.net_t, 0.0);
    }

    #[test]
    fn test_locked_record_rejects_edits() {
        let mut engine = engine();
        let id = engine.add_record(yard_config("H1")).id;
        engine.toggle_confirm(&id).unwrap();

        let err = engine.update_field(&id, FieldUpdate::Packs(5)).unwrap_err();
        assert_eq!(err, TallyError::LockViolation { record_id: id.clone() });

        let err = engine
            .set_tally_method(&id, TallyMethod::Scale, 0.1)
            .unwrap_err();
        assert_eq!(err, TallyError::LockViolation { record_id: id.clone() });
        assert_eq!(engine.get(&id).unwrap().packs, 0);
    }

    #[test]
    fn test_not_found() {
        let mut engine = engine();
        assert_eq!(
            engine.toggle_confirm("T0").unwrap_err(),
            TallyError::NotFound {
                record_id: "T0".to_string()
            }
        );
        assert!(engine.update_field("T0", FieldUpdate::Loose(1)).is_err());
        assert!(engine.method_editor_defaults("T0").is_err());
    }

    #[test]
    fn test_method_editor_defaults() {
        let mut engine = engine();
        let id = engine.add_record(yard_config("H1")).id;
        assert_eq!(
            engine.method_editor_defaults(&id).unwrap(),
            (TallyMethod::Average, 0.05)
        );

        engine.set_tally_method(&id, TallyMethod::Mark, 0.2).unwrap();
        assert_eq!(
            engine.method_editor_defaults(&id).unwrap(),
            (TallyMethod::Mark, 0.2)
        );

        engine.toggle_confirm(&id).unwrap();
        assert!(matches!(
            engine.method_editor_defaults(&id),
            Err(TallyError::LockViolation { .. })
        ));
    }

    #[test]
    fn test_replace_records_rejects_duplicates() {
        let mut engine = engine();
        let r = engine.add_record(yard_config("H1"));

        let err = engine
            .replace_records(vec![r.clone(), r.clone()])
            .unwrap_err();
        assert_eq!(err, TallyError::DuplicateRecordId(r.id.clone()));
        assert_eq!(engine.len(), 1);

        engine.replace_records(Vec::new()).unwrap();
        assert!(engine.is_empty());
    }
}
