// ==========================================
// 港口理货录入系统 - 理货 API
// ==========================================
// 职责: 显示层调用入口
// 1. 原始输入解析后转交引擎
// 2. 表格视图（过滤 + 显示元数据）
// 3. 车辆选择、堆场历史、导出
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::input::{check_weight, parse_field_update};
use crate::domain::catalog::{ReferenceCatalog, Vehicle};
use crate::domain::tally::{FieldUpdate, LocationHistory, TallyConfig, TallyField, TallyRecord};
use crate::domain::types::{ReferenceField, TallyMethod};
use crate::engine::TallyEngine;
use crate::exporter::write_records_csv;
use crate::i18n::t;
use serde::{Deserialize, Serialize};
use std::io::Write;
use tracing::{debug, warn};

// ==========================================
// 视图类型
// ==========================================

/// 车辆列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleColumn {
    Truck,
    Trailer,
}

/// 表格行
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRow {
    pub record: TallyRecord,
    pub time_label: String,
    pub method_label: String,
    /// 未确认才可编辑
    pub editable: bool,
    /// 未确认且方式为 SCALE / MANUAL 时净重可直接录入
    pub net_editable: bool,
}

/// 当前 (作业模式, 舱位) 的表格视图
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridView {
    pub operation_mode: String,
    pub hold_id: String,
    pub hold_name: Option<String>,
    pub reference_field: Option<ReferenceField>,
    pub reference_label: Option<String>,
    pub row_count: usize,
    pub rows: Vec<GridRow>,
}

// ==========================================
// TallyApi
// ==========================================
pub struct TallyApi {
    engine: TallyEngine,
    catalog: ReferenceCatalog,
}

impl TallyApi {
    pub fn new(engine: TallyEngine, catalog: ReferenceCatalog) -> Self {
        Self { engine, catalog }
    }

    pub fn engine(&self) -> &TallyEngine {
        &self.engine
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    // ==========================================
    // 变更接口
    // ==========================================

    /// 新增记录
    ///
    /// 舱位ID与作业模式不能为空；舱位目录只用于显示，不做存在性校验
    pub fn add_record(&mut self, config: TallyConfig) -> ApiResult<TallyRecord> {
        if config.hold_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("舱位ID不能为空".to_string()));
        }
        if config.operation_mode.trim().is_empty() {
            return Err(ApiError::InvalidInput("作业模式不能为空".to_string()));
        }

        Ok(self.engine.add_record(config))
    }

    /// 带类型的字段写入
    pub fn update_field(&mut self, id: &str, update: FieldUpdate) -> ApiResult<TallyRecord> {
        match &update {
            FieldUpdate::UnitWeight(v) => {
                check_weight(TallyField::UnitWeight, *v)?;
            }
            FieldUpdate::Net(v) => {
                check_weight(TallyField::Net, *v)?;
            }
            _ => {}
        }
        Ok(self.engine.update_field(id, update)?)
    }

    /// 原始文本字段写入（显示层输入框）
    pub fn update_field_raw(&mut self, id: &str, field: &str, raw: &str) -> ApiResult<TallyRecord> {
        let update = parse_field_update(field, raw).map_err(|e| {
            warn!(record_id = %id, field = %field, error = %e, "输入被拒绝");
            e
        })?;
        self.update_field(id, update)
    }

    /// 方式 + 单重联合设置（方式编辑器“应用”）
    pub fn set_tally_method(
        &mut self,
        id: &str,
        method: TallyMethod,
        unit_weight_t: f64,
    ) -> ApiResult<TallyRecord> {
        check_weight(TallyField::UnitWeight, unit_weight_t)?;
        Ok(self.engine.set_tally_method(id, method, unit_weight_t)?)
    }

    pub fn toggle_confirm(&mut self, id: &str) -> ApiResult<TallyRecord> {
        Ok(self.engine.toggle_confirm(id)?)
    }

    /// 方式编辑器初始值
    pub fn method_editor_defaults(&self, id: &str) -> ApiResult<(TallyMethod, f64)> {
        Ok(self.engine.method_editor_defaults(id)?)
    }

    /// 车辆选择器“确认”：写入车牌或挂车号
    pub fn assign_vehicle(
        &mut self,
        id: &str,
        column: VehicleColumn,
        plate: &str,
    ) -> ApiResult<TallyRecord> {
        let plate = plate.trim();
        if plate.is_empty() {
            return Err(ApiError::InvalidInput("请选择车辆".to_string()));
        }

        let update = match column {
            VehicleColumn::Truck => FieldUpdate::TruckNo(plate.to_string()),
            VehicleColumn::Trailer => FieldUpdate::TrailerNo(plate.to_string()),
        };
        self.update_field(id, update)
    }

    /// 整体替换记录（刷新）
    pub fn reload(&mut self, records: Vec<TallyRecord>) -> ApiResult<()> {
        Ok(self.engine.replace_records(records)?)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 表格视图
    pub fn grid_view(&self, operation_mode: &str, hold_id: &str) -> GridView {
        let timestamp_format = &self.engine.config().timestamp_format;
        let rows: Vec<GridRow> = self
            .engine
            .filter_by_context(operation_mode, hold_id)
            .into_iter()
            .map(|record| GridRow {
                time_label: record.timestamp_label(timestamp_format),
                method_label: t(record.tally_method.label_key()),
                editable: !record.confirmed,
                net_editable: !record.confirmed && record.tally_method.is_entered(),
                record: record.clone(),
            })
            .collect();

        let reference_field = self
            .engine
            .config()
            .operation_modes
            .reference_field_of(operation_mode);

        debug!(
            operation_mode = %operation_mode,
            hold_id = %hold_id,
            rows = rows.len(),
            "生成表格视图"
        );

        GridView {
            operation_mode: operation_mode.to_string(),
            hold_id: hold_id.to_string(),
            hold_name: self.catalog.hold_name(hold_id).map(str::to_string),
            reference_label: reference_field.map(|f| t(f.label_key())),
            reference_field,
            row_count: rows.len(),
            rows,
        }
    }

    /// 堆场位置历史
    ///
    /// 位置为空时拒绝（显示层仅对有值的单元格提供历史入口）
    pub fn location_history(
        &self,
        yard_location: &str,
        operation_mode: &str,
        hold_id: &str,
    ) -> ApiResult<LocationHistory> {
        if yard_location.trim().is_empty() {
            return Err(ApiError::InvalidInput("堆场位置不能为空".to_string()));
        }
        Ok(self
            .engine
            .location_history(yard_location, operation_mode, hold_id))
    }

    /// 车辆检索
    pub fn search_vehicles(&self, term: &str) -> Vec<Vehicle> {
        self.catalog
            .search_vehicles(term)
            .into_iter()
            .cloned()
            .collect()
    }

    /// 导出当前表格为 CSV
    pub fn export_grid_csv<W: Write>(
        &self,
        operation_mode: &str,
        hold_id: &str,
        writer: W,
    ) -> ApiResult<usize> {
        let records = self.engine.filter_by_context(operation_mode, hold_id);
        let count = write_records_csv(
            writer,
            records,
            &self.engine.config().timestamp_format,
        )?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TallyEngineConfig;
    use crate::demo;

    fn api() -> TallyApi {
        TallyApi::new(
            TallyEngine::new(TallyEngineConfig::default()),
            demo::demo_catalog(),
        )
    }

    #[test]
    fn test_add_record_requires_context() {
        let mut api = api();
        let config = TallyConfig {
            hold_id: "H1".to_string(),
            ..Default::default()
        };
        assert!(matches!(api.add_record(config), Err(ApiError::InvalidInput(_))));

        let config = TallyConfig {
            hold_id: " ".to_string(),
            operation_mode: "Nhập bãi".to_string(),
            ..Default::default()
        };
        assert!(matches!(api.add_record(config), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_assign_vehicle_rejects_empty_plate() {
        let mut api = api();
        let id = api
            .add_record(TallyConfig {
                hold_id: "H1".to_string(),
                operation_mode: "Nhập bãi".to_string(),
                ..Default::default()
            })
            .unwrap()
            .id;

        assert!(api.assign_vehicle(&id, VehicleColumn::Truck, "  ").is_err());
        let r = api
            .assign_vehicle(&id, VehicleColumn::Trailer, "15R-001.22")
            .unwrap();
        assert_eq!(r.trailer_no, "15R-001.22");
        assert!(r.truck_no.is_empty());
    }

    #[test]
    fn test_location_history_requires_location() {
        let api = api();
        assert!(api.location_history("", "Nhập bãi", "H1").is_err());
        let history = api.location_history("Bãi A1", "Nhập bãi", "H1").unwrap();
        assert!(history.is_empty());
    }
}
