// ==========================================
// 港口理货录入系统 - 理货记录领域模型
// ==========================================
// 职责: 理货记录、录入上下文、可编辑字段、堆场历史汇总
// 红线: 已确认记录只读（解锁除外）
// ==========================================

use crate::domain::types::{MovementType, TallyMethod};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// TallyRecord - 理货记录
// ==========================================
// 用途: 表格中的一行，一次装卸作业的件数与净重
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyRecord {
    // ===== 主键 =====
    pub id: String,               // 记录唯一标识（创建后不可变）
    pub created_at: NaiveDateTime, // 创建时间（本地时间）

    // ===== 票据 =====
    pub bill_of_lading: String, // 提单号（直提/直装）
    pub yard_location: String,  // 堆场位置（入堆场）

    // ===== 理货方式与计算 =====
    pub tally_method: TallyMethod,
    pub unit_weight_t: f64, // 单件重量（吨）
    pub packs: u32,         // 件数（捆/包）
    pub pcs: u32,           // 每件支数
    pub loose: u32,         // 散件数

    // ===== 车辆 =====
    pub truck_no: String,   // 车牌号
    pub trailer_no: String, // 挂车号

    // ===== 作业上下文 =====
    pub hold_id: String,
    pub cargo_name: String,
    pub operation_mode: String, // 作业模式标签
    pub shore_crane: String,
    pub hold_forklift: String,
    pub crane_forklift: String,
    pub worker_team: String,

    // ===== 结果 =====
    pub net_t: f64,                 // 净重（吨，3位小数）
    pub movement_type: MovementType, // 装卸类型（创建时派生）
    pub confirmed: bool,            // 确认锁定
    pub notes: String,
}

impl TallyRecord {
    /// 创建时间的显示形式（精确到分钟）
    pub fn timestamp_label(&self, format: &str) -> String {
        self.created_at.format(format).to_string()
    }
}

// ==========================================
// TallyConfig - 新增记录的作业上下文
// ==========================================
// 由表头选择器提供，原样复制到新记录
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TallyConfig {
    pub bill_of_lading: String,
    pub yard_location: String,
    pub hold_id: String,
    pub cargo_name: String,
    pub operation_mode: String,
    pub shore_crane: String,
    pub hold_forklift: String,
    pub crane_forklift: String,
    pub worker_team: String,
}

// ==========================================
// TallyField - 可编辑字段名
// ==========================================
// 不含 id / created_at / confirmed / movement_type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TallyField {
    BillOfLading,
    YardLocation,
    TallyMethod,
    UnitWeight,
    Packs,
    Pcs,
    Loose,
    TruckNo,
    TrailerNo,
    HoldId,
    CargoName,
    OperationMode,
    ShoreCrane,
    HoldForklift,
    CraneForklift,
    WorkerTeam,
    Net,
    Notes,
}

impl TallyField {
    pub fn as_str(&self) -> &'static str {
        match self {
            TallyField::BillOfLading => "bill_of_lading",
            TallyField::YardLocation => "yard_location",
            TallyField::TallyMethod => "tally_method",
            TallyField::UnitWeight => "unit_weight",
            TallyField::Packs => "packs",
            TallyField::Pcs => "pcs",
            TallyField::Loose => "loose",
            TallyField::TruckNo => "truck_no",
            TallyField::TrailerNo => "trailer_no",
            TallyField::HoldId => "hold_id",
            TallyField::CargoName => "cargo_name",
            TallyField::OperationMode => "operation_mode",
            TallyField::ShoreCrane => "shore_crane",
            TallyField::HoldForklift => "hold_forklift",
            TallyField::CraneForklift => "crane_forklift",
            TallyField::WorkerTeam => "worker_team",
            TallyField::Net => "net",
            TallyField::Notes => "notes",
        }
    }

    /// 修改后是否触发净重重算
    pub fn triggers_net_recalc(&self) -> bool {
        matches!(
            self,
            TallyField::Packs | TallyField::Pcs | TallyField::UnitWeight | TallyField::TallyMethod
        )
    }
}

impl fmt::Display for TallyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TallyField {
    type Err = String;

    /// 同时接受 snake_case 与前端 camelCase 字段名
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let field = match s.trim() {
            "bill_of_lading" | "billOfLading" => TallyField::BillOfLading,
            "yard_location" | "yardLocation" => TallyField::YardLocation,
            "tally_method" | "tallyMethod" => TallyField::TallyMethod,
            "unit_weight" | "unit_weight_t" | "unitWeight" => TallyField::UnitWeight,
            "packs" => TallyField::Packs,
            "pcs" => TallyField::Pcs,
            "loose" => TallyField::Loose,
            "truck_no" | "truckNo" => TallyField::TruckNo,
            "trailer_no" | "trailerNo" => TallyField::TrailerNo,
            "hold_id" | "holdId" => TallyField::HoldId,
            "cargo_name" | "cargoName" => TallyField::CargoName,
            "operation_mode" | "operationMode" => TallyField::OperationMode,
            "shore_crane" | "shoreCrane" => TallyField::ShoreCrane,
            "hold_forklift" | "holdForklift" => TallyField::HoldForklift,
            "crane_forklift" | "craneForklift" => TallyField::CraneForklift,
            "worker_team" | "workerTeam" => TallyField::WorkerTeam,
            "net" | "net_t" => TallyField::Net,
            "notes" => TallyField::Notes,
            other => return Err(format!("不可编辑或未知字段: {}", other)),
        };
        Ok(field)
    }
}

// ==========================================
// FieldUpdate - 带类型的字段写入
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum FieldUpdate {
    BillOfLading(String),
    YardLocation(String),
    TallyMethod(TallyMethod),
    UnitWeight(f64),
    Packs(u32),
    Pcs(u32),
    Loose(u32),
    TruckNo(String),
    TrailerNo(String),
    HoldId(String),
    CargoName(String),
    OperationMode(String),
    ShoreCrane(String),
    HoldForklift(String),
    CraneForklift(String),
    WorkerTeam(String),
    Net(f64),
    Notes(String),
}

impl FieldUpdate {
    pub fn field(&self) -> TallyField {
        match self {
            FieldUpdate::BillOfLading(_) => TallyField::BillOfLading,
            FieldUpdate::YardLocation(_) => TallyField::YardLocation,
            FieldUpdate::TallyMethod(_) => TallyField::TallyMethod,
            FieldUpdate::UnitWeight(_) => TallyField::UnitWeight,
            FieldUpdate::Packs(_) => TallyField::Packs,
            FieldUpdate::Pcs(_) => TallyField::Pcs,
            FieldUpdate::Loose(_) => TallyField::Loose,
            FieldUpdate::TruckNo(_) => TallyField::TruckNo,
            FieldUpdate::TrailerNo(_) => TallyField::TrailerNo,
            FieldUpdate::HoldId(_) => TallyField::HoldId,
            FieldUpdate::CargoName(_) => TallyField::CargoName,
            FieldUpdate::OperationMode(_) => TallyField::OperationMode,
            FieldUpdate::ShoreCrane(_) => TallyField::ShoreCrane,
            FieldUpdate::HoldForklift(_) => TallyField::HoldForklift,
            FieldUpdate::CraneForklift(_) => TallyField::CraneForklift,
            FieldUpdate::WorkerTeam(_) => TallyField::WorkerTeam,
            FieldUpdate::Net(_) => TallyField::Net,
            FieldUpdate::Notes(_) => TallyField::Notes,
        }
    }

    /// 写入记录（不做锁定检查，不重算净重）
    pub fn apply_to(self, record: &mut TallyRecord) {
        match self {
            FieldUpdate::BillOfLading(v) => record.bill_of_lading = v,
            FieldUpdate::YardLocation(v) => record.yard_location = v,
            FieldUpdate::TallyMethod(v) => record.tally_method = v,
            FieldUpdate::UnitWeight(v) => record.unit_weight_t = v,
            FieldUpdate::Packs(v) => record.packs = v,
            FieldUpdate::Pcs(v) => record.pcs = v,
            FieldUpdate::Loose(v) => record.loose = v,
            FieldUpdate::TruckNo(v) => record.truck_no = v,
            FieldUpdate::TrailerNo(v) => record.trailer_no = v,
            FieldUpdate::HoldId(v) => record.hold_id = v,
            FieldUpdate::CargoName(v) => record.cargo_name = v,
            FieldUpdate::OperationMode(v) => record.operation_mode = v,
            FieldUpdate::ShoreCrane(v) => record.shore_crane = v,
            FieldUpdate::HoldForklift(v) => record.hold_forklift = v,
            FieldUpdate::CraneForklift(v) => record.crane_forklift = v,
            FieldUpdate::WorkerTeam(v) => record.worker_team = v,
            FieldUpdate::Net(v) => record.net_t = v,
            FieldUpdate::Notes(v) => record.notes = v,
        }
    }
}

// ==========================================
// LocationTotals / LocationHistory - 堆场位置历史
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationTotals {
    pub packs: u64,
    pub pcs: u64,
    pub loose: u64,
    pub net_t: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationHistory {
    pub yard_location: String,
    pub records: Vec<TallyRecord>,
    pub totals: LocationTotals,
}

impl LocationHistory {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse_accepts_both_cases() {
        assert_eq!("unitWeight".parse::<TallyField>(), Ok(TallyField::UnitWeight));
        assert_eq!("unit_weight".parse::<TallyField>(), Ok(TallyField::UnitWeight));
        assert_eq!("truckNo".parse::<TallyField>(), Ok(TallyField::TruckNo));
        assert!("confirmed".parse::<TallyField>().is_err());
        assert!("id".parse::<TallyField>().is_err());
        assert!("timestamp".parse::<TallyField>().is_err());
    }

    #[test]
    fn test_recalc_trigger_fields() {
        assert!(TallyField::Packs.triggers_net_recalc());
        assert!(TallyField::Pcs.triggers_net_recalc());
        assert!(TallyField::UnitWeight.triggers_net_recalc());
        assert!(TallyField::TallyMethod.triggers_net_recalc());
        // 散件数不参与净重公式
        assert!(!TallyField::Loose.triggers_net_recalc());
        assert!(!TallyField::Net.triggers_net_recalc());
    }

    #[test]
    fn test_field_update_serde_shape() {
        let json = serde_json::to_value(FieldUpdate::Packs(20)).unwrap();
        assert_eq!(json["field"], "packs");
        assert_eq!(json["value"], 20);

        let back: FieldUpdate =
            serde_json::from_str(r#"{"field":"tally_method","value":"SCALE"}"#).unwrap();
        assert_eq!(back, FieldUpdate::TallyMethod(TallyMethod::Scale));
    }
}
