// ==========================================
// 港口理货录入系统 - 领域类型定义
// ==========================================
// 职责: 理货方式、作业方向、装卸类型、舱位状态等枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与前端一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 理货方式 (Tally Method)
// ==========================================
// 可推导: AVERAGE / STANDARD / MARK（净重由件数推算）
// 录入型: SCALE / MANUAL（净重人工录入）
// 无净重语义: ID / UNSPECIFIED
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TallyMethod {
    Average,  // 平均
    Standard, // 规格
    Mark,     // 唛头
    Id,       // 编码
    Scale,    // 过磅
    Manual,   // 手工录入
    #[default]
    Unspecified, // 未选择
}

impl TallyMethod {
    /// 净重是否由件数/单重推导
    pub fn is_derivable(&self) -> bool {
        matches!(
            self,
            TallyMethod::Average | TallyMethod::Standard | TallyMethod::Mark
        )
    }

    /// 净重是否由人工直接录入
    pub fn is_entered(&self) -> bool {
        matches!(self, TallyMethod::Scale | TallyMethod::Manual)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TallyMethod::Average => "AVERAGE",
            TallyMethod::Standard => "STANDARD",
            TallyMethod::Mark => "MARK",
            TallyMethod::Id => "ID",
            TallyMethod::Scale => "SCALE",
            TallyMethod::Manual => "MANUAL",
            TallyMethod::Unspecified => "UNSPECIFIED",
        }
    }

    /// 国际化标签键
    pub fn label_key(&self) -> &'static str {
        match self {
            TallyMethod::Average => "tally_method.average",
            TallyMethod::Standard => "tally_method.standard",
            TallyMethod::Mark => "tally_method.mark",
            TallyMethod::Id => "tally_method.id",
            TallyMethod::Scale => "tally_method.scale",
            TallyMethod::Manual => "tally_method.manual",
            TallyMethod::Unspecified => "tally_method.unspecified",
        }
    }
}

impl fmt::Display for TallyMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TallyMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "AVERAGE" => Ok(TallyMethod::Average),
            "STANDARD" => Ok(TallyMethod::Standard),
            "MARK" => Ok(TallyMethod::Mark),
            "ID" => Ok(TallyMethod::Id),
            "SCALE" => Ok(TallyMethod::Scale),
            "MANUAL" => Ok(TallyMethod::Manual),
            "UNSPECIFIED" => Ok(TallyMethod::Unspecified),
            other => Err(format!("未知理货方式: {}", other)),
        }
    }
}

// ==========================================
// 装卸类型 (Movement Type)
// ==========================================
// 创建时由作业方向派生一次，之后不变
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementType {
    Load,      // 装船
    Discharge, // 卸船
    Transfer,  // 过驳
}

impl fmt::Display for MovementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementType::Load => write!(f, "LOAD"),
            MovementType::Discharge => write!(f, "DISCHARGE"),
            MovementType::Transfer => write!(f, "TRANSFER"),
        }
    }
}

// ==========================================
// 参考列 (Reference Field)
// ==========================================
// 表格首列显示提单号还是堆场位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceField {
    BillOfLading, // 提单号
    YardLocation, // 堆场位置
}

impl ReferenceField {
    pub fn label_key(&self) -> &'static str {
        match self {
            ReferenceField::BillOfLading => "reference_field.bill_of_lading",
            ReferenceField::YardLocation => "reference_field.yard_location",
        }
    }
}

// ==========================================
// 作业方向 (Operation Direction)
// ==========================================
// 每个作业模式选项在配置时绑定一个方向标签，
// 引擎只消费标签，不再解析显示文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationDirection {
    YardImport,      // 卸船入堆场
    DirectToTruck,   // 卸船直提（船 -> 车）
    DirectToBarge,   // 卸船直取（船 -> 驳船）
    YardExport,      // 常规装船（堆场 -> 船）
    DirectFromTruck, // 直装（车 -> 船）
    DirectFromBarge, // 直装（驳船 -> 船）
}

impl OperationDirection {
    /// 是否装船方向
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            OperationDirection::YardExport
                | OperationDirection::DirectFromTruck
                | OperationDirection::DirectFromBarge
        )
    }

    /// 是否直提/直装（不经堆场）
    pub fn is_direct(&self) -> bool {
        !matches!(
            self,
            OperationDirection::YardImport | OperationDirection::YardExport
        )
    }

    pub fn movement_type(&self) -> MovementType {
        if self.is_loading() {
            MovementType::Load
        } else {
            MovementType::Discharge
        }
    }

    /// 表格参考列
    ///
    /// 直提/直装显示提单号，卸船入堆场显示堆场位置，
    /// 常规装船两者都不显示
    pub fn reference_field(&self) -> Option<ReferenceField> {
        match self {
            OperationDirection::YardImport => Some(ReferenceField::YardLocation),
            d if d.is_direct() => Some(ReferenceField::BillOfLading),
            _ => None,
        }
    }
}

impl fmt::Display for OperationDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OperationDirection::YardImport => "YARD_IMPORT",
            OperationDirection::DirectToTruck => "DIRECT_TO_TRUCK",
            OperationDirection::DirectToBarge => "DIRECT_TO_BARGE",
            OperationDirection::YardExport => "YARD_EXPORT",
            OperationDirection::DirectFromTruck => "DIRECT_FROM_TRUCK",
            OperationDirection::DirectFromBarge => "DIRECT_FROM_BARGE",
        };
        f.write_str(s)
    }
}

// ==========================================
// 舱位状态 (Hold Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HoldStatus {
    Pending, // 待作业
    Active,  // 作业中
    Done,    // 已完成
}

impl fmt::Display for HoldStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HoldStatus::Pending => write!(f, "Pending"),
            HoldStatus::Active => write!(f, "Active"),
            HoldStatus::Done => write!(f, "Done"),
        }
    }
}
