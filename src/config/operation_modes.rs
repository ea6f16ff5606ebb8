// ==========================================
// 港口理货录入系统 - 作业模式目录
// ==========================================
// 职责: 作业模式选项 → 作业方向标签
// 说明: 标签在配置时绑定，引擎按标签判定装卸类型与参考列
// ==========================================

use crate::domain::types::{MovementType, OperationDirection, ReferenceField};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// 未登记作业模式的装船判定标记
pub const LEGACY_LOADING_MARKER: &str = "Xuất";

// ==========================================
// OperationModeOption - 单个作业模式选项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationModeOption {
    pub label: String,
    pub direction: OperationDirection,
}

// ==========================================
// OperationModeGroup - 选项分组（卸船 / 装船）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationModeGroup {
    pub label: String,
    pub options: Vec<OperationModeOption>,
}

// ==========================================
// OperationModeCatalog
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationModeCatalog {
    pub groups: Vec<OperationModeGroup>,
}

impl Default for OperationModeCatalog {
    fn default() -> Self {
        fn option(label: &str, direction: OperationDirection) -> OperationModeOption {
            OperationModeOption {
                label: label.to_string(),
                direction,
            }
        }

        Self {
            groups: vec![
                OperationModeGroup {
                    label: "Nhập tàu (Discharge)".to_string(),
                    options: vec![
                        option("Nhập bãi", OperationDirection::YardImport),
                        option("Nhập giao thẳng Tàu -> xe", OperationDirection::DirectToTruck),
                        option("Nhập giao thẳng Tàu -> sà lan", OperationDirection::DirectToBarge),
                    ],
                },
                OperationModeGroup {
                    label: "Xuất tàu (Loading)".to_string(),
                    options: vec![
                        option("Xuất thông thường (Bãi -> Tàu)", OperationDirection::YardExport),
                        option("Xuất giao thẳng (Xe -> Tàu)", OperationDirection::DirectFromTruck),
                        option(
                            "Xuất giao thẳng (Sà lan -> Tàu)",
                            OperationDirection::DirectFromBarge,
                        ),
                    ],
                },
            ],
        }
    }
}

impl OperationModeCatalog {
    /// 全部选项（按分组顺序）
    pub fn options(&self) -> impl Iterator<Item = &OperationModeOption> {
        self.groups.iter().flat_map(|g| g.options.iter())
    }

    /// 默认作业模式（第一组第一项）
    pub fn default_mode(&self) -> Option<&str> {
        self.options().next().map(|o| o.label.as_str())
    }

    /// 按标签精确查找方向
    pub fn direction_of(&self, label: &str) -> Option<OperationDirection> {
        self.options()
            .find(|o| o.label == label)
            .map(|o| o.direction)
    }

    /// 判定装卸类型
    ///
    /// 已登记标签按方向标签判定；未登记标签回退到 "Xuất" 子串规则
    pub fn movement_type_of(&self, label: &str) -> MovementType {
        match self.direction_of(label) {
            Some(direction) => direction.movement_type(),
            None => {
                warn!(operation_mode = %label, "作业模式未登记，按标签文本判定装卸类型");
                if label.contains(LEGACY_LOADING_MARKER) {
                    MovementType::Load
                } else {
                    MovementType::Discharge
                }
            }
        }
    }

    /// 表格参考列，未登记标签不显示参考列
    pub fn reference_field_of(&self, label: &str) -> Option<ReferenceField> {
        self.direction_of(label).and_then(|d| d.reference_field())
    }

    /// 标签唯一性检查，返回第一个重复标签
    pub fn find_duplicate_label(&self) -> Option<&str> {
        let mut seen = std::collections::HashSet::new();
        self.options()
            .map(|o| o.label.as_str())
            .find(|label| !seen.insert(*label))
    }
}
