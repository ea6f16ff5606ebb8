// ==========================================
// 港口理货录入系统 - 参考数据
// ==========================================
// 职责: 舱位、车辆、货名目录（只读，外部提供）
// 红线: 引擎不校验记录字段是否属于目录
// ==========================================

use crate::domain::types::HoldStatus;
use serde::{Deserialize, Serialize};

// ==========================================
// Hold - 舱位
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hold {
    pub id: String,
    pub name: String,
    pub capacity_t: f64,  // 舱容（吨）
    pub planned_t: f64,   // 计划量（吨）
    pub completed_t: f64, // 前序班次完成量（吨）
    pub status: HoldStatus,
}

// ==========================================
// Vehicle - 车辆（车头 + 挂车）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub truck: String,
    pub trailer: String,
}

// ==========================================
// ReferenceCatalog - 参考数据目录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceCatalog {
    pub holds: Vec<Hold>,
    pub vehicles: Vec<Vehicle>,
    pub cargo_names: Vec<String>,
}

impl ReferenceCatalog {
    /// 从 JSON 文本加载
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    pub fn hold(&self, hold_id: &str) -> Option<&Hold> {
        self.holds.iter().find(|h| h.id == hold_id)
    }

    /// 舱位显示名，未知舱位返回 None
    pub fn hold_name(&self, hold_id: &str) -> Option<&str> {
        self.hold(hold_id).map(|h| h.name.as_str())
    }

    /// 按车牌/挂车号模糊查找（不区分大小写）
    ///
    /// 空关键字返回全部车辆
    pub fn search_vehicles(&self, term: &str) -> Vec<&Vehicle> {
        let term = term.trim();
        if term.is_empty() {
            return self.vehicles.iter().collect();
        }

        let lower = term.to_lowercase();
        self.vehicles
            .iter()
            .filter(|v| {
                v.truck.to_lowercase().contains(&lower) || v.trailer.to_lowercase().contains(&lower)
            })
            .collect()
    }
}
