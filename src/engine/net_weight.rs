// ==========================================
// 港口理货录入系统 - 净重计算纯函数库
// ==========================================
// 职责: 可推导理货方式的净重计算
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::domain::tally::TallyRecord;
use crate::domain::types::TallyMethod;

// ==========================================
// NetWeightCore - 纯函数工具类
// ==========================================
pub struct NetWeightCore;

impl NetWeightCore {
    /// 按小数位四舍五入
    pub fn round_to(value: f64, decimals: u32) -> f64 {
        let factor = 10f64.powi(decimals as i32);
        (value * factor).round() / factor
    }

    /// 件数公式
    ///
    /// # 规则
    /// - multiplier = packs (packs > 0) 否则 1
    /// - qty = pcs (pcs > 0) 否则 0
    /// - net = round(multiplier × qty × unit_weight, decimals)
    ///
    /// 散件数 (loose) 不参与计算
    ///
    /// # 示例
    /// ```
    /// use port_tally::engine::NetWeightCore;
    /// assert_eq!(NetWeightCore::formula_net(20, 1000, 0.05, 3), 1000.0);
    /// assert_eq!(NetWeightCore::formula_net(0, 500, 0.1, 3), 50.0);
    /// ```
    pub fn formula_net(packs: u32, pcs: u32, unit_weight_t: f64, decimals: u32) -> f64 {
        let multiplier = if packs > 0 { packs } else { 1 };
        let qty = if pcs > 0 { pcs } else { 0 };
        Self::round_to(f64::from(multiplier) * f64::from(qty) * unit_weight_t, decimals)
    }

    /// 字段编辑后的派生净重
    ///
    /// # 返回
    /// - Some(net): 可推导方式（AVERAGE/STANDARD/MARK）
    /// - None: 其他方式，净重保持原值
    pub fn derive_net(record: &TallyRecord, decimals: u32) -> Option<f64> {
        if record.tally_method.is_derivable() {
            Some(Self::formula_net(
                record.packs,
                record.pcs,
                record.unit_weight_t,
                decimals,
            ))
        } else {
            None
        }
    }

    /// 方式+单重联合设置后的强制重算
    ///
    /// - UNSPECIFIED → 0
    /// - 可推导方式 → 件数公式
    /// - ID / SCALE / MANUAL → 保持当前净重
    pub fn resolve_net(record: &TallyRecord, decimals: u32) -> f64 {
        match record.tally_method {
            TallyMethod::Unspecified => 0.0,
            _ => Self::derive_net(record, decimals).unwrap_or(record.net_t),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::MovementType;
    use chrono::NaiveDate;

    fn record(method: TallyMethod, packs: u32, pcs: u32, unit: f64, net: f64) -> TallyRecord {
        TallyRecord {
            id: "T1".to_string(),
            created_at: NaiveDate::from_ymd_opt(2025, 3, 1)
                .unwrap()
                .and_hms_opt(8, 10, 0)
                .unwrap(),
            bill_of_lading: String::new(),
            yard_location: String::new(),
            tally_method: method,
            unit_weight_t: unit,
            packs,
            pcs,
            loose: 7,
            truck_no: String::new(),
            trailer_no: String::new(),
            hold_id: "H1".to_string(),
            cargo_name: "Than".to_string(),
            operation_mode: "Nhập bãi".to_string(),
            shore_crane: String::new(),
            hold_forklift: String::new(),
            crane_forklift: String::new(),
            worker_team: String::new(),
            net_t: net,
            movement_type: MovementType::Discharge,
            confirmed: false,
            notes: String::new(),
        }
    }

    #[test]
    fn test_formula_examples() {
        assert_eq!(NetWeightCore::formula_net(20, 1000, 0.05, 3), 1000.0);
        // packs=0 时乘数默认为 1
        assert_eq!(NetWeightCore::formula_net(0, 500, 0.1, 3), 50.0);
        // pcs=0 时净重为 0
        assert_eq!(NetWeightCore::formula_net(12, 0, 0.5, 3), 0.0);
    }

    #[test]
    fn test_rounding_to_three_decimals() {
        assert_eq!(NetWeightCore::formula_net(3, 7, 0.0123, 3), 0.258);
        assert_eq!(NetWeightCore::round_to(1.23456, 3), 1.235);
        assert_eq!(NetWeightCore::round_to(1.23456, 0), 1.0);
    }

    #[test]
    fn test_halfway_rounds_up_on_scaled_value() {
        // 放大后的二进制值按 f64::round 进位，不按十进制字符串截断
        assert_eq!(NetWeightCore::formula_net(1, 1, 0.0045, 3), 0.005);
        assert_eq!(NetWeightCore::formula_net(1, 3, 0.1005, 3), 0.302);
    }

    #[test]
    fn test_derive_net_by_method() {
        let r = record(TallyMethod::Mark, 2, 10, 0.5, 99.0);
        assert_eq!(NetWeightCore::derive_net(&r, 3), Some(10.0));

        for method in [
            TallyMethod::Id,
            TallyMethod::Scale,
            TallyMethod::Manual,
            TallyMethod::Unspecified,
        ] {
            let r = record(method, 2, 10, 0.5, 99.0);
            assert_eq!(NetWeightCore::derive_net(&r, 3), None, "method={}", method);
        }
    }

    #[test]
    fn test_resolve_net() {
        assert_eq!(
            NetWeightCore::resolve_net(&record(TallyMethod::Unspecified, 2, 10, 0.5, 99.0), 3),
            0.0
        );
        assert_eq!(
            NetWeightCore::resolve_net(&record(TallyMethod::Scale, 2, 10, 0.5, 99.0), 3),
            99.0
        );
        assert_eq!(
            NetWeightCore::resolve_net(&record(TallyMethod::Average, 2, 10, 0.5, 99.0), 3),
            10.0
        );
    }

    #[test]
    fn test_loose_ignored() {
        let mut r = record(TallyMethod::Standard, 4, 25, 0.1, 0.0);
        let before = NetWeightCore::derive_net(&r, 3);
        r.loose = 500;
        assert_eq!(NetWeightCore::derive_net(&r, 3), before);
    }
}
