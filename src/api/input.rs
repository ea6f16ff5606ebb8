// ==========================================
// 港口理货录入系统 - 原始输入解析
// ==========================================
// 职责: 显示层文本输入 → 带类型的字段写入
// 规则: 非法输入直接拒绝，不做强制转换
// - 件数类字段: 非负整数
// - 重量类字段: 非负有限小数
// - 理货方式: 枚举名（不区分大小写）
// - 文本字段: 原样保留
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::tally::{FieldUpdate, TallyField};
use crate::domain::types::TallyMethod;

/// 解析字段名与原始文本
pub fn parse_field_update(field: &str, raw: &str) -> ApiResult<FieldUpdate> {
    let field: TallyField = field.parse().map_err(ApiError::InvalidInput)?;
    parse_value(field, raw)
}

/// 按字段类型解析原始文本
pub fn parse_value(field: TallyField, raw: &str) -> ApiResult<FieldUpdate> {
    let update = match field {
        TallyField::Packs => FieldUpdate::Packs(parse_count(field, raw)?),
        TallyField::Pcs => FieldUpdate::Pcs(parse_count(field, raw)?),
        TallyField::Loose => FieldUpdate::Loose(parse_count(field, raw)?),
        TallyField::UnitWeight => FieldUpdate::UnitWeight(parse_weight(field, raw)?),
        TallyField::Net => FieldUpdate::Net(parse_weight(field, raw)?),
        TallyField::TallyMethod => {
            let method: TallyMethod = raw.parse().map_err(ApiError::InvalidInput)?;
            FieldUpdate::TallyMethod(method)
        }
        TallyField::BillOfLading => FieldUpdate::BillOfLading(raw.to_string()),
        TallyField::YardLocation => FieldUpdate::YardLocation(raw.to_string()),
        TallyField::TruckNo => FieldUpdate::TruckNo(raw.to_string()),
        TallyField::TrailerNo => FieldUpdate::TrailerNo(raw.to_string()),
        TallyField::HoldId => FieldUpdate::HoldId(raw.to_string()),
        TallyField::CargoName => FieldUpdate::CargoName(raw.to_string()),
        TallyField::OperationMode => FieldUpdate::OperationMode(raw.to_string()),
        TallyField::ShoreCrane => FieldUpdate::ShoreCrane(raw.to_string()),
        TallyField::HoldForklift => FieldUpdate::HoldForklift(raw.to_string()),
        TallyField::CraneForklift => FieldUpdate::CraneForklift(raw.to_string()),
        TallyField::WorkerTeam => FieldUpdate::WorkerTeam(raw.to_string()),
        TallyField::Notes => FieldUpdate::Notes(raw.to_string()),
    };
    Ok(update)
}

fn parse_count(field: TallyField, raw: &str) -> ApiResult<u32> {
    raw.trim().parse::<u32>().map_err(|_| {
        ApiError::InvalidInput(format!("字段{}需要非负整数, 输入={:?}", field, raw))
    })
}

/// 重量（吨）
pub fn parse_weight(field: TallyField, raw: &str) -> ApiResult<f64> {
    let value = raw.trim().parse::<f64>().map_err(|_| {
        ApiError::InvalidInput(format!("字段{}需要数值, 输入={:?}", field, raw))
    })?;
    check_weight(field, value)
}

/// 重量取值检查（有限且非负）
pub fn check_weight(field: TallyField, value: f64) -> ApiResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(ApiError::InvalidInput(format!(
            "字段{}需要非负有限数值, 输入={}",
            field, value
        )));
    }
    Ok(value)
}
