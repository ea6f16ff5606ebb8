// ==========================================
// 港口理货录入系统 - CSV 导出
// ==========================================
// 列顺序与表格一致，每条记录一行
// ==========================================

use crate::domain::tally::TallyRecord;
use crate::exporter::error::ExportResult;
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 导出行
#[derive(Debug, Clone, Serialize)]
pub struct TallyCsvRow<'a> {
    pub id: &'a str,
    pub time: String,
    pub bill_of_lading: &'a str,
    pub yard_location: &'a str,
    pub tally_method: &'static str,
    pub hold_id: &'a str,
    pub cargo_name: &'a str,
    pub truck_no: &'a str,
    pub trailer_no: &'a str,
    pub packs: u32,
    pub pcs: u32,
    pub loose: u32,
    pub unit_weight_t: f64,
    pub net_t: f64,
    #[serde(rename = "type")]
    pub movement_type: String,
    pub confirmed: bool,
    pub notes: &'a str,
}

impl<'a> TallyCsvRow<'a> {
    pub fn from_record(record: &'a TallyRecord, timestamp_format: &str) -> Self {
        Self {
            id: &record.id,
            time: record.timestamp_label(timestamp_format),
            bill_of_lading: &record.bill_of_lading,
            yard_location: &record.yard_location,
            tally_method: record.tally_method.as_str(),
            hold_id: &record.hold_id,
            cargo_name: &record.cargo_name,
            truck_no: &record.truck_no,
            trailer_no: &record.trailer_no,
            packs: record.packs,
            pcs: record.pcs,
            loose: record.loose,
            unit_weight_t: record.unit_weight_t,
            net_t: record.net_t,
            movement_type: record.movement_type.to_string(),
            confirmed: record.confirmed,
            notes: &record.notes,
        }
    }
}

/// 写出 CSV（含表头）
///
/// # 返回
/// - Ok(usize): 写出的数据行数
pub fn write_records_csv<'a, W, I>(
    writer: W,
    records: I,
    timestamp_format: &str,
) -> ExportResult<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a TallyRecord>,
{
    let mut csv_writer = WriterBuilder::new().has_headers(true).from_writer(writer);

    let mut count = 0;
    for record in records {
        csv_writer.serialize(TallyCsvRow::from_record(record, timestamp_format))?;
        count += 1;
    }
    csv_writer.flush()?;

    Ok(count)
}

/// 写出到文件
pub fn write_records_csv_to_path<'a, I>(
    path: &Path,
    records: I,
    timestamp_format: &str,
) -> ExportResult<usize>
where
    I: IntoIterator<Item = &'a TallyRecord>,
{
    let file = File::create(path)?;
    let count = write_records_csv(file, records, timestamp_format)?;
    info!(path = %path.display(), rows = count, "理货表导出完成");
    Ok(count)
}
