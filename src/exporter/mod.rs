// ==========================================
// 港口理货录入系统 - 导出层
// ==========================================
// 职责: 理货表格导出（班次交接）
// 支持: CSV
// ==========================================

pub mod csv_exporter;
pub mod error;

pub use csv_exporter::{write_records_csv, write_records_csv_to_path, TallyCsvRow};
pub use error::{ExportError, ExportResult};
