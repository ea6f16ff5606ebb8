// ==========================================
// 港口理货录入系统 - 演示入口
// ==========================================
// 加载配置 → 载入演示班次 → 执行一段理货操作 → 输出表格 JSON
// ==========================================

use anyhow::{Context, Result};
use port_tally::api::VehicleColumn;
use port_tally::config::ConfigManager;
use port_tally::demo::{demo_catalog, demo_records, DEMO_YARD_MODE};
use port_tally::i18n::t_with_args;
use port_tally::{logging, FieldUpdate, TallyApi, TallyConfig, TallyEngine, TallyMethod};

fn main() -> Result<()> {
    logging::init();
    port_tally::i18n::init();

    tracing::info!("==================================================");
    tracing::info!("{}", port_tally::APP_NAME);
    tracing::info!("系统版本: {}", port_tally::VERSION);
    tracing::info!("==================================================");

    let manager = ConfigManager::from_env_or_default();
    match manager.path() {
        Some(path) => tracing::info!(path = %path.display(), "配置文件路径"),
        None => tracing::info!("未解析到配置文件路径"),
    }
    let config = manager.load().context("加载配置失败")?;

    let today = chrono::Local::now().date_naive();
    let mut engine = TallyEngine::new(config);
    engine
        .replace_records(demo_records(today))
        .context("载入演示数据失败")?;

    let mut api = TallyApi::new(engine, demo_catalog());
    let hold_id = "H1";

    // 新增一条入堆场记录并完成理货
    let record = api.add_record(TallyConfig {
        yard_location: "Bãi A1".to_string(),
        hold_id: hold_id.to_string(),
        cargo_name: "Thép cuộn".to_string(),
        operation_mode: DEMO_YARD_MODE.to_string(),
        shore_crane: "Cẩu bờ 01".to_string(),
        hold_forklift: "Xe nâng 01".to_string(),
        crane_forklift: "Xe nâng 05".to_string(),
        worker_team: "Tổ công nhân 1".to_string(),
        ..Default::default()
    })?;

    let (method, unit_weight) = api.method_editor_defaults(&record.id)?;
    api.set_tally_method(&record.id, method, unit_weight)?;
    api.update_field(&record.id, FieldUpdate::Packs(20))?;
    api.update_field_raw(&record.id, "pcs", "1000")?;
    api.assign_vehicle(&record.id, VehicleColumn::Truck, "15C-123.45")?;
    api.assign_vehicle(&record.id, VehicleColumn::Trailer, "15R-001.22")?;
    let confirmed = api.toggle_confirm(&record.id)?;
    tracing::info!(record_id = %confirmed.id, net_t = confirmed.net_t, "演示记录已确认");

    // 锁定后的编辑会被拒绝
    if let Err(e) = api.set_tally_method(&record.id, TallyMethod::Manual, 0.1) {
        tracing::info!(error = %e, "锁定记录编辑被拒绝");
    }

    let view = api.grid_view(DEMO_YARD_MODE, hold_id);
    tracing::info!(
        "{} / {}",
        t_with_args(
            "grid.hold_label",
            &[("name", view.hold_name.as_deref().unwrap_or(hold_id))]
        ),
        t_with_args("grid.row_count", &[("count", view.row_count.to_string().as_str())])
    );
    println!("{}", serde_json::to_string_pretty(&view)?);

    let history = api.location_history("Bãi A1", DEMO_YARD_MODE, hold_id)?;
    println!("{}", serde_json::to_string_pretty(&history)?);

    Ok(())
}
