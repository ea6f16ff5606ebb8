// ==========================================
// 港口理货录入系统 - 演示班次数据
// ==========================================
// 用途: 演示/联调时的初始记录与参考数据
// 数据: 35 条卸船记录（前 15 条直提，其余入堆场；前 10 条未确认）
// ==========================================

use crate::domain::catalog::{Hold, ReferenceCatalog, Vehicle};
use crate::domain::tally::TallyRecord;
use crate::domain::types::{HoldStatus, MovementType, TallyMethod};
use crate::engine::NetWeightCore;
use chrono::NaiveDate;

pub const DEMO_RECORD_COUNT: usize = 35;
pub const DEMO_DIRECT_MODE: &str = "Nhập giao thẳng Tàu -> xe";
pub const DEMO_YARD_MODE: &str = "Nhập bãi";

const DEMO_DIRECT_COUNT: usize = 15;
const DEMO_UNCONFIRMED_COUNT: usize = 10;
const DEMO_UNIT_WEIGHT_T: f64 = 0.05;

/// 演示记录（按 ID 升序，T1000 在前）
pub fn demo_records(date: NaiveDate) -> Vec<TallyRecord> {
    (0..DEMO_RECORD_COUNT).map(|i| demo_record(date, i)).collect()
}

fn demo_record(date: NaiveDate, i: usize) -> TallyRecord {
    let is_direct = i < DEMO_DIRECT_COUNT;
    let is_unconfirmed = i < DEMO_UNCONFIRMED_COUNT;

    // 未确认记录尚未理货，件数与净重为 0
    let (tally_method, packs, pcs) = if is_unconfirmed {
        (TallyMethod::Unspecified, 0, 0)
    } else if is_direct {
        (TallyMethod::Average, 20 + (i % 5) as u32, 1000 + (i * 10) as u32)
    } else {
        (TallyMethod::Standard, 20 + (i % 5) as u32, 1000 + (i * 10) as u32)
    };
    let net_t = if tally_method.is_derivable() {
        NetWeightCore::formula_net(packs, pcs, DEMO_UNIT_WEIGHT_T, 3)
    } else {
        0.0
    };

    let (truck_no, trailer_no) = if !is_unconfirmed && is_direct {
        (format!("15C-{}.88", 100 + i), format!("15R-{}.99", 800 + i))
    } else {
        (String::new(), String::new())
    };

    TallyRecord {
        id: format!("T{}", 1000 + i),
        created_at: date
            .and_hms_opt(8, (10 + i) as u32, 0)
            .unwrap_or_default(),
        bill_of_lading: if is_direct {
            format!("BL-00{}", 200 + i)
        } else {
            String::new()
        },
        yard_location: if is_direct {
            String::new()
        } else {
            format!("Bãi A{}", (i % 3) + 1)
        },
        tally_method,
        unit_weight_t: DEMO_UNIT_WEIGHT_T,
        packs,
        pcs,
        loose: 0,
        truck_no,
        trailer_no,
        hold_id: format!("H{}", (i % 4) + 1),
        cargo_name: "Tole nóng".to_string(),
        operation_mode: (if is_direct { DEMO_DIRECT_MODE } else { DEMO_YARD_MODE }).to_string(),
        shore_crane: "Cẩu bờ 01".to_string(),
        hold_forklift: "Xe nâng 01".to_string(),
        crane_forklift: "Xe nâng 05".to_string(),
        worker_team: "Tổ 1".to_string(),
        net_t,
        movement_type: MovementType::Discharge,
        confirmed: !is_unconfirmed,
        notes: String::new(),
    }
}

/// 演示参考数据：4 个舱位、13 组车辆、货名
pub fn demo_catalog() -> ReferenceCatalog {
    let hold = |id: &str, name: &str, capacity: f64, planned: f64, completed: f64, status| Hold {
        id: id.to_string(),
        name: name.to_string(),
        capacity_t: capacity,
        planned_t: planned,
        completed_t: completed,
        status,
    };

    let vehicles = [
        ("15C-123.45", "15R-001.22"),
        ("15C-222.33", "15R-002.33"),
        ("15C-333.44", "15R-003.44"),
        ("15C-444.55", "15R-004.55"),
        ("15C-555.66", "15R-005.66"),
        ("15C-666.77", "15R-006.77"),
        ("15C-777.88", "15R-007.88"),
        ("15C-888.99", "15R-008.99"),
        ("15C-999.00", "15R-009.00"),
        ("15C-101.01", "15R-010.01"),
        ("29C-567.89", "29R-111.22"),
        ("14C-321.65", "14R-333.44"),
        ("16C-987.12", "16R-555.66"),
    ]
    .into_iter()
    .map(|(truck, trailer)| Vehicle {
        truck: truck.to_string(),
        trailer: trailer.to_string(),
    })
    .collect();

    ReferenceCatalog {
        holds: vec![
            hold("H1", "Hầm 1", 5000.0, 4800.0, 2100.0, HoldStatus::Active),
            hold("H2", "Hầm 2", 5500.0, 5200.0, 0.0, HoldStatus::Pending),
            hold("H3", "Hầm 3", 5000.0, 4900.0, 4900.0, HoldStatus::Done),
            hold("H4", "Hầm 4", 4500.0, 4000.0, 1200.0, HoldStatus::Active),
        ],
        vehicles,
        cargo_names: ["Than", "Clinker", "Quặng sắt", "Ngũ cốc", "Thép cuộn", "Container"]
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
