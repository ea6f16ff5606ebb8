// ==========================================
// 港口理货录入系统 - 引擎层
// ==========================================
// 职责: 理货记录状态机、净重推导、过滤与汇总
// 红线: 无 I/O，无后台任务，所有操作同步完成
// ==========================================

pub mod clock;
pub mod error;
pub mod events;
pub mod net_weight;
pub mod tally_engine;

// 重导出核心引擎
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{TallyError, TallyResult};
pub use events::{
    NoOpEventPublisher, OptionalEventPublisher, TallyEvent, TallyEventPublisher, TallyEventType,
};
pub use net_weight::NetWeightCore;
pub use tally_engine::TallyEngine;
