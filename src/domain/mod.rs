// ==========================================
// BOL 数据迁移引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含迁移流程逻辑
// ==========================================

pub mod bol;
pub mod types;

// 重导出核心类型
pub use bol::{
    LegacyBolRecord, NewOrder, NewShipment, Order, OrderUpsert, Shipment, TransformedBol,
};
pub use types::{OrderStatus, ShipmentOutcome};
