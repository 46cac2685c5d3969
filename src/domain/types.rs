// ==========================================
// BOL 数据迁移引擎 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 迁移写入的订单统一落为 SHIPPED（遗留行本身即发运事件）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Draft,     // 草稿
    Confirmed, // 已确认
    Shipped,   // 已发运
    Completed, // 已完成
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Draft => write!(f, "DRAFT"),
            OrderStatus::Confirmed => write!(f, "CONFIRMED"),
            OrderStatus::Shipped => write!(f, "SHIPPED"),
            OrderStatus::Completed => write!(f, "COMPLETED"),
        }
    }
}

// ==========================================
// 发运加载结果 (Shipment Outcome)
// ==========================================
// 每条迁移记录的发运终态，三者互斥
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShipmentOutcome {
    /// 新发运记录已插入
    Created,
    /// 校验门未通过（无有效日期或数量 <= 0），未触达存储
    SkippedInvalid,
    /// 同 (order_id, tracking_number) 已存在，幂等跳过
    SkippedDuplicate,
}

impl fmt::Display for ShipmentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentOutcome::Created => write!(f, "CREATED"),
            ShipmentOutcome::SkippedInvalid => write!(f, "SKIPPED_INVALID"),
            ShipmentOutcome::SkippedDuplicate => write!(f, "SKIPPED_DUPLICATE"),
        }
    }
}
