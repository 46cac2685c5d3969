// ==========================================
// BOL 数据迁移引擎 - 领域模型
// ==========================================
// 归一化双实体: orders（订单）+ shipments（发运），一对多
// 迁移中间结构: LegacyBolRecord → TransformedBol → NewOrder/NewShipment
// ==========================================

use crate::domain::types::OrderStatus;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ==========================================
// Order - 订单实体
// ==========================================
// 对齐: orders 表
// 自然键 order_number（UNIQUE），代理键 id（uuid v4）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    // ===== 主键 =====
    pub id: String, // 代理键（uuid v4 文本）

    // ===== 业务键与属性 =====
    pub order_number: String,      // 自然键（遗留 po_sku_key）
    pub source: String,            // 订单来源（迁移行固定 DEALER）
    pub status: OrderStatus,       // 订单状态
    pub items: Option<String>,     // 条目载荷（JSON 数组文本）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
    pub updated_at: DateTime<Utc>, // 记录更新时间（重复迁移仅刷新此列）
}

// ==========================================
// Shipment - 发运实体
// ==========================================
// 对齐: shipments 表
// 生命周期从属于订单（外键级联删除）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shipment {
    // ===== 主键与关联 =====
    pub id: String,       // 代理键（uuid v4 文本）
    pub order_id: String, // 关联 orders.id（FK, ON DELETE CASCADE）

    // ===== 发运属性 =====
    pub tracking_number: String,    // BOL 单号（可为空串，空串本身是去重键）
    pub shipped_at: NaiveDateTime,  // 实际发运时间（非空）
    pub items: String,              // 数量载荷（JSON 对象文本，规范形 {"qty": n}）

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 记录创建时间
}

// ==========================================
// LegacyBolRecord - 遗留扁平行
// ==========================================
// 用途: 抽取阶段产物，列名 → 原始文本（或 NULL）
// 生命周期: 仅在单次迁移运行内，转换后即丢弃
#[derive(Debug, Clone)]
pub struct LegacyBolRecord {
    pub row_number: usize, // 抽取序号（1 起，用于日志定位）
    pub fields: HashMap<String, Option<String>>,
}

impl LegacyBolRecord {
    pub fn new(row_number: usize, fields: HashMap<String, Option<String>>) -> Self {
        Self { row_number, fields }
    }
}

// ==========================================
// TransformedBol - 转换阶段中间结构
// ==========================================
// 不变量: order_number 非空；数量/日期为尽力而为结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformedBol {
    pub order_number: String,              // 自然键（已确认非空）
    pub tracking_number: String,           // BOL 单号（缺失则为空串）
    pub qty: i64,                          // 清洗后数量（解析失败为 0）
    pub shipped_at: Option<NaiveDateTime>, // 解析后发运日期（可缺失）
    pub status_raw: Option<String>,        // 遗留状态文本（仅观测用）
    pub row_number: usize,                 // 源行号
}

// ==========================================
// NewOrder / NewShipment - 加载阶段写入载荷
// ==========================================

/// 订单 upsert 载荷（candidate_id 同时承担"本次是否新建"的判定信号）
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub candidate_id: String, // 预生成代理键；返回 id == candidate_id 即为新建
    pub order_number: String,
    pub source: String,
    pub status: OrderStatus,
    pub items_json: String,
    pub now: DateTime<Utc>,
}

/// 发运插入载荷
#[derive(Debug, Clone)]
pub struct NewShipment {
    pub order_id: String,
    pub tracking_number: String,
    pub shipped_at: NaiveDateTime,
    pub items_json: String,
    pub now: DateTime<Utc>,
}

// ==========================================
// OrderUpsert - upsert 结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderUpsert {
    pub order_id: String,
    pub was_created: bool,
}
