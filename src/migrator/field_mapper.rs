// ==========================================
// BOL 数据迁移引擎 - 字段映射与转换阶段
// ==========================================
// 职责: 遗留扁平行 → 已类型化中间记录 + 可用性分级
// 约束: 列名别名为显式有序候选表（两代生产方: snake_case 与 camelCase），
//       禁止运行时反射
// ==========================================

use crate::domain::bol::{LegacyBolRecord, TransformedBol};
use crate::migrator::date_parser::parse_flexible_date;
use crate::migrator::money_cleaner::clean_money_to_int;
use tracing::debug;

/// 自然键候选列（优先 snake_case 一代，其次 camelCase 二代）
const ORDER_KEY_ALIASES: &[&str] = &["po_sku_key", "poSkuKey"];

/// BOL 单号候选列
const TRACKING_ALIASES: &[&str] = &["bol_number", "bolNumber"];

/// 发运数量候选列
const QTY_ALIASES: &[&str] = &["shipped_qty", "shippedQty"];

/// 实际发运日期候选列
const SHIP_DATE_ALIASES: &[&str] = &["act_ship_date", "actShipDate"];

/// 遗留状态候选列
const STATUS_ALIASES: &[&str] = &["status"];

/// 遗留状态缺省值（两代生产方都默认已履约）
const DEFAULT_LEGACY_STATUS: &str = "Fulfilled";

// ==========================================
// TransformOutcome - 转换结果
// ==========================================
#[derive(Debug, Clone)]
pub enum TransformOutcome {
    /// 自然键有效，携带尽力而为的数量/日期
    Ready(TransformedBol),
    /// 自然键缺失或为空，整行无条件跳过（计数，不报错）
    SkippedNoKey,
}

/// 按候选列顺序提取字段（TRIM，空串视为缺失）
fn get_field(record: &LegacyBolRecord, aliases: &[&str]) -> Option<String> {
    for alias in aliases {
        if let Some(Some(v)) = record.fields.get(*alias) {
            let trimmed = v.trim();
            if !trimmed.is_empty() {
                return Some(trimmed.to_string());
            }
        }
    }
    None
}

/// 转换单条遗留行（纯函数，无副作用；日期解析失败仅产生日志行）
pub fn transform(record: &LegacyBolRecord) -> TransformOutcome {
    let Some(order_number) = get_field(record, ORDER_KEY_ALIASES) else {
        debug!(row_number = record.row_number, "自然键缺失，整行跳过");
        return TransformOutcome::SkippedNoKey;
    };

    let tracking_number = get_field(record, TRACKING_ALIASES).unwrap_or_default();
    let raw_qty = get_field(record, QTY_ALIASES);
    let raw_date = get_field(record, SHIP_DATE_ALIASES);
    let status_raw = get_field(record, STATUS_ALIASES)
        .or_else(|| Some(DEFAULT_LEGACY_STATUS.to_string()));

    let qty = clean_money_to_int(raw_qty.as_deref());
    let shipped_at = parse_flexible_date(raw_date.as_deref());

    TransformOutcome::Ready(TransformedBol {
        order_number,
        tracking_number,
        qty,
        shipped_at,
        status_raw,
        row_number: record.row_number,
    })
}
