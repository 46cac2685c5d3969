// ==========================================
// BOL 数据迁移引擎 - 遗留源表重建与造数工具
// ==========================================
// 用途: 重建 bol_db 并灌入有代表性的脏样本行，供迁移演练与验收
// 用法: seed_legacy_db [db_path]
// ==========================================

use rusqlite::params;
use std::error::Error;

use bol_migration::config::get_default_db_path;
use bol_migration::db::open_sqlite_connection;

/// 脏样本行: (po_sku_key, bol_number, shipped_qty, act_ship_date, status)
/// 覆盖: 货币格式、千分位、美式/ISO/欧式/长月名日期、尾随批注、
///       零数量、不可解析值、重复行、缺失自然键
const SNAKE_CASE_ROWS: &[(Option<&str>, Option<&str>, Option<&str>, Option<&str>, Option<&str>)] = &[
    (Some("PO-100"), Some("T1"), Some("$250"), Some("03/15/2026"), Some("Fulfilled")),
    // 同键同单号重复行: 订单刷新 + 发运去重
    (Some("PO-100"), Some("T1"), Some("$250"), Some("03/15/2026"), Some("Fulfilled")),
    (Some("PO-101"), Some("T2"), Some("1,500.00"), Some("2026-01-09"), Some("Fulfilled")),
    // 零数量: 订单落库但发运被校验门拦下
    (Some("PO-102"), None, Some("$0"), Some("01/09/2026"), Some("Fulfilled")),
    // 数量与日期均不可解析
    (Some("PO-103"), Some("T4"), Some("abc"), Some("garbage"), Some("Pending")),
    // 自然键缺失: 整行跳过
    (None, Some("T9"), Some("10"), Some("2026-05-01"), None),
    // 尾随批注: 走回退提取路径
    (Some("PO-104"), Some("T6"), Some("300"), Some("2026-02-10 (confirmed by carrier)"), Some("Fulfilled")),
    // 欧式日期 + 空单号
    (Some("PO-105"), None, Some("42"), Some("25/12/2026"), Some("Fulfilled")),
    // 空单号重复: 空串本身是去重键
    (Some("PO-105"), None, Some("42"), Some("25/12/2026"), Some("Fulfilled")),
];

/// 旧一代生产方写入的 camelCase 列样本
const CAMEL_CASE_ROWS: &[(&str, &str, &str, &str)] = &[
    ("PO-200", "T5", "75", "January 15, 2026"),
    ("PO-201", "", "$1,200", "20260320"),
];

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    println!("重建遗留源表: {}", db_path);

    let conn = open_sqlite_connection(&db_path)?;

    // 两代生产方共用一张表: snake_case 与 camelCase 列并存，
    // 每行只填自己那一代的列
    conn.execute_batch(
        r#"
        DROP TABLE IF EXISTS bol_db;
        CREATE TABLE bol_db (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          bol_number TEXT,
          po_sku_key TEXT,
          shipped_qty TEXT,
          shipping_fee TEXT,
          act_ship_date TEXT,
          signed_bol TEXT,
          status TEXT,
          timestamp TEXT,
          bolNumber TEXT,
          poSkuKey TEXT,
          shippedQty TEXT,
          actShipDate TEXT,
          created_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        "#,
    )?;

    let mut seeded = 0usize;
    for (po_sku_key, bol_number, shipped_qty, act_ship_date, status) in SNAKE_CASE_ROWS {
        conn.execute(
            r#"
            INSERT INTO bol_db (po_sku_key, bol_number, shipped_qty, act_ship_date, status)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![po_sku_key, bol_number, shipped_qty, act_ship_date, status],
        )?;
        seeded += 1;
    }

    for (po_sku_key, bol_number, shipped_qty, act_ship_date) in CAMEL_CASE_ROWS {
        conn.execute(
            r#"
            INSERT INTO bol_db (poSkuKey, bolNumber, shippedQty, actShipDate)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![po_sku_key, bol_number, shipped_qty, act_ship_date],
        )?;
        seeded += 1;
    }

    let total: i64 = conn.query_row("SELECT COUNT(*) FROM bol_db", [], |row| row.get(0))?;
    println!("造数完成: 写入 {} 行, 表内共 {} 行", seeded, total);
    println!("下一步: cargo run --bin bol-migration -- {}", db_path);

    Ok(())
}
