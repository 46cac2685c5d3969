// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的临时数据库、遗留源表建表与造数功能
// ==========================================

use rusqlite::{params_from_iter, Connection};
use std::error::Error;
use tempfile::NamedTempFile;

use bol_migration::db::configure_sqlite_connection;

/// 创建临时测试数据库
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();
    Ok((temp_file, db_path))
}

/// 打开测试连接（统一 PRAGMA）
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建立 snake_case 一代的遗留源表
pub fn create_legacy_table(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS bol_db (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          bol_number TEXT,
          po_sku_key TEXT,
          shipped_qty TEXT,
          shipping_fee TEXT,
          act_ship_date TEXT,
          signed_bol TEXT,
          status TEXT,
          timestamp TEXT
        );
        "#,
    )?;
    Ok(())
}

/// 建立 camelCase 旧一代的遗留源表（纯旧生产方列名）
pub fn create_legacy_table_camel(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS bol_db (
          id INTEGER PRIMARY KEY AUTOINCREMENT,
          bolNumber TEXT,
          poSkuKey TEXT,
          shippedQty TEXT,
          actShipDate TEXT,
          status TEXT
        );
        "#,
    )?;
    Ok(())
}

/// 按给定列插入一行遗留数据
pub fn insert_legacy_row(
    conn: &Connection,
    columns: &[(&str, Option<&str>)],
) -> Result<(), Box<dyn Error>> {
    let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{}", i)).collect();
    let sql = format!(
        "INSERT INTO bol_db ({}) VALUES ({})",
        names.join(", "),
        placeholders.join(", ")
    );
    let values: Vec<Option<&str>> = columns.iter().map(|(_, value)| *value).collect();
    conn.execute(&sql, params_from_iter(values.iter()))?;
    Ok(())
}

/// 快捷造数: 标准 snake_case 行
pub fn insert_snake_row(
    conn: &Connection,
    po_sku_key: Option<&str>,
    bol_number: Option<&str>,
    shipped_qty: Option<&str>,
    act_ship_date: Option<&str>,
) -> Result<(), Box<dyn Error>> {
    insert_legacy_row(
        conn,
        &[
            ("po_sku_key", po_sku_key),
            ("bol_number", bol_number),
            ("shipped_qty", shipped_qty),
            ("act_ship_date", act_ship_date),
        ],
    )
}
