// ==========================================
// BOL 数据迁移引擎 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为（外键/级联删除依赖 foreign_keys=ON）
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 目标 schema（orders/shipments）自建，源表（bol_db）只校验存在性
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 遗留扁平源表表名
pub const LEGACY_TABLE: &str = "bol_db";

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启（shipments→orders 级联删除依赖它）
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 自建归一化目标 schema（幂等）
///
/// 说明：
/// - orders.order_number 为业务自然键，UNIQUE 支撑 ON CONFLICT upsert
/// - shipments.order_id 外键级联删除（Shipment 生命周期 ⊆ Order 生命周期）
/// - (order_id, tracking_number) 不建 UNIQUE 索引：去重由加载层在顺序批处理
///   保证下完成，约束化升级另行评估
pub fn ensure_normalized_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS orders (
          id TEXT PRIMARY KEY,
          order_number TEXT NOT NULL UNIQUE,
          source TEXT NOT NULL DEFAULT 'DEALER',
          status TEXT NOT NULL DEFAULT 'DRAFT'
            CHECK(status IN ('DRAFT', 'CONFIRMED', 'SHIPPED', 'COMPLETED')),
          items TEXT,
          created_at TEXT NOT NULL,
          updated_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS shipments (
          id TEXT PRIMARY KEY,
          order_id TEXT NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
          tracking_number TEXT NOT NULL DEFAULT '',
          shipped_at TEXT NOT NULL,
          items TEXT NOT NULL,
          created_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_shipments_order ON shipments(order_id);
        "#,
    )
}

/// 检查遗留源表是否存在（缺失则整个迁移无法进行）
pub fn legacy_table_exists(conn: &Connection) -> rusqlite::Result<bool> {
    let found: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name=?1 LIMIT 1",
            [LEGACY_TABLE],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);
    Ok(found)
}
