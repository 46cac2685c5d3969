// ==========================================
// BOL 数据迁移引擎 - 迁移结果校验工具
// ==========================================
// 用途: 迁移后人工核对——行数统计 + 订单/发运联查样本
// 用法: verify_migration [db_path]
// ==========================================

use rusqlite::params;
use std::error::Error;

use bol_migration::config::get_default_db_path;
use bol_migration::db::open_sqlite_connection;

fn main() -> Result<(), Box<dyn Error>> {
    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    println!("校验数据库: {}", db_path);

    let conn = open_sqlite_connection(&db_path)?;

    let legacy_total: i64 = conn
        .query_row("SELECT COUNT(*) FROM bol_db", [], |row| row.get(0))
        .unwrap_or(0);
    let orders_total: i64 =
        conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
    let shipments_total: i64 =
        conn.query_row("SELECT COUNT(*) FROM shipments", [], |row| row.get(0))?;
    let orders_without_shipments: i64 = conn.query_row(
        r#"
        SELECT COUNT(*) FROM orders o
        WHERE NOT EXISTS (SELECT 1 FROM shipments s WHERE s.order_id = o.id)
        "#,
        [],
        |row| row.get(0),
    )?;

    println!("---------- 行数统计 ----------");
    println!("  bol_db（源）:     {}", legacy_total);
    println!("  orders:           {}", orders_total);
    println!("  shipments:        {}", shipments_total);
    println!("  无发运订单:       {}", orders_without_shipments);

    println!("---------- 联查样本（前 10 条） ----------");
    let mut stmt = conn.prepare(
        r#"
        SELECT o.order_number, o.status, s.tracking_number, s.shipped_at, s.items
        FROM orders o
        LEFT JOIN shipments s ON s.order_id = o.id
        ORDER BY o.order_number
        LIMIT ?1
        "#,
    )?;

    let rows = stmt.query_map(params![10], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, Option<String>>(2)?,
            row.get::<_, Option<String>>(3)?,
            row.get::<_, Option<String>>(4)?,
        ))
    })?;

    for row in rows {
        let (order_number, status, tracking, shipped_at, items) = row?;
        match shipped_at {
            Some(shipped_at) => println!(
                "  {} [{}] 单号='{}' 发运于 {} 载荷 {}",
                order_number,
                status,
                tracking.unwrap_or_default(),
                shipped_at,
                items.unwrap_or_default()
            ),
            None => println!("  {} [{}] （无发运记录）", order_number, status),
        }
    }

    Ok(())
}
