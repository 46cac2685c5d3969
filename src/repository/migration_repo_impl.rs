// ==========================================
// BOL 数据迁移引擎 - 迁移 Repository 实现
// ==========================================
// 职责: 实现迁移相关数据访问（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::db::{ensure_normalized_schema, open_sqlite_connection, LEGACY_TABLE};
use crate::domain::bol::{LegacyBolRecord, NewOrder, NewShipment, OrderUpsert};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::migration_repo::MigrationRepository;
use async_trait::async_trait;
use rusqlite::types::ValueRef;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

// ==========================================
// MigrationRepositoryImpl
// ==========================================
pub struct MigrationRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl MigrationRepositoryImpl {
    /// 创建新的 Repository 实例（打开连接并自建目标 schema）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        ensure_normalized_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 复用既有连接创建实例（测试与工具共用连接时使用）
    pub fn with_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            ensure_normalized_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

#[async_trait]
impl MigrationRepository for MigrationRepositoryImpl {
    /// 全表抽取遗留行，所有列物化为可空文本
    async fn extract_all_legacy(&self) -> RepositoryResult<Vec<LegacyBolRecord>> {
        let conn = self.get_conn()?;

        let sql = format!("SELECT * FROM {} ORDER BY id", LEGACY_TABLE);
        let mut stmt = conn.prepare(&sql)?;
        let column_names: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = stmt.query([])?;
        let mut records = Vec::new();
        let mut row_number = 0usize;

        while let Some(row) = rows.next()? {
            row_number += 1;
            let mut fields = HashMap::with_capacity(column_names.len());
            for (idx, name) in column_names.iter().enumerate() {
                // 脏数据容忍: 数值列一律转回文本，交给转换层统一清洗
                let value = match row.get_ref(idx)? {
                    ValueRef::Null => None,
                    ValueRef::Integer(v) => Some(v.to_string()),
                    ValueRef::Real(v) => Some(v.to_string()),
                    ValueRef::Text(t) => Some(String::from_utf8_lossy(t).into_owned()),
                    ValueRef::Blob(_) => None,
                };
                fields.insert(name.clone(), value);
            }
            records.push(LegacyBolRecord::new(row_number, fields));
        }

        Ok(records)
    }

    /// 按自然键 upsert 订单（单条原子语句，RETURNING id）
    ///
    /// 冲突分支只刷新 updated_at，既有字段永不回退。
    /// 新建判定: 返回 id 与预生成 candidate_id 相同即为本次插入。
    async fn upsert_order(&self, order: &NewOrder) -> RepositoryResult<OrderUpsert> {
        let conn = self.get_conn()?;

        let returned_id: String = conn.query_row(
            r#"
            INSERT INTO orders (id, order_number, source, status, items, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ON CONFLICT(order_number) DO UPDATE SET
                updated_at = excluded.updated_at
            RETURNING id
            "#,
            params![
                order.candidate_id,
                order.order_number,
                order.source,
                order.status.to_string(),
                order.items_json,
                order.now,
            ],
            |row| row.get(0),
        )?;

        let was_created = returned_id == order.candidate_id;
        Ok(OrderUpsert {
            order_id: returned_id,
            was_created,
        })
    }

    /// 同 (order_id, tracking_number) 不存在时插入发运（检查与插入同一事务）
    async fn insert_shipment_if_absent(&self, shipment: &NewShipment) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let existing: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM shipments
                 WHERE order_id = ?1 AND tracking_number = ?2
                 LIMIT 1",
                params![shipment.order_id, shipment.tracking_number],
                |row| row.get(0),
            )
            .optional()?;

        if existing.is_some() {
            // 幂等跳过，无写入
            return Ok(false);
        }

        tx.execute(
            r#"
            INSERT INTO shipments (id, order_id, tracking_number, shipped_at, items, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
            params![
                Uuid::new_v4().to_string(),
                shipment.order_id,
                shipment.tracking_number,
                shipment.shipped_at,
                shipment.items_json,
                shipment.now,
            ],
        )?;

        tx.commit()?;
        Ok(true)
    }

    async fn count_orders(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM orders", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    async fn count_shipments(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM shipments", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    async fn legacy_table_exists(&self) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;
        Ok(crate::db::legacy_table_exists(&conn)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::configure_sqlite_connection;
    use crate::domain::types::OrderStatus;
    use chrono::{NaiveDate, Utc};

    fn test_repo() -> MigrationRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        configure_sqlite_connection(&conn).unwrap();
        MigrationRepositoryImpl::with_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    fn new_order(order_number: &str) -> NewOrder {
        NewOrder {
            candidate_id: Uuid::new_v4().to_string(),
            order_number: order_number.to_string(),
            source: "DEALER".to_string(),
            status: OrderStatus::Shipped,
            items_json: "[]".to_string(),
            now: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_order_create_then_refresh() {
        let repo = test_repo();

        let first = repo.upsert_order(&new_order("PO-1")).await.unwrap();
        assert!(first.was_created);

        // 同自然键第二次 upsert: 返回同一代理键，且不再是新建
        let second = repo.upsert_order(&new_order("PO-1")).await.unwrap();
        assert!(!second.was_created);
        assert_eq!(first.order_id, second.order_id);

        assert_eq!(repo.count_orders().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_insert_shipment_if_absent_dedups() {
        let repo = test_repo();
        let upsert = repo.upsert_order(&new_order("PO-1")).await.unwrap();

        let shipment = NewShipment {
            order_id: upsert.order_id.clone(),
            tracking_number: "T1".to_string(),
            shipped_at: NaiveDate::from_ymd_opt(2026, 3, 15)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            items_json: "{\"qty\":250}".to_string(),
            now: Utc::now(),
        };

        assert!(repo.insert_shipment_if_absent(&shipment).await.unwrap());
        assert!(!repo.insert_shipment_if_absent(&shipment).await.unwrap());
        assert_eq!(repo.count_shipments().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_empty_tracking_number_is_a_distinct_key() {
        let repo = test_repo();
        let upsert = repo.upsert_order(&new_order("PO-1")).await.unwrap();

        let mut shipment = NewShipment {
            order_id: upsert.order_id.clone(),
            tracking_number: String::new(),
            shipped_at: NaiveDate::from_ymd_opt(2026, 1, 9)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap(),
            items_json: "{\"qty\":10}".to_string(),
            now: Utc::now(),
        };

        assert!(repo.insert_shipment_if_absent(&shipment).await.unwrap());
        // 空串与空串相同 → 去重
        assert!(!repo.insert_shipment_if_absent(&shipment).await.unwrap());

        // 非空单号与空串互不冲突
        shipment.tracking_number = "T9".to_string();
        assert!(repo.insert_shipment_if_absent(&shipment).await.unwrap());
        assert_eq!(repo.count_shipments().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_extract_all_legacy_stringifies_values() {
        let repo = test_repo();
        {
            let conn = repo.get_conn().unwrap();
            conn.execute_batch(
                r#"
                CREATE TABLE bol_db (
                  id INTEGER PRIMARY KEY AUTOINCREMENT,
                  po_sku_key TEXT,
                  shipped_qty TEXT
                );
                INSERT INTO bol_db (po_sku_key, shipped_qty) VALUES ('PO-1', '250');
                INSERT INTO bol_db (po_sku_key, shipped_qty) VALUES (NULL, NULL);
                "#,
            )
            .unwrap();
        }

        let records = repo.extract_all_legacy().await.unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].row_number, 1);
        // 整数主键列转为文本
        assert_eq!(records[0].fields["id"], Some("1".to_string()));
        assert_eq!(records[0].fields["po_sku_key"], Some("PO-1".to_string()));
        assert_eq!(records[1].fields["po_sku_key"], None);
    }
}
