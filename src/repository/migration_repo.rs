// ==========================================
// BOL 数据迁移引擎 - 迁移 Repository Trait
// ==========================================
// 职责: 定义迁移相关数据访问接口（不包含业务逻辑）
// 红线: Repository 不含业务规则，只做数据 CRUD
// ==========================================

use crate::domain::bol::{LegacyBolRecord, NewOrder, NewShipment, OrderUpsert};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// MigrationRepository Trait
// ==========================================
// 用途: 迁移运行期的全部存储访问
// 实现者: MigrationRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait MigrationRepository: Send + Sync {
    // ===== 抽取 =====

    /// 全表抽取遗留 bol_db 行（按 id 稳定排序）
    ///
    /// 所有列一律物化为可空文本；数值列转为其文本表示。
    ///
    /// # 返回
    /// - Ok(Vec<LegacyBolRecord>): 全部源行
    /// - Err: 查询失败（对整个运行是致命的）
    async fn extract_all_legacy(&self) -> RepositoryResult<Vec<LegacyBolRecord>>;

    // ===== 加载 =====

    /// 按自然键 upsert 订单（单条原子语句）
    ///
    /// INSERT ... ON CONFLICT(order_number) DO UPDATE SET updated_at，
    /// RETURNING id。不做读后写，跨运行并发对同一自然键也不会重复插入。
    ///
    /// # 返回
    /// - Ok(OrderUpsert): 订单代理键 + 本次是否新建
    async fn upsert_order(&self, order: &NewOrder) -> RepositoryResult<OrderUpsert>;

    /// 不存在同 (order_id, tracking_number) 发运时插入（检查与插入同一事务）
    ///
    /// # 返回
    /// - Ok(true): 已插入
    /// - Ok(false): 已存在同键发运，本次未写入
    async fn insert_shipment_if_absent(&self, shipment: &NewShipment) -> RepositoryResult<bool>;

    // ===== 校验/观测 =====

    /// 统计 orders 表记录数
    async fn count_orders(&self) -> RepositoryResult<usize>;

    /// 统计 shipments 表记录数
    async fn count_shipments(&self) -> RepositoryResult<usize>;

    /// 源表 bol_db 是否存在
    async fn legacy_table_exists(&self) -> RepositoryResult<bool>;
}
