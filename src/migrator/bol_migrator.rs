// ==========================================
// BOL 数据迁移引擎 - 迁移流程驱动器
// ==========================================
// 职责: 整合迁移流程，从遗留扁平表到归一化双实体
// 流程: 源表校验 → 抽取 → 转换 → 订单 upsert → 发运条件插入 → 报告
// 约束: 顺序批处理，单条在途；同一自然键的后续行必须能看到前行分配的订单 id
// ==========================================

use crate::domain::bol::{NewOrder, NewShipment, TransformedBol};
use crate::domain::types::{OrderStatus, ShipmentOutcome};
use crate::migrator::error::{MigrationError, MigrationResult};
use crate::migrator::field_mapper::{transform, TransformOutcome};
use crate::migrator::report::MigrationReport;
use crate::repository::MigrationRepository;
use chrono::Utc;
use serde_json::json;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

/// 迁移订单的固定来源标记
const ORDER_SOURCE: &str = "DEALER";

/// 进度日志间隔（行）
const PROGRESS_INTERVAL: usize = 50;

// ==========================================
// BolMigrator - 迁移流程驱动器
// ==========================================
pub struct BolMigrator<R>
where
    R: MigrationRepository,
{
    // 数据访问层
    repo: R,
}

impl<R> BolMigrator<R>
where
    R: MigrationRepository,
{
    /// 创建新的 BolMigrator 实例
    ///
    /// # 参数
    /// - repo: 迁移数据仓储
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// 执行完整迁移运行
    ///
    /// 幂等: 对同一源重复执行收敛到相同终态；第二次运行订单全部走刷新
    /// 分支，发运全部命中去重跳过。
    ///
    /// # 返回
    /// - Ok(MigrationReport): 运行聚合报告
    /// - Err: 致命错误（源表缺失/抽取失败/存储写入失败），调用方以非零退出
    #[instrument(skip(self), fields(run_id))]
    pub async fn run(&self) -> MigrationResult<MigrationReport> {
        let start_time = Instant::now();
        let run_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("run_id", run_id.as_str());

        info!(run_id = %run_id, "开始迁移: bol_db → orders + shipments");

        // === 步骤 1: 源表校验 ===
        if !self.repo.legacy_table_exists().await? {
            return Err(MigrationError::SourceTableMissing(
                crate::db::LEGACY_TABLE.to_string(),
            ));
        }

        // === 步骤 2: 抽取 ===
        debug!("步骤 2: 全表抽取遗留行");
        let records = self
            .repo
            .extract_all_legacy()
            .await
            .map_err(|e| MigrationError::SourceExtractError(e.to_string()))?;

        let total = records.len();
        info!(total = total, "抽取完成");

        let mut report = MigrationReport {
            total_records: total,
            ..Default::default()
        };

        if total == 0 {
            warn!("源表为空，无事可做");
            report.set_elapsed(start_time.elapsed());
            return Ok(report);
        }

        // === 步骤 3: 逐行转换 + 加载 ===
        debug!("步骤 3: 转换与加载");
        for record in &records {
            let idx = record.row_number;
            if idx % PROGRESS_INTERVAL == 0 || idx == total {
                info!(processed = idx, total = total, "迁移进度");
            }

            // --- 转换 ---
            let bol = match transform(record) {
                TransformOutcome::Ready(bol) => bol,
                TransformOutcome::SkippedNoKey => {
                    warn!(row_number = idx, "自然键缺失，整行跳过");
                    report.records_skipped_no_key += 1;
                    continue;
                }
            };

            // --- 加载 A: 订单 upsert（单条原子语句） ---
            let now = Utc::now();
            let order = NewOrder {
                candidate_id: Uuid::new_v4().to_string(),
                order_number: bol.order_number.clone(),
                source: ORDER_SOURCE.to_string(),
                status: OrderStatus::Shipped,
                items_json: json!([{"sku": bol.order_number, "original_qty": bol.qty}])
                    .to_string(),
                now,
            };

            let upsert = self.repo.upsert_order(&order).await?;
            if upsert.was_created {
                report.orders_created += 1;
            } else {
                report.orders_updated += 1;
            }

            // --- 加载 B: 发运条件插入 ---
            match self.maybe_insert_shipment(&upsert.order_id, &bol).await? {
                ShipmentOutcome::Created => report.shipments_created += 1,
                ShipmentOutcome::SkippedInvalid => {
                    debug!(
                        row_number = idx,
                        order_number = %bol.order_number,
                        "发运校验门未通过（无日期或数量为零）"
                    );
                    report.shipments_skipped_invalid += 1;
                }
                ShipmentOutcome::SkippedDuplicate => {
                    report.shipments_skipped_duplicate += 1;
                }
            }
        }

        report.set_elapsed(start_time.elapsed());

        info!(
            run_id = %run_id,
            total = report.total_records,
            orders_created = report.orders_created,
            orders_updated = report.orders_updated,
            shipments_created = report.shipments_created,
            shipments_skipped = report.shipments_skipped(),
            records_skipped_no_key = report.records_skipped_no_key,
            elapsed_ms = report.elapsed_ms,
            "迁移完成"
        );

        Ok(report)
    }

    /// 发运条件插入
    ///
    /// 校验门: 必须同时具备解析成功的发运日期与严格为正的数量，
    /// 否则不触达存储直接判 SkippedInvalid（部分记录不落库）。
    /// 去重: 同 (order_id, tracking_number) 已存在时判 SkippedDuplicate。
    async fn maybe_insert_shipment(
        &self,
        order_id: &str,
        bol: &TransformedBol,
    ) -> MigrationResult<ShipmentOutcome> {
        let Some(shipped_at) = bol.shipped_at else {
            return Ok(ShipmentOutcome::SkippedInvalid);
        };
        if bol.qty <= 0 {
            return Ok(ShipmentOutcome::SkippedInvalid);
        }

        let shipment = NewShipment {
            order_id: order_id.to_string(),
            tracking_number: bol.tracking_number.clone(),
            shipped_at,
            items_json: json!({"qty": bol.qty}).to_string(),
            now: Utc::now(),
        };

        if self.repo.insert_shipment_if_absent(&shipment).await? {
            Ok(ShipmentOutcome::Created)
        } else {
            Ok(ShipmentOutcome::SkippedDuplicate)
        }
    }
}
