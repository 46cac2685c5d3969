// ==========================================
// BOL 数据迁移引擎 - 迁移运行报告
// ==========================================
// 职责: 按运行聚合计数器，供运维观测与校验工具消费
// 不变量: 每条被丢弃的记录必有对应计数器自增，不允许静默丢行
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// 单次迁移运行的聚合报告
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationReport {
    /// 抽取到的源行总数
    pub total_records: usize,
    /// 本次新建订单数
    pub orders_created: usize,
    /// 自然键已存在、仅刷新 updated_at 的订单数
    pub orders_updated: usize,
    /// 本次插入发运数
    pub shipments_created: usize,
    /// 校验门未通过跳过的发运数（无日期或数量 <= 0）
    pub shipments_skipped_invalid: usize,
    /// 同键已存在而跳过的发运数（幂等重跑的正常路径）
    pub shipments_skipped_duplicate: usize,
    /// 自然键缺失而整行跳过的记录数
    pub records_skipped_no_key: usize,
    /// 运行耗时（毫秒）
    pub elapsed_ms: u64,
}

impl MigrationReport {
    /// 跳过的发运总数（校验门 + 去重）
    pub fn shipments_skipped(&self) -> usize {
        self.shipments_skipped_invalid + self.shipments_skipped_duplicate
    }

    pub fn set_elapsed(&mut self, elapsed: Duration) {
        self.elapsed_ms = elapsed.as_millis() as u64;
    }
}

impl fmt::Display for MigrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "---------- 迁移运行报告 ----------")?;
        writeln!(f, "  源行总数:       {}", self.total_records)?;
        writeln!(f, "  订单新建:       {}", self.orders_created)?;
        writeln!(f, "  订单刷新:       {}", self.orders_updated)?;
        writeln!(f, "  发运插入:       {}", self.shipments_created)?;
        writeln!(
            f,
            "  发运跳过:       {} (校验门 {} / 去重 {})",
            self.shipments_skipped(),
            self.shipments_skipped_invalid,
            self.shipments_skipped_duplicate
        )?;
        writeln!(f, "  缺键跳过:       {}", self.records_skipped_no_key)?;
        writeln!(f, "  耗时:           {} ms", self.elapsed_ms)?;
        write!(f, "----------------------------------")
    }
}
