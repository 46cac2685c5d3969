// ==========================================
// BOL 数据迁移引擎 - 迁移模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 迁移模块错误类型
///
/// 只收录对整个运行致命的错误；逐条可恢复问题（缺自然键、日期解析失败、
/// 数量归零）走计数器与日志，不进入此类型。
#[derive(Error, Debug)]
pub enum MigrationError {
    // ===== 源侧错误 =====
    #[error("遗留源表 {0} 不存在，无法迁移")]
    SourceTableMissing(String),

    #[error("源表抽取失败: {0}")]
    SourceExtractError(String),

    // ===== 目标侧错误 =====
    #[error("存储写入失败: {0}")]
    StorageError(#[from] RepositoryError),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type MigrationResult<T> = Result<T, MigrationError>;
