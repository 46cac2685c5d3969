// ==========================================
// BOL 数据迁移引擎 - 迁移层
// ==========================================
// 职责: 遗留扁平数据迁移,生成归一化双实体
// 流程: 抽取 → 转换（清洗/映射） → 加载（upsert/去重） → 报告
// ==========================================

// 模块声明
pub mod bol_migrator;
pub mod date_parser;
pub mod error;
pub mod field_mapper;
pub mod money_cleaner;
pub mod report;

// 重导出核心类型
pub use bol_migrator::BolMigrator;
pub use date_parser::parse_flexible_date;
pub use error::{MigrationError, MigrationResult};
pub use field_mapper::{transform, TransformOutcome};
pub use money_cleaner::clean_money_to_int;
pub use report::MigrationReport;
