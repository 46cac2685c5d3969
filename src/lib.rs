// ==========================================
// BOL 数据迁移引擎 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 定位: 遗留扁平表（bol_db）到归一化订单/发运模型的可重复 ETL
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 迁移层 - 抽取/转换/加载
pub mod migrator;

// 配置层 - 运行配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/schema 自建）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{OrderStatus, ShipmentOutcome};

// 领域实体
pub use domain::{
    LegacyBolRecord, NewOrder, NewShipment, Order, OrderUpsert, Shipment, TransformedBol,
};

// 迁移引擎
pub use migrator::{
    clean_money_to_int, parse_flexible_date, BolMigrator, MigrationError, MigrationReport,
    MigrationResult, TransformOutcome,
};

// 仓储
pub use repository::{MigrationRepository, MigrationRepositoryImpl, RepositoryError};

// 配置
pub use config::MigrationConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "BOL 数据迁移引擎";

// ==========================================
// 预编译检查
// ==========================================

// 确保编译时所有模块可见
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
