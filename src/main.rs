// ==========================================
// BOL 数据迁移引擎 - 迁移主入口
// ==========================================
// 运行面: 除库连接配置外无必选参数；成功打印聚合报告，
//         源读失败或存储写入失败以非零状态退出
// ==========================================

use bol_migration::config::MigrationConfig;
use bol_migration::migrator::BolMigrator;
use bol_migration::repository::MigrationRepositoryImpl;
use bol_migration::{logging, APP_NAME, VERSION};

#[tokio::main]
async fn main() {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!("迁移: bol_db → orders + shipments");
    tracing::info!("==================================================");

    // 解析配置（第一个位置参数 > 环境变量 > 默认路径）
    let config = MigrationConfig::from_env_and_args(std::env::args().skip(1));
    tracing::info!("使用数据库: {}", config.db_path);

    // 打开存储（运行级生命周期: 此处获取，运行结束随进程释放）
    let repo = match MigrationRepositoryImpl::new(&config.db_path) {
        Ok(repo) => repo,
        Err(e) => {
            tracing::error!(error = %e, "无法打开数据库");
            std::process::exit(1);
        }
    };

    // 执行迁移
    let migrator = BolMigrator::new(repo);
    match migrator.run().await {
        Ok(report) => {
            println!("{}", report);
        }
        Err(e) => {
            tracing::error!(error = %e, "迁移失败");
            std::process::exit(1);
        }
    }
}
