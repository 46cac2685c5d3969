// ==========================================
// BOL 数据迁移引擎 - 运行配置
// ==========================================
// 职责: 解析数据库路径（命令行参数 > 环境变量 > 用户数据目录）
// 约束: 迁移入口除库连接配置外不需要任何必选参数
// ==========================================

use std::path::PathBuf;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "BOL_MIGRATION_DB_PATH";

/// 迁移运行配置
#[derive(Debug, Clone)]
pub struct MigrationConfig {
    /// SQLite 数据库文件路径（源表与目标表同库）
    pub db_path: String,
}

impl MigrationConfig {
    /// 从命令行参数与环境变量解析配置
    ///
    /// 优先级: 第一个位置参数 > BOL_MIGRATION_DB_PATH > 默认路径
    pub fn from_env_and_args<I: Iterator<Item = String>>(mut args: I) -> Self {
        let db_path = args.next().unwrap_or_else(get_default_db_path);
        Self { db_path }
    }
}

/// 获取默认数据库路径
pub fn get_default_db_path() -> String {
    // 允许通过环境变量显式指定 DB 路径（便于调试/测试/CI）
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    // 默认回退值，后续如果能拿到 data_dir 再覆盖
    let mut path = PathBuf::from("./bol_migration.db");

    // 尝试获取用户数据目录
    if let Some(data_dir) = dirs::data_dir() {
        // 开发环境使用独立目录，避免污染生产数据
        #[cfg(debug_assertions)]
        {
            path = data_dir.join("bol-migration-dev");
        }

        #[cfg(not(debug_assertions))]
        {
            path = data_dir.join("bol-migration");
        }

        path.push("bol_migration.db");
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_config_prefers_positional_arg() {
        let config =
            MigrationConfig::from_env_and_args(vec!["/tmp/custom.db".to_string()].into_iter());
        assert_eq!(config.db_path, "/tmp/custom.db");
    }
}
