//! 配置管理模块
//!
//! 支持配置文件加载、环境变量覆盖，以及类型安全的配置访问。

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// JSON 文档落盘目录
    pub data_dir: PathBuf,
    pub rule_set_file: String,
    pub driver_group_file: String,
    pub app_setting_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            rule_set_file: "match_rules.json".to_string(),
            driver_group_file: "driver_groups.json".to_string(),
            app_setting_file: "app_setting.json".to_string(),
        }
    }
}

impl StorageConfig {
    pub fn rule_set_path(&self) -> PathBuf {
        self.data_dir.join(&self.rule_set_file)
    }

    pub fn driver_group_path(&self) -> PathBuf {
        self.data_dir.join(&self.driver_group_file)
    }

    pub fn app_setting_path(&self) -> PathBuf {
        self.data_dir.join(&self.app_setting_file)
    }
}

/// 可观测性配置
#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    pub log_level: String,
    /// 日志输出格式：json（结构化）或 pretty（人类可读）
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service_name: String,
    pub environment: String,
    pub storage: StorageConfig,
    pub observability: ObservabilityConfig,
}

impl AppConfig {
    /// 加载配置：config/{service_name}.toml（可缺省）+ APP_ 前缀环境变量覆盖
    ///
    /// 环境变量用双下划线分层，如 `APP_STORAGE__DATA_DIR=/var/lib/match`。
    pub fn load(service_name: &str) -> Result<Self, ConfigError> {
        let config_file = Path::new("config").join(format!("{}.toml", service_name));

        let mut app_config: AppConfig = Config::builder()
            .add_source(File::from(config_file).required(false))
            .add_source(Environment::with_prefix("APP").separator("__"))
            .build()?
            .try_deserialize()?;

        if app_config.service_name.is_empty() {
            app_config.service_name = service_name.to_string();
        }
        if app_config.environment.is_empty() {
            app_config.environment = "development".to_string();
        }

        Ok(app_config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.observability.log_format, "pretty");
    }

    #[test]
    fn test_storage_paths_join_data_dir() {
        let storage = StorageConfig {
            data_dir: PathBuf::from("/var/lib/match"),
            ..Default::default()
        };
        assert_eq!(
            storage.rule_set_path(),
            PathBuf::from("/var/lib/match/match_rules.json")
        );
        assert_eq!(
            storage.app_setting_path(),
            PathBuf::from("/var/lib/match/app_setting.json")
        );
    }

    #[test]
    fn test_load_fills_service_name() {
        let config = AppConfig::load("matchd").unwrap();
        assert_eq!(config.service_name, "matchd");
        assert_eq!(config.environment, "development");
    }
}
