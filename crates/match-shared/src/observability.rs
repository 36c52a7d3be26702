//! 日志初始化
//!
//! 基于 tracing-subscriber 的结构化日志：环境变量过滤优先于配置，
//! 支持 json / pretty 两种输出格式。

use crate::config::ObservabilityConfig;
use anyhow::Result;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

/// 初始化全局日志订阅器
///
/// 进程内只能调用一次，重复调用返回错误。
pub fn init(config: &ObservabilityConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = if config.log_format == "json" {
        fmt::layer().json().with_target(true).boxed()
    } else {
        fmt::layer().with_target(true).with_ansi(true).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_single_shot() {
        let config = ObservabilityConfig::default();
        assert!(init(&config).is_ok());
        // 全局订阅器已注册，再次初始化报错而不是 panic
        assert!(init(&config).is_err());
    }
}
