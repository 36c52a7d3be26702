//! 共享基础设施
//!
//! 各可执行组件复用的配置装载与日志初始化。

pub mod config;
pub mod observability;

pub use config::{AppConfig, ObservabilityConfig, StorageConfig};
